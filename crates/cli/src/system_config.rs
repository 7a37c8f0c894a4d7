//! Library settings file (`.pl/config.toml`)

use crate::library::Library;
use anyhow::{Context, Result};
use pl_core::Settings;

/// Load settings, falling back to defaults for a missing or unreadable file.
///
/// Values are clamped into range by the parser, so a hand-edited file can
/// never push the library outside the supported limits.
pub fn load(library: &Library) -> Result<Settings> {
    let path = library.config_path();
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    match Settings::from_toml_str(&content) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            tracing::error!("Failed to load settings from {}: {}", path.display(), e);
            Ok(Settings::default())
        }
    }
}

/// Validate and write settings
pub fn save(library: &Library, settings: &Settings) -> Result<()> {
    settings.validate().context("Invalid configuration value")?;

    let content = settings.to_toml_string()?;
    std::fs::write(library.config_path(), content)
        .with_context(|| format!("Failed to write {}", library.config_path().display()))?;
    Ok(())
}

/// Write the default settings unless a file already exists
pub fn init_if_missing(library: &Library) -> Result<()> {
    if !library.config_path().exists() {
        save(library, &Settings::default())?;
    }
    Ok(())
}

pub fn reset(library: &Library) -> Result<Settings> {
    let defaults = Settings::default();
    save(library, &defaults)?;
    Ok(defaults)
}

/// Annotated example settings file
pub fn example_config() -> &'static str {
    r#"# Photolapse library settings (.pl/config.toml)

[session]
# Photos further apart than this start a new session (1-60)
gap_minutes = 10

[retention]
# Oldest photos are removed once either limit is exceeded
max_photos = 1000        # 100-5000
max_storage_mb = 500     # 100-2000
# Apply the limits after every import
auto_enforce = true

[gallery]
# Ask before 'pl delete' removes a photo
confirm_delete = false
"#
}
