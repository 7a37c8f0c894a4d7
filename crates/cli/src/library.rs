//! Photo library location and layout
//!
//! ```text
//! <library>/
//!   .pl/
//!     config.toml
//!     journal/
//!       photos.db/
//! ```

use anyhow::{Context, Result};
use journal::{PhotoJournal, PhotoStore, UnavailableStore};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

/// Name of the library metadata directory
pub const LIBRARY_DIR: &str = ".pl";

pub struct Library {
    root: PathBuf,
}

impl Library {
    /// Create `.pl/` and its journal under `root`
    pub fn init(root: &Path) -> Result<Self> {
        let pl_dir = root.join(LIBRARY_DIR);
        if pl_dir.exists() {
            anyhow::bail!("Photolapse library already initialized at {}", pl_dir.display());
        }

        std::fs::create_dir_all(pl_dir.join("journal"))
            .context("Failed to create library directory")?;

        let library = Self {
            root: root.to_path_buf(),
        };

        // Creates the database and its trees
        library.open_journal()?;
        Ok(library)
    }

    /// Use `explicit` when given, otherwise walk up from the current directory
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(root) => {
                if !root.join(LIBRARY_DIR).is_dir() {
                    anyhow::bail!(
                        "Not a Photolapse library: {} (no .pl directory found)",
                        root.display()
                    );
                }
                Ok(Self {
                    root: root.to_path_buf(),
                })
            }
            None => {
                let cwd = std::env::current_dir().context("Failed to get current directory")?;
                Self::find_from(&cwd)
            }
        }
    }

    /// Find the library by walking up from `start` to find .pl/
    pub fn find_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(LIBRARY_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => anyhow::bail!(
                    "Not a Photolapse library (no .pl directory found). Run 'pl init' first."
                ),
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn pl_dir(&self) -> PathBuf {
        self.root.join(LIBRARY_DIR)
    }

    pub fn journal_dir(&self) -> PathBuf {
        self.pl_dir().join("journal")
    }

    pub fn config_path(&self) -> PathBuf {
        self.pl_dir().join("config.toml")
    }

    /// Open the journal for writing; failure is an error
    pub fn open_journal(&self) -> Result<PhotoJournal> {
        PhotoJournal::open(&self.journal_dir()).with_context(|| {
            format!(
                "Failed to open photo journal at {} (is another pl process using it?)",
                self.journal_dir().display()
            )
        })
    }

    /// Open the journal for reading, degrading to an empty library when the
    /// backend cannot be opened
    pub fn open_store_for_reading(&self) -> Box<dyn PhotoStore> {
        match PhotoJournal::open(&self.journal_dir()) {
            Ok(journal) => Box::new(journal),
            Err(e) => {
                tracing::warn!("Photo journal unavailable: {}", e);
                eprintln!(
                    "{}",
                    "Photo storage is unavailable; showing an empty library.".yellow()
                );
                Box::new(UnavailableStore)
            }
        }
    }
}
