//! Initialize a photo library (`--library` or the current directory)

use crate::library::Library;
use crate::system_config;
use anyhow::Result;
use std::env;
use std::path::Path;

pub async fn run(library: Option<&Path>) -> Result<()> {
    let root = match library {
        Some(root) => root.to_path_buf(),
        None => env::current_dir()?,
    };

    println!("Initializing Photolapse library at {}", root.display());

    let library = Library::init(&root)?;
    system_config::init_if_missing(&library)?;

    println!("Successfully initialized Photolapse library");
    println!();
    println!("Created .pl/ directory structure:");
    println!("  - .pl/journal/          (photo storage)");
    println!("  - .pl/config.toml       (library settings)");
    println!();
    println!("Next steps:");
    println!("  - Run 'pl import <files>' to add photos");
    println!("  - Run 'pl watch <dir>' to import photos as they arrive");
    Ok(())
}
