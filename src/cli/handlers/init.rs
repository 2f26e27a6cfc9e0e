use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::config::{CONFIG_FILE_NAME, NotesConfig};

/// Writes a default config file into `dir`, with `config`'s values.
pub fn handle_init(config: &NotesConfig, dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }

    config.save(&config_path)?;

    println!(
        "{} notes-api config in {}",
        "Initialized".green(),
        dir.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Listen: {}", config.server.bind_address().cyan());

    Ok(())
}
