use anyhow::{Context, Result};
use clap::Parser;

use notes_api::cli::handlers::{handle_init, handle_serve};
use notes_api::cli::{Cli, Commands};
use notes_api::config::NotesConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;

    match &cli.command {
        Some(Commands::Init) => {
            let mut config = NotesConfig::default();
            cli.apply_overrides(&mut config);
            handle_init(&config, &cwd)
        }
        Some(Commands::Serve { .. }) | None => {
            let mut config = NotesConfig::discover(cli.config.as_deref(), &cwd)
                .context("Failed to load notes-api configuration")?;
            cli.apply_overrides(&mut config);
            handle_serve(config)
        }
    }
}
