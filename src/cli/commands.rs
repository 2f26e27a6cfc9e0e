use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::NotesConfig;

#[derive(Parser, Debug)]
#[command(name = "notes-api")]
#[command(
    author,
    version,
    about = "An in-memory notes service with a JSON HTTP API"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (searches upward for .notes.yml by default)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long, global = true, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long, global = true, env = "PORT")]
    pub port: Option<u16>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file, rotated daily
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default .notes.yml in the current directory
    Init,

    /// Run the HTTP server (default when no command is given)
    Serve {
        /// Largest accepted request body in bytes
        #[arg(long)]
        body_limit: Option<usize>,
    },
}

impl Cli {
    /// Applies command-line and environment overrides on top of `config`.
    pub fn apply_overrides(&self, config: &mut NotesConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.verbose {
            config.logging.verbose = true;
        }
        if let Some(log_file) = &self.log_file {
            config.logging.file = Some(log_file.clone());
        }
        if let Some(Commands::Serve {
            body_limit: Some(limit),
        }) = &self.command
        {
            config.server.body_limit = *limit;
        }
    }
}
