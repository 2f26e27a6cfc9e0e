//! Command-line interface for the `notes-api` binary.

mod commands;
pub mod handlers;

pub use commands::{Cli, Commands};
