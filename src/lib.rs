//! # notes-api - an in-memory notes service
//!
//! Notes (title, body, tags) are kept in a process-local store and exposed
//! over a small JSON HTTP API. Nothing is persisted across restarts.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a .notes.yml with the defaults
//! notes-api init --port 3000
//!
//! # Start the server
//! notes-api serve
//!
//! # Create a note
//! curl -X POST localhost:3000/notes \
//!   -H 'content-type: application/json' \
//!   -d '{"title":"Hello","body":"World","tags":["demo"]}'
//! ```
//!
//! ## Modules
//!
//! - [`api`]: axum router, handlers and HTTP error mapping
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (`Note`, `NewNote`, `NotePatch`)
//! - [`service`]: Identity, timestamps and not-found handling
//! - [`storage`]: In-memory note storage
//! - [`validation`]: Input validation

/// HTTP routes, handlers and error responses.
pub mod api;

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.notes.yml` configuration files and their discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines the `NotesError` enum and `Result<T>` type alias.
pub mod error;

pub mod logging;

/// Data models for notes.
pub mod model;

/// Note business rules over the storage layer.
pub mod service;

/// In-memory storage layer.
pub mod storage;

/// Input validation utilities.
///
/// Validates titles, bodies, tags, ids and whole JSON payloads.
pub mod validation;
