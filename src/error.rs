use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Request validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ValidationErrors> for NotesError {
    fn from(errors: ValidationErrors) -> Self {
        NotesError::Validation(errors)
    }
}

impl NotesError {
    pub fn note_not_found(id: impl std::fmt::Display) -> Self {
        NotesError::NotFound(format!("Note with id \"{}\" not found", id))
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
