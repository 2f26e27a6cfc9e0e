//! In-memory storage layer for notes.
//!
//! [`NoteStorage`] owns every stored [`Note`](crate::model::Note)
//! exclusively. Notes enter by value and leave as clones, so no caller can
//! reach stored state through a value it holds.
//!
//! Lookups by id are O(1); tag-filtered listings scan every record.

mod note_storage;

pub use note_storage::NoteStorage;
