//! Data models for notes.
//!
//! - [`Note`]: the stored entity, as returned to callers
//! - [`NewNote`]: a validated create payload
//! - [`NotePatch`]: a partial update, optionally carrying the new `updatedAt` stamp

mod note;

pub use note::{NewNote, Note, NotePatch};
