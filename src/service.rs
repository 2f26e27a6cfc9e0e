//! Note business rules on top of [`NoteStorage`].
//!
//! The service assigns identity and timestamps and turns "absent" storage
//! results into [`NotesError::NotFound`]. It owns its storage behind a lock
//! so a single instance can be shared by every request handler.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{NotesError, Result};
use crate::model::{NewNote, Note, NotePatch};
use crate::storage::NoteStorage;

#[derive(Debug, Default)]
pub struct NoteService {
    storage: RwLock<NoteStorage>,
}

impl NoteService {
    pub fn new(storage: NoteStorage) -> Self {
        Self {
            storage: RwLock::new(storage),
        }
    }

    pub fn create(&self, draft: NewNote) -> Result<Note> {
        let note = Note::new(Uuid::new_v4(), draft, Utc::now());
        let created = self.write()?.create(note)?;
        debug!(id = %created.id, "created note");
        Ok(created)
    }

    /// Lists every note, or only those tagged `tag`.
    pub fn list(&self, tag: Option<&str>) -> Result<Vec<Note>> {
        Ok(self.read()?.find_all(tag))
    }

    pub fn search_by_tag(&self, tag: &str) -> Result<Vec<Note>> {
        self.list(Some(tag))
    }

    pub fn get(&self, id: &Uuid) -> Result<Note> {
        self.read()?
            .find_by_id(id)
            .ok_or_else(|| NotesError::note_not_found(id))
    }

    /// Applies a partial update and refreshes `updatedAt`.
    ///
    /// The new stamp never goes backwards, so `createdAt <= updatedAt` holds
    /// even if the wall clock is adjusted between calls.
    pub fn update(&self, id: &Uuid, patch: NotePatch) -> Result<Note> {
        let mut storage = self.write()?;
        let existing = storage
            .find_by_id(id)
            .ok_or_else(|| NotesError::note_not_found(id))?;

        let stamp = next_stamp(existing.updated_at, Utc::now());
        let updated = storage
            .update(id, patch.with_updated_at(stamp))
            .ok_or_else(|| NotesError::note_not_found(id))?;
        debug!(id = %id, "updated note");
        Ok(updated)
    }

    pub fn delete(&self, id: &Uuid) -> Result<()> {
        if !self.write()?.delete(id) {
            return Err(NotesError::note_not_found(id));
        }
        debug!(id = %id, "deleted note");
        Ok(())
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, NoteStorage>> {
        self.storage
            .read()
            .map_err(|_| NotesError::Storage("note storage lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, NoteStorage>> {
        self.storage
            .write()
            .map_err(|_| NotesError::Storage("note storage lock poisoned".to_string()))
    }
}

fn next_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}
