use std::collections::HashMap;

use uuid::Uuid;

use crate::error::{NotesError, Result};
use crate::model::{Note, NotePatch};

/// Insertion-ordered note collection.
#[derive(Debug, Default)]
pub struct NoteStorage {
    notes: HashMap<Uuid, Note>,
    order: Vec<Uuid>,
}

impl NoteStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new note keyed by its id.
    ///
    /// Ids come from a random generator upstream, so the conflict branch is
    /// not expected to fire in practice.
    pub fn create(&mut self, note: Note) -> Result<Note> {
        if self.notes.contains_key(&note.id) {
            return Err(NotesError::Conflict(format!(
                "Note with id \"{}\" already exists",
                note.id
            )));
        }
        self.order.push(note.id);
        self.notes.insert(note.id, note.clone());
        Ok(note)
    }

    pub fn find_by_id(&self, id: &Uuid) -> Option<Note> {
        self.notes.get(id).cloned()
    }

    /// All notes in insertion order, optionally restricted to those carrying
    /// `tag` (compared case-insensitively).
    pub fn find_all(&self, tag: Option<&str>) -> Vec<Note> {
        self.order
            .iter()
            .filter_map(|id| self.notes.get(id))
            .filter(|note| tag.is_none_or(|t| note.has_tag(t)))
            .cloned()
            .collect()
    }

    /// Merges the supplied fields into an existing note. Values are stored
    /// as given; callers validate beforehand.
    pub fn update(&mut self, id: &Uuid, patch: NotePatch) -> Option<Note> {
        let note = self.notes.get_mut(id)?;
        note.apply(patch);
        Some(note.clone())
    }

    pub fn delete(&mut self, id: &Uuid) -> bool {
        if self.notes.remove(id).is_none() {
            return false;
        }
        self.order.retain(|existing| existing != id);
        true
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn clear(&mut self) {
        self.notes.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewNote;
    use chrono::{Duration, Utc};

    fn note(title: &str, tags: &[&str]) -> Note {
        let draft = NewNote::new(title, "Body").with_tags(tags.iter().copied());
        Note::new(Uuid::new_v4(), draft, Utc::now())
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_create_returns_copy() {
        let mut storage = NoteStorage::new();
        let original = note("First", &["a"]);
        let mut created = storage.create(original.clone()).unwrap();
        assert_eq!(created, original);

        created.title = "Mutated".to_string();
        created.tags.push("b".to_string());

        let stored = storage.find_by_id(&original.id).unwrap();
        assert_eq!(stored.title, "First");
        assert_eq!(stored.tags, vec!["a"]);
    }

    #[test]
    fn test_create_duplicate_id_conflicts() {
        let mut storage = NoteStorage::new();
        let first = note("First", &[]);
        let mut second = note("Second", &[]);
        second.id = first.id;

        storage.create(first).unwrap();
        let err = storage.create(second).unwrap_err();
        assert!(matches!(err, NotesError::Conflict(_)));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.find_all(None)[0].title, "First");
    }

    #[test]
    fn test_find_by_id_returns_independent_copy() {
        let mut storage = NoteStorage::new();
        let id = storage.create(note("First", &[])).unwrap().id;

        let mut fetched = storage.find_by_id(&id).unwrap();
        fetched.body = "changed".to_string();

        assert_eq!(storage.find_by_id(&id).unwrap().body, "Body");
    }

    #[test]
    fn test_find_by_id_unknown_is_none() {
        let storage = NoteStorage::new();
        assert!(storage.find_by_id(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_find_all_without_filter() {
        let mut storage = NoteStorage::new();
        storage.create(note("One", &["x"])).unwrap();
        storage.create(note("Two", &[])).unwrap();
        assert_eq!(titles(&storage.find_all(None)), vec!["One", "Two"]);
    }

    #[test]
    fn test_find_all_filters_case_insensitively() {
        let mut storage = NoteStorage::new();
        storage.create(note("Upper", &["TypeScript"])).unwrap();
        storage.create(note("Lower", &["typescript", "web"])).unwrap();
        storage.create(note("Other", &["rust"])).unwrap();

        let found = storage.find_all(Some("TypeScript"));
        assert_eq!(titles(&found), vec!["Upper", "Lower"]);
    }

    #[test]
    fn test_find_all_no_match_is_empty() {
        let mut storage = NoteStorage::new();
        storage.create(note("One", &["x"])).unwrap();
        assert!(storage.find_all(Some("missing")).is_empty());
    }

    #[test]
    fn test_update_merges_fields() {
        let mut storage = NoteStorage::new();
        let created = storage.create(note("Title", &["keep"])).unwrap();
        let later = created.updated_at + Duration::seconds(5);

        let updated = storage
            .update(
                &created.id,
                NotePatch::default()
                    .with_title("New title")
                    .with_updated_at(later),
            )
            .unwrap();

        assert_eq!(updated.title, "New title");
        assert_eq!(updated.body, "Body");
        assert_eq!(updated.tags, vec!["keep"]);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.updated_at, later);
        assert_eq!(storage.find_by_id(&created.id).unwrap(), updated);
    }

    #[test]
    fn test_update_does_not_validate() {
        let mut storage = NoteStorage::new();
        let id = storage.create(note("Title", &[])).unwrap().id;
        let updated = storage
            .update(&id, NotePatch::default().with_tags(["not valid!"]))
            .unwrap();
        assert_eq!(updated.tags, vec!["not valid!"]);
    }

    #[test]
    fn test_update_unknown_is_none() {
        let mut storage = NoteStorage::new();
        let patch = NotePatch::default().with_title("x");
        assert!(storage.update(&Uuid::new_v4(), patch).is_none());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_update_keeps_position() {
        let mut storage = NoteStorage::new();
        let first = storage.create(note("One", &[])).unwrap();
        storage.create(note("Two", &[])).unwrap();
        storage
            .update(&first.id, NotePatch::default().with_title("One again"))
            .unwrap();
        assert_eq!(titles(&storage.find_all(None)), vec!["One again", "Two"]);
    }

    #[test]
    fn test_delete() {
        let mut storage = NoteStorage::new();
        let first = storage.create(note("One", &[])).unwrap();
        storage.create(note("Two", &[])).unwrap();

        assert!(storage.delete(&first.id));
        assert!(!storage.delete(&first.id));
        assert!(storage.find_by_id(&first.id).is_none());
        assert_eq!(titles(&storage.find_all(None)), vec!["Two"]);
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_delete_unknown_is_false() {
        let mut storage = NoteStorage::new();
        assert!(!storage.delete(&Uuid::new_v4()));
    }

    #[test]
    fn test_clear() {
        let mut storage = NoteStorage::new();
        storage.create(note("One", &[])).unwrap();
        storage.create(note("Two", &[])).unwrap();
        storage.clear();
        assert_eq!(storage.len(), 0);
        assert!(storage.find_all(None).is_empty());
    }
}
