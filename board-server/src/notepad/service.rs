//! Note operations over the fixed-key storage
//!
//! Every operation is load -> mutate -> full save. The collection is never
//! left empty: removing the last note seeds a fresh "Note 1" in its place,
//! so an editor always has something to show.

use std::path::Path;

use shared::models::Note;

use super::storage::{NoteStorage, NotepadError, NotepadResult};

pub struct NotepadService {
    storage: NoteStorage,
}

impl std::fmt::Debug for NotepadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotepadService")
            .field("storage", &"<NoteStorage>")
            .finish()
    }
}

impl NotepadService {
    pub fn open(path: impl AsRef<Path>) -> NotepadResult<Self> {
        Ok(Self {
            storage: NoteStorage::open(path)?,
        })
    }

    /// The current collection; a never-written store yields the seed note
    pub fn load_notes(&self) -> NotepadResult<Vec<Note>> {
        let notes = self.storage.load()?;
        if notes.is_empty() {
            Ok(vec![Note::untitled(1, 1)])
        } else {
            Ok(notes)
        }
    }

    /// Replace the whole collection (the editor's bulk-save path)
    pub fn save_notes(&self, notes: &[Note]) -> NotepadResult<()> {
        self.storage.save(notes)
    }

    /// Append a fresh note and return it
    pub fn add_note(&self) -> NotepadResult<Note> {
        let mut notes = self.load_notes()?;
        let id = notes.iter().map(|n| n.id).max().unwrap_or(0) + 1;
        let note = Note::untitled(id, notes.len() + 1);
        notes.push(note.clone());
        self.storage.save(&notes)?;
        Ok(note)
    }

    /// Remove a note; the collection re-seeds itself when the last one goes
    pub fn remove_note(&self, id: u32) -> NotepadResult<Vec<Note>> {
        let mut notes = self.load_notes()?;
        let before = notes.len();
        notes.retain(|n| n.id != id);
        if notes.len() == before {
            return Err(NotepadError::NoteNotFound(id));
        }
        if notes.is_empty() {
            notes.push(Note::untitled(1, 1));
        }
        self.storage.save(&notes)?;
        Ok(notes)
    }

    /// Replace a note's content
    pub fn set_content(&self, id: u32, content: &str) -> NotepadResult<Note> {
        self.with_note(id, |note| note.content = content.to_string())
    }

    /// Rename a note; an empty title becomes "Untitled"
    pub fn rename(&self, id: u32, title: &str) -> NotepadResult<Note> {
        let title = if title.trim().is_empty() {
            "Untitled".to_string()
        } else {
            title.to_string()
        };
        self.with_note(id, move |note| note.title = title.clone())
    }

    /// Attach a tag; blank tags are ignored and duplicates collapse
    pub fn add_tag(&self, id: u32, tag: &str) -> NotepadResult<Note> {
        let tag = tag.trim().to_string();
        self.with_note(id, move |note| {
            if !tag.is_empty() && !note.tags.contains(&tag) {
                note.tags.push(tag.clone());
            }
        })
    }

    /// Detach a tag (absent tags are a no-op)
    pub fn remove_tag(&self, id: u32, tag: &str) -> NotepadResult<Note> {
        self.with_note(id, move |note| note.tags.retain(|t| t != tag))
    }

    fn with_note(&self, id: u32, mutate: impl Fn(&mut Note)) -> NotepadResult<Note> {
        let mut notes = self.load_notes()?;
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(NotepadError::NoteNotFound(id))?;
        mutate(note);
        let updated = note.clone();
        self.storage.save(&notes)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (NotepadService, tempfile::TempDir) {
        let tmp = tempfile::tempdir().unwrap();
        let service = NotepadService::open(tmp.path().join("notepad.redb")).unwrap();
        (service, tmp)
    }

    #[test]
    fn fresh_notepad_seeds_note_1() {
        let (service, _tmp) = open_temp();
        let notes = service.load_notes().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].id, 1);
        assert_eq!(notes[0].title, "Note 1");
    }

    #[test]
    fn add_note_uses_max_id_plus_one() {
        let (service, _tmp) = open_temp();
        let second = service.add_note().unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(second.title, "Note 2");

        // Removing note 1 then adding again must not reuse id 2
        service.remove_note(1).unwrap();
        let third = service.add_note().unwrap();
        assert_eq!(third.id, 3);
    }

    #[test]
    fn removing_the_last_note_reseeds() {
        let (service, _tmp) = open_temp();
        // Materialize the seed note, then remove it
        service.save_notes(&service.load_notes().unwrap()).unwrap();
        let notes = service.remove_note(1).unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Note 1");
    }

    #[test]
    fn rename_falls_back_to_untitled() {
        let (service, _tmp) = open_temp();
        let renamed = service.rename(1, "  ").unwrap();
        assert_eq!(renamed.title, "Untitled");

        let renamed = service.rename(1, "Ideas").unwrap();
        assert_eq!(renamed.title, "Ideas");
    }

    #[test]
    fn tags_deduplicate_and_ignore_blanks() {
        let (service, _tmp) = open_temp();
        service.add_tag(1, "rust").unwrap();
        service.add_tag(1, " rust ").unwrap();
        service.add_tag(1, "   ").unwrap();
        let note = service.add_tag(1, "notes").unwrap();
        assert_eq!(note.tags, vec!["rust", "notes"]);

        let note = service.remove_tag(1, "rust").unwrap();
        assert_eq!(note.tags, vec!["notes"]);
    }

    #[test]
    fn content_edits_persist() {
        let (service, _tmp) = open_temp();
        service.set_content(1, "# Hello").unwrap();
        let notes = service.load_notes().unwrap();
        assert_eq!(notes[0].content, "# Hello");
    }

    #[test]
    fn unknown_note_is_an_error() {
        let (service, _tmp) = open_temp();
        assert!(matches!(
            service.set_content(99, "x"),
            Err(NotepadError::NoteNotFound(99))
        ));
    }
}
