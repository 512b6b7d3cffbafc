//! redb-based storage for the note collection
//!
//! # Layout
//!
//! | Table | Key | Value |
//! |-------|-----|-------|
//! | `notepad` | `"notepad-notes"` | JSON array of all notes |
//!
//! One fixed key holds the full serialized collection; every save rewrites
//! the whole value. Load of a never-written store yields an empty
//! collection.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::models::Note;
use thiserror::Error;

/// Single-table layout: the full note collection as one JSON value
const NOTES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("notepad");

const NOTES_KEY: &str = "notepad-notes";

/// Storage errors
#[derive(Debug, Error)]
pub enum NotepadError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Note not found: {0}")]
    NoteNotFound(u32),
}

pub type NotepadResult<T> = Result<T, NotepadError>;

/// Note storage backed by redb
#[derive(Clone)]
pub struct NoteStorage {
    db: Arc<Database>,
}

impl NoteStorage {
    /// Open (or create) the note database at the given path
    ///
    /// The table is created up front so reads never race table creation.
    pub fn open(path: impl AsRef<Path>) -> NotepadResult<Self> {
        let db = Database::create(path)?;
        let write = db.begin_write()?;
        {
            let _ = write.open_table(NOTES_TABLE)?;
        }
        write.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Load the full note collection
    pub fn load(&self) -> NotepadResult<Vec<Note>> {
        let read = self.db.begin_read()?;
        let table = read.open_table(NOTES_TABLE)?;

        match table.get(NOTES_KEY)? {
            Some(raw) => Ok(serde_json::from_slice(raw.value())?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full note collection, replacing whatever was stored
    pub fn save(&self, notes: &[Note]) -> NotepadResult<()> {
        let raw = serde_json::to_vec(notes)?;
        let write = self.db.begin_write()?;
        {
            let mut table = write.open_table(NOTES_TABLE)?;
            table.insert(NOTES_KEY, raw.as_slice())?;
        }
        write.commit()?;
        Ok(())
    }
}
