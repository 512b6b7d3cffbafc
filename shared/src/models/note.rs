//! Notepad note model

use serde::{Deserialize, Serialize};

/// A single notepad note
///
/// The whole note collection is persisted as one value, rewritten in full on
/// every change, so ids only need to be unique within the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Note {
    /// A fresh, empty note with the conventional `Note {n}` title
    pub fn untitled(id: u32, ordinal: usize) -> Self {
        Self {
            id,
            title: format!("Note {ordinal}"),
            content: String::new(),
            tags: Vec::new(),
        }
    }
}
