//! Notepad module
//!
//! Multi-note storage kept deliberately primitive: the whole note collection
//! lives under one fixed key and is rewritten in full on every change.

pub mod service;
pub mod storage;

pub use service::NotepadService;
pub use storage::{NoteStorage, NotepadError, NotepadResult};
