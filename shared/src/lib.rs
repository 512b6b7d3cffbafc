//! Shared types for the board server
//!
//! Common types used across crates and by external clients: the label
//! vocabulary, the notepad record, and the sync message envelope.

pub mod message;
pub mod models;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Message bus re-exports (for convenient access)
pub use message::{EventType, SyncMessage, SyncPayload};

// Model re-exports
pub use models::{Label, Note};
