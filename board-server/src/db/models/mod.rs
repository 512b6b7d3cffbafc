//! Entity models for the board hierarchy
//!
//! Serialized field names are the storage contract (`camelCase`, matching the
//! collection shapes the UI reads), so every model pins them via serde.

pub mod board;
pub mod list;
pub mod serde_thing;
pub mod task;

pub use board::{Board, BoardCreate, BoardUpdate};
pub use list::{List, ListCreate, ListUpdate};
pub use task::{Task, TaskCreate, TaskUpdate};
