//! Sync message envelope
//!
//! These types are shared between the board server and clients. The server
//! publishes one [`SyncMessage`] per committed mutation; clients use the
//! per-resource version to decide between applying the delta and doing a
//! full refetch.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub mod payload;
pub use payload::SyncPayload;

/// Message bus event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// System notification
    Notification = 0,
    /// Data sync signal
    Sync = 1,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::Notification => write!(f, "notification"),
            EventType::Sync => write!(f, "sync"),
        }
    }
}

/// Message envelope carrying an event type and a typed payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message<T> {
    pub event_type: EventType,
    pub data: T,
    /// Used for message tracing
    pub request_id: Uuid,
}

impl<T> Message<T> {
    pub fn new(event_type: EventType, data: T) -> Self {
        Self {
            event_type,
            data,
            request_id: Uuid::new_v4(),
        }
    }
}

/// The message shape broadcast after every committed mutation
pub type SyncMessage = Message<SyncPayload>;

impl Message<SyncPayload> {
    /// Build a sync message from a payload
    pub fn sync(payload: &SyncPayload) -> Self {
        Message::new(EventType::Sync, payload.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_message_carries_payload() {
        let payload = SyncPayload {
            resource: "task".to_string(),
            version: 3,
            action: "updated".to_string(),
            id: "task:abc".to_string(),
            data: None,
        };
        let msg = SyncMessage::sync(&payload);
        assert_eq!(msg.event_type, EventType::Sync);
        assert_eq!(msg.data, payload);
    }
}
