// Envelopes carried around domain payloads.
//
// Purpose
// - Event: an immutable fact with its own id and occurrence time.
// - StoredEvent: an event as the store hands it back, with its stream and sequence number.
// - Command: an intention addressed to one entity. Commands are never stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::stream::StreamId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event<P> {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub payload: P,
}

impl<P> Event<P> {
    pub fn new(payload: P, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            occurred_at,
            payload,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEvent<P> {
    pub stream_id: StreamId,
    pub sequence: u64,
    pub event: Event<P>,
}

impl<P> StoredEvent<P> {
    pub fn payload(&self) -> &P {
        &self.event.payload
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.event.occurred_at
    }

    /// Stable identifier of the form `stream_id:sequence`.
    pub fn position(&self) -> String {
        format!("{}:{}", self.stream_id, self.sequence)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command<P> {
    pub command_id: Uuid,
    pub entity_id: String,
    pub payload: P,
    pub issued_at: DateTime<Utc>,
}

impl<P> Command<P> {
    pub fn new(entity_id: impl Into<String>, payload: P, issued_at: DateTime<Utc>) -> Self {
        Self {
            command_id: Uuid::now_v7(),
            entity_id: entity_id.into(),
            payload,
            issued_at,
        }
    }
}
