// Ports define what the engine needs from the outside world, without implementing it.
//
// Purpose
// - Describe the event store and the clock as traits.
//
// Responsibilities
// - Keep the command handler and queries independent of any concrete storage.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::broadcast;

use crate::core::envelope::{Event, StoredEvent};
use crate::core::stream::{ExpectedVersion, StreamId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventStoreError {
    #[error("version conflict on {stream_id}: expected {expected}, actual version {actual}")]
    Conflict {
        stream_id: StreamId,
        expected: ExpectedVersion,
        actual: u64,
    },

    #[error("cannot append an empty batch to {0}")]
    EmptyBatch(StreamId),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedStream<E> {
    pub events: Vec<StoredEvent<E>>,
    /// Tail version of the stream when it was read, not the number of returned events.
    pub version: u64,
}

impl<E> LoadedStream<E> {
    pub fn empty() -> Self {
        Self {
            events: Vec::new(),
            version: 0,
        }
    }
}

#[async_trait]
pub trait EventStore<E: Clone + Send + Sync + 'static>: Send + Sync {
    /// Atomically append `new_events` if the stream tail matches `expected_version`.
    /// Returns the new version of the stream.
    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: ExpectedVersion,
        new_events: Vec<Event<E>>,
    ) -> Result<u64, EventStoreError>;

    /// All events of the stream in append order. A stream without history is empty.
    async fn load(&self, stream_id: &StreamId) -> Result<LoadedStream<E>, EventStoreError>;

    /// Events that occurred at or before `until`, in append order.
    async fn load_until(
        &self,
        stream_id: &StreamId,
        until: DateTime<Utc>,
    ) -> Result<LoadedStream<E>, EventStoreError>;

    async fn version(&self, stream_id: &StreamId) -> Result<u64, EventStoreError>;
}

/// Read only feed of committed events for derived caches and projectors.
pub trait EventFeed<E: Clone + Send + Sync + 'static>: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<StoredEvent<E>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
