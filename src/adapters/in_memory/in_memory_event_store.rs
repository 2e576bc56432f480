// In memory implementation of the EventStore port.
//
// Purpose
// - Back the command handler, queries and projectors without a database.
//
// Responsibilities
// - Store events per stream in memory, one lock per stream.
// - Enforce optimistic concurrency by checking the expected version inside the stream lock.
// - Publish every committed event, in commit order, to subscribers.

use crate::core::envelope::{Event, StoredEvent};
use crate::core::ports::{EventFeed, EventStore, EventStoreError, LoadedStream};
use crate::core::stream::{ExpectedVersion, StreamId};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast};
use tracing::debug;

pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 1024;

type StreamLog<E> = Arc<RwLock<Vec<StoredEvent<E>>>>;

pub struct InMemoryEventStore<E: Clone + Send + Sync + 'static> {
    // Only held long enough to find or register a stream log.
    streams: RwLock<HashMap<StreamId, StreamLog<E>>>,
    notifications: broadcast::Sender<StoredEvent<E>>,
    is_offline: bool,
    delay_append_ms: AtomicU64,
}

impl<E: Clone + Send + Sync + 'static> Default for InMemoryEventStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone + Send + Sync + 'static> InMemoryEventStore<E> {
    pub fn new() -> Self {
        Self::with_notification_capacity(DEFAULT_NOTIFICATION_CAPACITY)
    }

    pub fn with_notification_capacity(capacity: usize) -> Self {
        let (notifications, _) = broadcast::channel(capacity.max(1));
        Self {
            streams: RwLock::new(HashMap::new()),
            notifications,
            is_offline: false,
            delay_append_ms: AtomicU64::new(0),
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Sleep before taking the stream lock on append, so concurrent writers can
    /// both load the same version first.
    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::Relaxed);
    }

    /// Streams holding at least one event, ordered by id.
    pub async fn stream_ids(&self) -> Vec<StreamId> {
        let logs: Vec<(StreamId, StreamLog<E>)> = self
            .streams
            .read()
            .await
            .iter()
            .map(|(id, log)| (id.clone(), log.clone()))
            .collect();
        let mut ids = Vec::with_capacity(logs.len());
        for (id, log) in logs {
            if !log.read().await.is_empty() {
                ids.push(id);
            }
        }
        ids.sort();
        ids
    }

    fn ensure_online(&self) -> Result<(), EventStoreError> {
        if self.is_offline {
            return Err(EventStoreError::Backend("Event store offline".into()));
        }
        Ok(())
    }

    async fn existing_log(&self, stream_id: &StreamId) -> Option<StreamLog<E>> {
        self.streams.read().await.get(stream_id).cloned()
    }

    // Only called once the expectation allows a fresh stream, so rejected appends
    // never register a log.
    async fn register_log(&self, stream_id: &StreamId) -> StreamLog<E> {
        self.streams
            .write()
            .await
            .entry(stream_id.clone())
            .or_default()
            .clone()
    }
}

#[async_trait::async_trait]
impl<E> EventStore<E> for InMemoryEventStore<E>
where
    E: Clone + Send + Sync + 'static,
{
    async fn append(
        &self,
        stream_id: &StreamId,
        expected_version: ExpectedVersion,
        new_events: Vec<Event<E>>,
    ) -> Result<u64, EventStoreError> {
        self.ensure_online()?;
        if new_events.is_empty() {
            return Err(EventStoreError::EmptyBatch(stream_id.clone()));
        }

        let delay = self.delay_append_ms.load(Ordering::Relaxed);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let log = match self.existing_log(stream_id).await {
            Some(log) => log,
            None if !expected_version.matches(0) => {
                debug!(%stream_id, expected = %expected_version, actual = 0, "append rejected");
                return Err(EventStoreError::Conflict {
                    stream_id: stream_id.clone(),
                    expected: expected_version,
                    actual: 0,
                });
            }
            None => self.register_log(stream_id).await,
        };
        let mut entries = log.write().await;
        let actual = entries.len() as u64;
        if !expected_version.matches(actual) {
            debug!(%stream_id, expected = %expected_version, actual, "append rejected");
            return Err(EventStoreError::Conflict {
                stream_id: stream_id.clone(),
                expected: expected_version,
                actual,
            });
        }

        let first = entries.len();
        entries.extend(
            new_events
                .into_iter()
                .zip(actual..)
                .map(|(event, sequence)| StoredEvent {
                    stream_id: stream_id.clone(),
                    sequence,
                    event,
                }),
        );
        // Published while the stream lock is held so subscribers see commit order.
        for stored in &entries[first..] {
            let _ = self.notifications.send(stored.clone());
        }

        let version = entries.len() as u64;
        debug!(%stream_id, from = actual, to = version, "events appended");
        Ok(version)
    }

    async fn load(&self, stream_id: &StreamId) -> Result<LoadedStream<E>, EventStoreError> {
        self.ensure_online()?;
        let Some(log) = self.existing_log(stream_id).await else {
            return Ok(LoadedStream::empty());
        };
        let entries = log.read().await;
        Ok(LoadedStream {
            events: entries.clone(),
            version: entries.len() as u64,
        })
    }

    async fn load_until(
        &self,
        stream_id: &StreamId,
        until: DateTime<Utc>,
    ) -> Result<LoadedStream<E>, EventStoreError> {
        self.ensure_online()?;
        let Some(log) = self.existing_log(stream_id).await else {
            return Ok(LoadedStream::empty());
        };
        let entries = log.read().await;
        Ok(LoadedStream {
            events: entries
                .iter()
                .filter(|stored| stored.occurred_at() <= until)
                .cloned()
                .collect(),
            version: entries.len() as u64,
        })
    }

    async fn version(&self, stream_id: &StreamId) -> Result<u64, EventStoreError> {
        self.ensure_online()?;
        match self.existing_log(stream_id).await {
            Some(log) => Ok(log.read().await.len() as u64),
            None => Ok(0),
        }
    }
}

impl<E: Clone + Send + Sync + 'static> EventFeed<E> for InMemoryEventStore<E> {
    fn subscribe(&self) -> broadcast::Receiver<StoredEvent<E>> {
        self.notifications.subscribe()
    }
}
