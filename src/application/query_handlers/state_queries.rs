// Read side for entity state, rebuilt from the event store on every call.
//
// Purpose
// - Current state of a stream, folded from all of its events.
// - Historical state of a stream as of a point in time (time travel).

use crate::core::fold::{Evolve, replay};
use crate::core::ports::{EventStore, EventStoreError};
use crate::core::stream::StreamId;
use chrono::{DateTime, Utc};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct StateView<S> {
    pub state: S,
    /// Number of events folded into `state`.
    pub version: u64,
}

pub struct StateQueries<TEventStore, E>
where
    TEventStore: EventStore<E> + 'static,
    E: Clone + Send + Sync + 'static,
{
    event_store: Arc<TEventStore>,
    _event: PhantomData<fn() -> E>,
}

impl<TEventStore, E> StateQueries<TEventStore, E>
where
    TEventStore: EventStore<E> + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(event_store: Arc<TEventStore>) -> Self {
        Self {
            event_store,
            _event: PhantomData,
        }
    }

    pub async fn load<S: Evolve<E>>(
        &self,
        stream_id: &StreamId,
    ) -> Result<StateView<S>, EventStoreError> {
        let stream = self.event_store.load(stream_id).await?;
        Ok(StateView {
            state: replay(&stream.events),
            version: stream.version,
        })
    }

    /// State folded from the events that occurred at or before `at`.
    ///
    /// Asking for a moment before the first event yields the initial state at version 0.
    pub async fn load_at<S: Evolve<E>>(
        &self,
        stream_id: &StreamId,
        at: DateTime<Utc>,
    ) -> Result<StateView<S>, EventStoreError> {
        let stream = self.event_store.load_until(stream_id, at).await?;
        let version = stream.events.last().map_or(0, |event| event.sequence + 1);
        debug!(%stream_id, %at, version, tail = stream.version, "state as of");
        Ok(StateView {
            state: replay(&stream.events),
            version,
        })
    }
}
