// Command handler orchestrates the write flow for any stream.
//
// Responsibilities
// - Load past events from the event store and fold them into state.
// - Call the decide function with the freshly folded state.
// - Append new events with optimistic concurrency against the version that was loaded.
// - On a version conflict, start over from a fresh load, up to a bounded number of attempts.

use crate::application::errors::ApplicationError;
use crate::core::envelope::{Event, StoredEvent};
use crate::core::fold::{Evolve, replay};
use crate::core::ports::{Clock, EventStore, EventStoreError};
use crate::core::stream::{ExpectedVersion, StreamId};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct CommandAccepted<E> {
    pub stream_id: StreamId,
    /// Version of the stream right after this command's events.
    pub version: u64,
    pub events: Vec<StoredEvent<E>>,
    pub attempts: u32,
}

pub struct CommandHandler<TEventStore, E>
where
    TEventStore: EventStore<E> + 'static,
    E: Clone + Send + Sync + 'static,
{
    event_store: Arc<TEventStore>,
    clock: Arc<dyn Clock>,
    max_attempts: u32,
    _event: PhantomData<fn() -> E>,
}

impl<TEventStore, E> CommandHandler<TEventStore, E>
where
    TEventStore: EventStore<E> + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn new(event_store: Arc<TEventStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            event_store,
            clock,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            _event: PhantomData,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `decide` against the current state of `stream_id` and store what it returns.
    ///
    /// `decide` is called once per attempt and always sees the state folded from
    /// the latest committed events. An empty decision is accepted without an append.
    pub async fn execute<S, R, F>(
        &self,
        stream_id: &StreamId,
        decide: F,
    ) -> Result<CommandAccepted<E>, ApplicationError<R>>
    where
        S: Evolve<E>,
        R: Send,
        F: Fn(&S) -> Result<Vec<E>, R> + Send + Sync,
    {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let (loaded_version, payloads) = {
                let stream = self
                    .event_store
                    .load(stream_id)
                    .await
                    .map_err(ApplicationError::Store)?;
                let state: S = replay(&stream.events);
                (stream.version, decide(&state).map_err(ApplicationError::Rejected)?)
            };

            if payloads.is_empty() {
                debug!(%stream_id, version = loaded_version, "command produced no events");
                return Ok(CommandAccepted {
                    stream_id: stream_id.clone(),
                    version: loaded_version,
                    events: Vec::new(),
                    attempts: attempt,
                });
            }

            let occurred_at = self.clock.now();
            let events: Vec<Event<E>> = payloads
                .into_iter()
                .map(|payload| Event::new(payload, occurred_at))
                .collect();

            match self
                .event_store
                .append(stream_id, ExpectedVersion::Exact(loaded_version), events.clone())
                .await
            {
                Ok(version) => {
                    info!(%stream_id, version, attempt, count = events.len(), "command accepted");
                    return Ok(CommandAccepted {
                        stream_id: stream_id.clone(),
                        version,
                        events: events
                            .into_iter()
                            .zip(loaded_version..)
                            .map(|(event, sequence)| StoredEvent {
                                stream_id: stream_id.clone(),
                                sequence,
                                event,
                            })
                            .collect(),
                        attempts: attempt,
                    });
                }
                Err(conflict @ EventStoreError::Conflict { .. }) => {
                    if attempt >= self.max_attempts {
                        warn!(%stream_id, attempt, "giving up after repeated version conflicts");
                        return Err(ApplicationError::Conflict {
                            stream_id: stream_id.clone(),
                            attempts: attempt,
                            last: conflict,
                        });
                    }
                    debug!(%stream_id, attempt, error = %conflict, "version conflict, reloading");
                    tokio::task::yield_now().await;
                }
                Err(other) => return Err(ApplicationError::Store(other)),
            }
        }
    }
}
