use crate::core::ports::EventStoreError;
use crate::core::stream::StreamId;
use thiserror::Error;

/// Outcome of a command that did not lead to new events being stored.
///
/// Each kind maps to a distinct response at the edge: `Rejected` is a
/// validation failure the caller can fix, `Conflict` means the entity kept
/// changing underneath the command, `Store` is an infrastructure failure.
#[derive(Debug, Error, PartialEq)]
pub enum ApplicationError<R> {
    #[error("command rejected: {0}")]
    Rejected(R),

    #[error("gave up on {stream_id} after {attempts} conflicting attempts")]
    Conflict {
        stream_id: StreamId,
        attempts: u32,
        #[source]
        last: EventStoreError,
    },

    #[error(transparent)]
    Store(EventStoreError),
}

impl<R> ApplicationError<R> {
    pub fn map_rejection<T>(self, f: impl FnOnce(R) -> T) -> ApplicationError<T> {
        match self {
            ApplicationError::Rejected(reason) => ApplicationError::Rejected(f(reason)),
            ApplicationError::Conflict {
                stream_id,
                attempts,
                last,
            } => ApplicationError::Conflict {
                stream_id,
                attempts,
                last,
            },
            ApplicationError::Store(error) => ApplicationError::Store(error),
        }
    }
}
