// Stream identity and optimistic concurrency expectations.
//
// Purpose
// - Partition events by logical entity with a stable `<category>:<entity-id>` key.
// - Describe what an append expects the stream tail to look like.
//
// Versioning
// - The version of a stream is the number of events it holds, which is also the
//   sequence number the next appended event receives. A fresh stream has version 0.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const PLAYER_CATEGORY: &str = "player";
pub const NPC_CATEGORY: &str = "npc";
pub const LOCATION_CATEGORY: &str = "location";

const SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamIdError {
    #[error("stream id `{0}` is missing the `category:id` separator")]
    MissingSeparator(String),

    #[error("stream id `{0}` has an empty category")]
    EmptyCategory(String),

    #[error("stream id `{0}` has an empty entity id")]
    EmptyEntityId(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StreamId {
    value: String,
    split: usize,
}

impl StreamId {
    pub fn new(category: &str, entity_id: &str) -> Result<Self, StreamIdError> {
        format!("{category}{SEPARATOR}{entity_id}").parse()
    }

    pub fn player(player_id: impl fmt::Display) -> Self {
        Self::unchecked(PLAYER_CATEGORY, &player_id.to_string())
    }

    pub fn npc(npc_id: impl fmt::Display) -> Self {
        Self::unchecked(NPC_CATEGORY, &npc_id.to_string())
    }

    pub fn location(location_id: impl fmt::Display) -> Self {
        Self::unchecked(LOCATION_CATEGORY, &location_id.to_string())
    }

    pub fn category(&self) -> &str {
        &self.value[..self.split]
    }

    pub fn entity_id(&self) -> &str {
        &self.value[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    // Callers pass a known non-empty category; an empty entity id still yields a
    // usable key so that lookups on it simply find no history.
    fn unchecked(category: &str, entity_id: &str) -> Self {
        Self {
            value: format!("{category}{SEPARATOR}{entity_id}"),
            split: category.len(),
        }
    }
}

impl FromStr for StreamId {
    type Err = StreamIdError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let split = raw
            .find(SEPARATOR)
            .ok_or_else(|| StreamIdError::MissingSeparator(raw.to_string()))?;
        if split == 0 {
            return Err(StreamIdError::EmptyCategory(raw.to_string()));
        }
        if split + 1 == raw.len() {
            return Err(StreamIdError::EmptyEntityId(raw.to_string()));
        }
        Ok(Self {
            value: raw.to_string(),
            split,
        })
    }
}

impl TryFrom<String> for StreamId {
    type Error = StreamIdError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<StreamId> for String {
    fn from(stream_id: StreamId) -> Self {
        stream_id.value
    }
}

impl fmt::Display for StreamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// What the caller believes the stream tail to be when appending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedVersion {
    /// The stream must not have any events yet.
    NoStream,
    /// The stream must already hold at least one event.
    StreamExists,
    /// The stream must hold exactly this many events.
    Exact(u64),
    /// Append unconditionally.
    Any,
}

impl ExpectedVersion {
    pub fn matches(&self, current_version: u64) -> bool {
        match self {
            ExpectedVersion::NoStream => current_version == 0,
            ExpectedVersion::StreamExists => current_version > 0,
            ExpectedVersion::Exact(expected) => *expected == current_version,
            ExpectedVersion::Any => true,
        }
    }
}

impl fmt::Display for ExpectedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedVersion::NoStream => f.write_str("no stream"),
            ExpectedVersion::StreamExists => f.write_str("existing stream"),
            ExpectedVersion::Exact(version) => write!(f, "version {version}"),
            ExpectedVersion::Any => f.write_str("any version"),
        }
    }
}
