// Read model row placing one entity at one location.
//
// Purpose
// - Answer "who is here?" and "where is this entity?" without replaying streams.
//
// Responsibilities
// - Include last_event_id (`stream_id:sequence`) so the row can be traced back to its fact.

use crate::core::stream::StreamId;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupantRow {
    pub entity: StreamId,
    pub location_id: String,
    pub last_event_id: String,
}
