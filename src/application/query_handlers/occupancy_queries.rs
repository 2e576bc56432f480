// Trait for asking the occupancy projection who is where.
//
// Purpose
// - Abstract data access so that different storage backends can implement it.

use crate::core::adventure::projector::model::OccupantRow;
use crate::core::stream::StreamId;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OccupantView {
    pub entity: StreamId,
    pub location_id: String,
}

impl From<OccupantRow> for OccupantView {
    fn from(row: OccupantRow) -> Self {
        Self {
            entity: row.entity,
            location_id: row.location_id,
        }
    }
}

#[async_trait]
pub trait OccupancyQueries: Send + Sync {
    /// Entities currently at `location_id`, ordered by stream id.
    async fn occupants(&self, location_id: &str) -> anyhow::Result<Vec<OccupantView>>;

    async fn location_of(&self, entity: &StreamId) -> anyhow::Result<Option<String>>;
}
