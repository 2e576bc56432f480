// Repository traits for the occupancy projection and projector watermark tracking.
//
// Purpose
// - OccupancyRepository: place and remove entities in the read model.
// - WatermarkRepository: track the last applied sequence per projector and stream.

use crate::core::adventure::projector::model::OccupantRow;
use crate::core::stream::StreamId;
use async_trait::async_trait;

#[async_trait]
pub trait OccupancyRepository: Send + Sync {
    async fn place(&self, row: OccupantRow) -> anyhow::Result<()>;
    async fn remove(&self, entity: &StreamId) -> anyhow::Result<()>;
}

#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn get(&self, name: &str, stream_id: &StreamId) -> anyhow::Result<Option<u64>>;
    async fn set(&self, name: &str, stream_id: &StreamId, sequence: u64) -> anyhow::Result<()>;
}
