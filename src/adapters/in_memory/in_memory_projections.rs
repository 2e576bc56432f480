// In memory occupancy repository, and watermark repository.
//
// Purpose
// - Exercise the occupancy projector without a database.
//
// Responsibilities
// - Store one row per entity, keyed by its stream id.
// - Track the last applied sequence per projector and stream.

use crate::application::projector::repository::{OccupancyRepository, WatermarkRepository};
use crate::application::query_handlers::occupancy_queries::{OccupancyQueries, OccupantView};
use crate::core::adventure::projector::model::OccupantRow;
use crate::core::stream::StreamId;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryProjections {
    rows: RwLock<HashMap<StreamId, OccupantRow>>,
    watermark: RwLock<HashMap<(String, StreamId), u64>>,
    is_offline: bool,
}

impl InMemoryProjections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }
}

#[async_trait::async_trait]
impl OccupancyRepository for InMemoryProjections {
    async fn place(&self, row: OccupantRow) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }

        self.rows.write().await.insert(row.entity.clone(), row);
        Ok(())
    }

    async fn remove(&self, entity: &StreamId) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }

        self.rows.write().await.remove(entity);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatermarkRepository for InMemoryProjections {
    async fn get(&self, name: &str, stream_id: &StreamId) -> anyhow::Result<Option<u64>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }

        Ok(self
            .watermark
            .read()
            .await
            .get(&(name.to_string(), stream_id.clone()))
            .copied())
    }

    async fn set(&self, name: &str, stream_id: &StreamId, sequence: u64) -> anyhow::Result<()> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Watermark repository offline"));
        }

        self.watermark
            .write()
            .await
            .insert((name.to_string(), stream_id.clone()), sequence);
        Ok(())
    }
}

#[async_trait::async_trait]
impl OccupancyQueries for InMemoryProjections {
    async fn occupants(&self, location_id: &str) -> anyhow::Result<Vec<OccupantView>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }

        let guard = self.rows.read().await;
        let mut items: Vec<OccupantRow> = guard
            .values()
            .filter(|row| row.location_id == location_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.entity.as_str().cmp(b.entity.as_str()));
        Ok(items.into_iter().map(OccupantView::from).collect())
    }

    async fn location_of(&self, entity: &StreamId) -> anyhow::Result<Option<String>> {
        if self.is_offline {
            return Err(anyhow::anyhow!("Projections repository offline"));
        }

        Ok(self
            .rows
            .read()
            .await
            .get(entity)
            .map(|row| row.location_id.clone()))
    }
}

#[cfg(test)]
pub mod occupancy_in_memory_projections_tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn row(entity: StreamId, location_id: &str) -> OccupantRow {
        OccupantRow {
            last_event_id: format!("{entity}:0"),
            entity,
            location_id: location_id.to_string(),
        }
    }

    #[fixture]
    fn before_each() -> (OccupantRow, InMemoryProjections) {
        (row(StreamId::player("42"), "cave"), InMemoryProjections::new())
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_place_the_occupant_row_in_the_repository(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (row, repository) = before_each;
        repository
            .place(row.clone())
            .await
            .expect("InMemoryProjections > place failed");

        assert_eq!(repository.rows.read().await.len(), 1);
        assert_eq!(
            repository.rows.read().await.get(&row.entity).unwrap(),
            &row
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_a_single_row_per_entity(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (row_in_cave, repository) = before_each;
        let entity = row_in_cave.entity.clone();
        repository.place(row_in_cave).await.unwrap();
        repository.place(row(entity.clone(), "forest")).await.unwrap();

        assert!(repository.occupants("cave").await.unwrap().is_empty());
        assert_eq!(
            repository.location_of(&entity).await.unwrap(),
            Some("forest".to_string())
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_remove_an_occupant(before_each: (OccupantRow, InMemoryProjections)) {
        let (row, repository) = before_each;
        repository.place(row.clone()).await.unwrap();
        repository.remove(&row.entity).await.unwrap();
        assert_eq!(repository.location_of(&row.entity).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_list_occupants_of_a_location_ordered_by_stream_id(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (player_row, repository) = before_each;
        repository.place(player_row).await.unwrap();
        repository.place(row(StreamId::npc("grik"), "cave")).await.unwrap();
        repository.place(row(StreamId::npc("moss"), "forest")).await.unwrap();

        let occupants = repository.occupants("cave").await.unwrap();
        let entities: Vec<&str> = occupants.iter().map(|o| o.entity.as_str()).collect();
        assert_eq!(entities, vec!["npc:grik", "player:42"]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_set_the_watermark_per_projector_and_stream(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (_, repository) = before_each;
        let stream_id = StreamId::player("42");
        repository.set("occupancy", &stream_id, 3).await.unwrap();

        assert_eq!(repository.get("occupancy", &stream_id).await.unwrap(), Some(3));
        assert_eq!(repository.get("other", &stream_id).await.unwrap(), None);
        assert_eq!(
            repository
                .get("occupancy", &StreamId::player("7"))
                .await
                .unwrap(),
            None
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_projections_repository_is_offline(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (row, mut repository) = before_each;
        repository.toggle_offline();
        let result = repository.place(row).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Projections repository offline")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_to_get_if_the_watermark_repository_is_offline(
        before_each: (OccupantRow, InMemoryProjections),
    ) {
        let (_, mut repository) = before_each;
        repository.toggle_offline();
        let result = repository.get("occupancy", &StreamId::player("42")).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Watermark repository offline")
        );
    }
}
