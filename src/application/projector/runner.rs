// Projector runner consumes committed events, translates them into mutations,
// persists them using a repository, and advances the per stream watermark.
//
// Purpose
// - Keep the occupancy read model in step with the player and NPC streams.
// - Apply every event of a stream exactly once and in sequence order, also after
//   redelivery or a lagging subscription.
// - A projector instance is driven by one task at a time.

use crate::application::projector::repository::{OccupancyRepository, WatermarkRepository};
use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::projector::apply::{Mutation, apply};
use crate::core::envelope::StoredEvent;
use crate::core::ports::EventStore;
use crate::core::stream::StreamId;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

pub struct Projector<TRepository, TWatermarkRepository>
where
    TRepository: OccupancyRepository,
    TWatermarkRepository: WatermarkRepository,
{
    pub name: String,
    pub repository: Arc<TRepository>,
    pub watermark_repository: Arc<TWatermarkRepository>,
}

impl<TRepository, TWatermarkRepository> Projector<TRepository, TWatermarkRepository>
where
    TRepository: OccupancyRepository,
    TWatermarkRepository: WatermarkRepository,
{
    pub fn new(
        name: impl Into<String>,
        repository: Arc<TRepository>,
        watermark: Arc<TWatermarkRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            repository,
            watermark_repository: watermark,
        }
    }

    async fn next_sequence(&self, stream_id: &StreamId) -> anyhow::Result<u64> {
        Ok(self
            .watermark_repository
            .get(&self.name, stream_id)
            .await?
            .map_or(0, |last| last + 1))
    }

    /// Apply one event unless it was applied before. Returns whether it was applied.
    pub async fn apply_one(&self, event: &StoredEvent<AdventureEvent>) -> anyhow::Result<bool> {
        if event.sequence < self.next_sequence(&event.stream_id).await? {
            debug!(projector = %self.name, position = %event.position(), "already applied");
            return Ok(false);
        }
        // Events that leave every entity where it was only advance the watermark.
        if event.payload().is_movement() {
            for mutation in apply(event) {
                match mutation {
                    Mutation::Place(row) => self.repository.place(row).await?,
                    Mutation::Remove(entity) => self.repository.remove(&entity).await?,
                }
            }
        }
        self.watermark_repository
            .set(&self.name, &event.stream_id, event.sequence)
            .await?;
        Ok(true)
    }

    /// Apply everything in `stream_id` past the watermark, reading from the store.
    pub async fn catch_up<TEventStore>(
        &self,
        event_store: &TEventStore,
        stream_id: &StreamId,
    ) -> anyhow::Result<usize>
    where
        TEventStore: EventStore<AdventureEvent> + ?Sized,
    {
        let stream = event_store.load(stream_id).await?;
        let mut applied = 0;
        for event in &stream.events {
            if self.apply_one(event).await? {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Apply a notified event, reading the gap from the store when earlier events were missed.
    pub async fn handle<TEventStore>(
        &self,
        event_store: &TEventStore,
        event: &StoredEvent<AdventureEvent>,
    ) -> anyhow::Result<()>
    where
        TEventStore: EventStore<AdventureEvent> + ?Sized,
    {
        let next = self.next_sequence(&event.stream_id).await?;
        if event.sequence > next {
            warn!(
                projector = %self.name,
                stream_id = %event.stream_id,
                expected = next,
                received = event.sequence,
                "gap in notifications, catching up from the store"
            );
            self.catch_up(event_store, &event.stream_id).await?;
            return Ok(());
        }
        self.apply_one(event).await?;
        Ok(())
    }

    /// Consume notifications until the feed closes.
    pub async fn run<TEventStore>(
        &self,
        event_store: &TEventStore,
        mut receiver: broadcast::Receiver<StoredEvent<AdventureEvent>>,
    ) where
        TEventStore: EventStore<AdventureEvent> + ?Sized,
    {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(error) = self.handle(event_store, &event).await {
                        warn!(
                            projector = %self.name,
                            position = %event.position(),
                            error = %error,
                            "failed to project event"
                        );
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(projector = %self.name, skipped, "projector lagged behind the feed");
                }
                Err(RecvError::Closed) => {
                    info!(projector = %self.name, "event feed closed");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod occupancy_projector_runner_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_event_store::InMemoryEventStore;
    use crate::adapters::in_memory::in_memory_projections::InMemoryProjections;
    use crate::application::query_handlers::occupancy_queries::OccupancyQueries;
    use crate::core::adventure::event::v1::player::PlayerHealedV1;
    use crate::core::envelope::Event;
    use crate::core::ports::EventFeed;
    use crate::core::stream::ExpectedVersion;
    use crate::test_support::fixtures::events::adventure_events::{
        npc_spawned, player_created, player_moved, stored_events,
    };
    use crate::test_support::fixtures::events::domain_event::at;
    use rstest::{fixture, rstest};

    type TestProjector = Projector<InMemoryProjections, InMemoryProjections>;

    #[fixture]
    fn before_each() -> (Arc<InMemoryProjections>, TestProjector) {
        let projections = Arc::new(InMemoryProjections::new());
        let projector = Projector::new("occupancy", projections.clone(), projections.clone());
        (projections, projector)
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_apply_mutations_and_advance_the_watermark(
        before_each: (Arc<InMemoryProjections>, TestProjector),
    ) {
        let (projections, projector) = before_each;
        let stream_id = StreamId::player("42");
        let events = stored_events(
            &stream_id,
            1_000,
            vec![player_created("village"), player_moved("village", "cave")],
        );
        for event in &events {
            assert!(projector.apply_one(event).await.unwrap());
        }
        assert_eq!(
            projections.location_of(&stream_id).await.unwrap().as_deref(),
            Some("cave")
        );
        assert_eq!(
            WatermarkRepository::get(projections.as_ref(), "occupancy", &stream_id)
                .await
                .unwrap(),
            Some(1)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_advance_the_watermark_for_events_that_move_nobody(
        before_each: (Arc<InMemoryProjections>, TestProjector),
    ) {
        let (projections, projector) = before_each;
        let stream_id = StreamId::player("42");
        let events = stored_events(
            &stream_id,
            1_000,
            vec![
                player_created("village"),
                AdventureEvent::PlayerHealedV1(PlayerHealedV1 { amount: 5 }),
            ],
        );
        assert!(!events[1].payload().is_movement());
        for event in &events {
            assert!(projector.apply_one(event).await.unwrap());
        }
        assert_eq!(
            projections.location_of(&stream_id).await.unwrap().as_deref(),
            Some("village")
        );
        assert_eq!(
            WatermarkRepository::get(projections.as_ref(), "occupancy", &stream_id)
                .await
                .unwrap(),
            Some(1)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_skip_events_that_were_already_applied(
        before_each: (Arc<InMemoryProjections>, TestProjector),
    ) {
        let (projections, projector) = before_each;
        let stream_id = StreamId::player("42");
        let events = stored_events(
            &stream_id,
            1_000,
            vec![player_created("village"), player_moved("village", "cave")],
        );
        projector.apply_one(&events[0]).await.unwrap();
        projector.apply_one(&events[1]).await.unwrap();
        assert!(!projector.apply_one(&events[0]).await.unwrap());
        assert_eq!(
            projections.location_of(&stream_id).await.unwrap().as_deref(),
            Some("cave")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_catch_up_a_gap_from_the_store(
        before_each: (Arc<InMemoryProjections>, TestProjector),
    ) {
        let (projections, projector) = before_each;
        let store = InMemoryEventStore::<AdventureEvent>::new();
        let stream_id = StreamId::player("42");
        store
            .append(
                &stream_id,
                ExpectedVersion::NoStream,
                vec![
                    Event::new(player_created("village"), at(1)),
                    Event::new(player_moved("village", "cave"), at(2)),
                    Event::new(player_moved("cave", "forest"), at(3)),
                ],
            )
            .await
            .unwrap();
        let stream = store.load(&stream_id).await.unwrap();

        projector.handle(&store, &stream.events[2]).await.unwrap();

        assert_eq!(
            projections.location_of(&stream_id).await.unwrap().as_deref(),
            Some("forest")
        );
        assert_eq!(
            WatermarkRepository::get(projections.as_ref(), "occupancy", &stream_id)
                .await
                .unwrap(),
            Some(2)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_run_until_the_feed_closes(
        before_each: (Arc<InMemoryProjections>, TestProjector),
    ) {
        let (projections, projector) = before_each;
        let store = InMemoryEventStore::<AdventureEvent>::new();
        let receiver = store.subscribe();
        let stream_id = StreamId::npc("grik");
        store
            .append(
                &stream_id,
                ExpectedVersion::NoStream,
                vec![Event::new(npc_spawned("cave", 10), at(1))],
            )
            .await
            .unwrap();
        drop(store);

        projector
            .run(&InMemoryEventStore::<AdventureEvent>::new(), receiver)
            .await;

        let occupants = projections.occupants("cave").await.unwrap();
        assert_eq!(occupants.len(), 1);
        assert_eq!(occupants[0].entity, stream_id);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_repository_is_offline() {
        let mut projections = InMemoryProjections::new();
        projections.toggle_offline();
        let projections = Arc::new(projections);
        let projector = Projector::new("occupancy", projections.clone(), projections);
        let events = stored_events(&StreamId::player("42"), 1_000, vec![player_created("cave")]);
        let result = projector.apply_one(&events[0]).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Watermark repository offline")
        );
    }
}
