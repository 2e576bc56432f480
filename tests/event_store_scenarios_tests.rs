// End to end scenarios for the in memory event store and state folding.
//
// Covers
// - Reading a stream that was never written.
// - Appending a batch to a fresh stream and reading it back in order.
// - Two writers appending against the same version.
// - Time travel reads that never leak later facts into earlier views.

use adventure_engine::adapters::in_memory::in_memory_event_store::InMemoryEventStore;
use adventure_engine::application::query_handlers::state_queries::StateQueries;
use adventure_engine::core::adventure::event::AdventureEvent;
use adventure_engine::core::adventure::event::v1::player::{
    ItemAcquiredV1, PlayerCreatedV1, PlayerMovedV1,
};
use adventure_engine::core::adventure::player::state::{PlayerState, STARTING_HEALTH};
use adventure_engine::core::envelope::Event;
use adventure_engine::core::fold::replay;
use adventure_engine::core::ports::{EventStore, EventStoreError};
use adventure_engine::core::stream::{ExpectedVersion, StreamId};
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};
use std::sync::Arc;

fn at(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap()
}

fn created(location_id: &str) -> AdventureEvent {
    AdventureEvent::PlayerCreatedV1(PlayerCreatedV1 {
        name: "Aria".into(),
        location_id: location_id.into(),
        max_health: STARTING_HEALTH,
    })
}

fn moved(from: &str, to: &str) -> AdventureEvent {
    AdventureEvent::PlayerMovedV1(PlayerMovedV1 {
        from_location_id: from.into(),
        to_location_id: to.into(),
    })
}

fn acquired(item_id: &str) -> AdventureEvent {
    AdventureEvent::ItemAcquiredV1(ItemAcquiredV1 {
        item_id: item_id.into(),
    })
}

#[fixture]
fn store() -> Arc<InMemoryEventStore<AdventureEvent>> {
    Arc::new(InMemoryEventStore::new())
}

#[rstest]
#[tokio::test]
async fn it_should_read_a_fresh_player_as_the_default_state(
    store: Arc<InMemoryEventStore<AdventureEvent>>,
) {
    let stream = store.load(&StreamId::player("42")).await.unwrap();
    assert!(stream.events.is_empty());
    assert_eq!(stream.version, 0);

    let state: PlayerState = replay(&stream.events);
    assert_eq!(state.health, STARTING_HEALTH);
    assert!(state.relationships.is_empty());
    assert!(!state.created);
}

#[rstest]
#[tokio::test]
async fn it_should_append_to_a_fresh_stream_and_read_in_order(
    store: Arc<InMemoryEventStore<AdventureEvent>>,
) {
    let stream_id = StreamId::player("42");
    let version = store
        .append(
            &stream_id,
            ExpectedVersion::NoStream,
            vec![
                Event::new(created("village"), at(1_000)),
                Event::new(moved("village", "cave"), at(1_001)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(version, 2);

    let stream = store.load(&stream_id).await.unwrap();
    let sequences: Vec<u64> = stream.events.iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, vec![0, 1]);
    assert_eq!(stream.events[0].payload().event_type(), "PlayerCreated");
    assert_eq!(stream.events[1].payload(), &moved("village", "cave"));

    let state: PlayerState = replay(&stream.events);
    assert_eq!(state.location_id.as_deref(), Some("cave"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn it_should_let_only_one_of_two_writers_at_the_same_version_succeed(
    store: Arc<InMemoryEventStore<AdventureEvent>>,
) {
    let stream_id = StreamId::player("42");
    store
        .append(
            &stream_id,
            ExpectedVersion::NoStream,
            vec![Event::new(created("village"), at(1_000))],
        )
        .await
        .unwrap();

    let writer = |to: &'static str| {
        let store = store.clone();
        let stream_id = stream_id.clone();
        tokio::spawn(async move {
            store
                .append(
                    &stream_id,
                    ExpectedVersion::Exact(1),
                    vec![Event::new(moved("village", to), at(2_000))],
                )
                .await
        })
    };
    let (first, second) = tokio::join!(writer("cave"), writer("forest"));
    let results = [first.unwrap(), second.unwrap()];

    let successes: Vec<u64> = results.iter().filter_map(|r| r.clone().ok()).collect();
    assert_eq!(successes, vec![2]);
    let conflict = results.iter().find_map(|r| r.clone().err()).unwrap();
    assert_eq!(
        conflict,
        EventStoreError::Conflict {
            stream_id: stream_id.clone(),
            expected: ExpectedVersion::Exact(1),
            actual: 2,
        }
    );

    let stream = store.load(&stream_id).await.unwrap();
    assert_eq!(stream.events.len(), 2);
    assert_eq!(stream.events[1].sequence, 1);
}

#[rstest]
#[tokio::test]
async fn it_should_never_leak_later_facts_into_an_earlier_view(
    store: Arc<InMemoryEventStore<AdventureEvent>>,
) {
    let stream_id = StreamId::player("42");
    let payloads = [
        created("village"),
        acquired("torch"),
        moved("village", "cave"),
        acquired("rope"),
        moved("cave", "forest"),
    ];
    for (i, payload) in payloads.into_iter().enumerate() {
        store
            .append(
                &stream_id,
                ExpectedVersion::Exact(i as u64),
                vec![Event::new(payload, at(1_000 * (i as i64 + 1)))],
            )
            .await
            .unwrap();
    }
    let queries = StateQueries::<_, AdventureEvent>::new(store.clone());

    let instants: Vec<i64> = (0..=12).map(|n| n * 500).collect();
    for pair in instants.windows(2) {
        let (t1, t2) = (at(pair[0]), at(pair[1]));
        let earlier = store.load_until(&stream_id, t1).await.unwrap();
        let later = store.load_until(&stream_id, t2).await.unwrap();

        assert!(later.events.starts_with(&earlier.events));
        assert!(earlier.events.iter().all(|e| e.occurred_at() <= t1));

        let earlier_view = queries.load_at::<PlayerState>(&stream_id, t1).await.unwrap();
        let later_view = queries.load_at::<PlayerState>(&stream_id, t2).await.unwrap();
        assert!(earlier_view.version <= later_view.version);
        assert!(earlier_view.state.inventory.is_subset(&later_view.state.inventory));
    }
}
