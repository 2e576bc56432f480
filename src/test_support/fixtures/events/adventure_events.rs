// Shared test fixtures for adventure events.

use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::event::v1::location::LocationDiscoveredV1;
use crate::core::adventure::event::v1::npc::NpcSpawnedV1;
use crate::core::adventure::event::v1::player::{PlayerCreatedV1, PlayerMovedV1};
use crate::core::adventure::player::state::STARTING_HEALTH;
use crate::core::envelope::{Event, StoredEvent};
use crate::core::stream::StreamId;
use crate::test_support::fixtures::events::domain_event::at;

pub fn player_created(location_id: &str) -> AdventureEvent {
    AdventureEvent::PlayerCreatedV1(PlayerCreatedV1 {
        name: "Aria".to_string(),
        location_id: location_id.to_string(),
        max_health: STARTING_HEALTH,
    })
}

pub fn player_moved(from: &str, to: &str) -> AdventureEvent {
    AdventureEvent::PlayerMovedV1(PlayerMovedV1 {
        from_location_id: from.to_string(),
        to_location_id: to.to_string(),
    })
}

pub fn npc_spawned(location_id: &str, health: u32) -> AdventureEvent {
    AdventureEvent::NpcSpawnedV1(NpcSpawnedV1 {
        name: "Grik".to_string(),
        location_id: location_id.to_string(),
        health,
    })
}

pub fn location_discovered(name: &str, discovered_by: &str) -> AdventureEvent {
    AdventureEvent::LocationDiscoveredV1(LocationDiscoveredV1 {
        name: name.to_string(),
        discovered_by: discovered_by.to_string(),
    })
}

/// Stored events for `stream_id`, numbered from 0, one millisecond apart from `start_ms`.
pub fn stored_events(
    stream_id: &StreamId,
    start_ms: i64,
    payloads: Vec<AdventureEvent>,
) -> Vec<StoredEvent<AdventureEvent>> {
    payloads
        .into_iter()
        .zip(0u64..)
        .map(|(payload, sequence)| StoredEvent {
            stream_id: stream_id.clone(),
            sequence,
            event: Event::new(payload, at(start_ms + sequence as i64)),
        })
        .collect()
}
