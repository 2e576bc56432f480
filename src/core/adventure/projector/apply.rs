// Translate a stored adventure event into occupancy read model mutations.
//
// Responsibilities
// - Place entities on creation and movement, remove them once defeated.
// - Return no mutations for events that do not change where anything is.

use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::projector::model::OccupantRow;
use crate::core::envelope::StoredEvent;
use crate::core::stream::StreamId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Place(OccupantRow),
    Remove(StreamId),
}

pub fn apply(event: &StoredEvent<AdventureEvent>) -> Vec<Mutation> {
    let place = |location_id: &str| {
        vec![Mutation::Place(OccupantRow {
            entity: event.stream_id.clone(),
            location_id: location_id.to_string(),
            last_event_id: event.position(),
        })]
    };
    match event.payload() {
        AdventureEvent::PlayerCreatedV1(e) => place(&e.location_id),
        AdventureEvent::PlayerMovedV1(e) => place(&e.to_location_id),
        AdventureEvent::NpcSpawnedV1(e) => place(&e.location_id),
        AdventureEvent::NpcMovedV1(e) => place(&e.to_location_id),
        AdventureEvent::PlayerDefeatedV1(_) | AdventureEvent::NpcDefeatedV1(_) => {
            vec![Mutation::Remove(event.stream_id.clone())]
        }
        _ => Vec::new(),
    }
}
