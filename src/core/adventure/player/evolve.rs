use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::player::state::{PlayerState, RELATIONSHIP_MAX, RELATIONSHIP_MIN};
use crate::core::envelope::StoredEvent;

pub fn evolve(mut state: PlayerState, event: &StoredEvent<AdventureEvent>) -> PlayerState {
    match event.payload() {
        AdventureEvent::PlayerCreatedV1(e) => {
            state.created = true;
            state.name = Some(e.name.clone());
            state.location_id = Some(e.location_id.clone());
            state.health = e.max_health;
            state.max_health = e.max_health;
        }
        AdventureEvent::PlayerMovedV1(e) => {
            state.location_id = Some(e.to_location_id.clone());
        }
        AdventureEvent::PlayerDamagedV1(e) => {
            state.health = state.health.saturating_sub(e.amount);
        }
        AdventureEvent::PlayerHealedV1(e) => {
            state.health = state.health.saturating_add(e.amount).min(state.max_health);
        }
        AdventureEvent::PlayerDefeatedV1(_) => {
            state.health = 0;
            state.defeated = true;
        }
        AdventureEvent::ItemAcquiredV1(e) => {
            state.inventory.insert(e.item_id.clone());
        }
        AdventureEvent::RelationshipChangedV1(e) => {
            let disposition = state.relationships.entry(e.npc_id.clone()).or_insert(0);
            *disposition = disposition
                .saturating_add(e.delta)
                .clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
        }
        _ => return state,
    }
    state.last_event_id = Some(event.event.event_id);
    state
}
