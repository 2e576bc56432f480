use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::npc::state::{NpcProfile, NpcState};

pub fn evolve(state: NpcState, event: &AdventureEvent) -> NpcState {
    match (state, event) {
        (NpcState::Unknown, AdventureEvent::NpcSpawnedV1(e)) => NpcState::Active(NpcProfile {
            name: e.name.clone(),
            location_id: e.location_id.clone(),
            health: e.health,
            max_health: e.health,
        }),
        (NpcState::Active(profile), AdventureEvent::NpcMovedV1(e)) => NpcState::Active(NpcProfile {
            location_id: e.to_location_id.clone(),
            ..profile
        }),
        (NpcState::Active(profile), AdventureEvent::NpcDamagedV1(e)) => {
            NpcState::Active(NpcProfile {
                health: profile.health.saturating_sub(e.amount),
                ..profile
            })
        }
        (NpcState::Active(profile), AdventureEvent::NpcDefeatedV1(_)) => {
            NpcState::Defeated(NpcProfile {
                health: 0,
                ..profile
            })
        }
        (state, _) => state,
    }
}
