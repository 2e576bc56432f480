use crate::core::adventure::event::AdventureEvent;
use crate::core::envelope::StoredEvent;
use crate::core::fold::Evolve;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

pub const STARTING_HEALTH: u32 = 100;
pub const RELATIONSHIP_MIN: i32 = -100;
pub const RELATIONSHIP_MAX: i32 = 100;

/// Current view of one player, folded from the `player:<id>` stream.
///
/// A player that was never created still has a meaningful state: full
/// starting health, no location, no relationships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub created: bool,
    pub name: Option<String>,
    pub health: u32,
    pub max_health: u32,
    pub location_id: Option<String>,
    pub relationships: BTreeMap<String, i32>,
    pub inventory: BTreeSet<String>,
    pub defeated: bool,
    pub last_event_id: Option<Uuid>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            created: false,
            name: None,
            health: STARTING_HEALTH,
            max_health: STARTING_HEALTH,
            location_id: None,
            relationships: BTreeMap::new(),
            inventory: BTreeSet::new(),
            defeated: false,
            last_event_id: None,
        }
    }
}

impl PlayerState {
    pub fn relationship_with(&self, npc_id: &str) -> i32 {
        self.relationships.get(npc_id).copied().unwrap_or(0)
    }
}

impl Evolve<AdventureEvent> for PlayerState {
    fn initial() -> Self {
        Self::default()
    }

    fn evolve(self, event: &StoredEvent<AdventureEvent>) -> Self {
        crate::core::adventure::player::evolve::evolve(self, event)
    }
}
