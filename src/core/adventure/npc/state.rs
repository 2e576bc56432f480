use crate::core::adventure::event::AdventureEvent;
use crate::core::envelope::StoredEvent;
use crate::core::fold::Evolve;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NpcProfile {
    pub name: String,
    pub location_id: String,
    pub health: u32,
    pub max_health: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NpcState {
    #[default]
    Unknown,
    Active(NpcProfile),
    Defeated(NpcProfile),
}

impl NpcState {
    pub fn profile(&self) -> Option<&NpcProfile> {
        match self {
            NpcState::Unknown => None,
            NpcState::Active(profile) | NpcState::Defeated(profile) => Some(profile),
        }
    }
}

impl Evolve<AdventureEvent> for NpcState {
    fn initial() -> Self {
        NpcState::Unknown
    }

    fn evolve(self, event: &StoredEvent<AdventureEvent>) -> Self {
        crate::core::adventure::npc::evolve::evolve(self, event.payload())
    }
}
