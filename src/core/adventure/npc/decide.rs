// Pure decision function for NPC commands.

use crate::core::adventure::command::NpcCommand;
use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::event::v1::npc::{
    NpcDamagedV1, NpcDefeatedV1, NpcMovedV1, NpcSpawnedV1,
};
use crate::core::adventure::npc::state::{NpcProfile, NpcState};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum NpcDecideError {
    #[error("npc already exists")]
    AlreadyExists,
    #[error("npc does not exist")]
    NotFound,
    #[error("npc has been defeated")]
    Defeated,
    #[error("npc name must not be empty")]
    EmptyName,
    #[error("a location id is required")]
    MissingLocation,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("npc is already at {0}")]
    AlreadyThere(String),
}

fn active(state: &NpcState) -> Result<&NpcProfile, NpcDecideError> {
    match state {
        NpcState::Unknown => Err(NpcDecideError::NotFound),
        NpcState::Defeated(_) => Err(NpcDecideError::Defeated),
        NpcState::Active(profile) => Ok(profile),
    }
}

pub fn decide_npc(
    state: &NpcState,
    command: &NpcCommand,
) -> Result<Vec<AdventureEvent>, NpcDecideError> {
    match command {
        NpcCommand::Spawn {
            name,
            location_id,
            health,
        } => {
            if !matches!(state, NpcState::Unknown) {
                return Err(NpcDecideError::AlreadyExists);
            }
            if name.trim().is_empty() {
                return Err(NpcDecideError::EmptyName);
            }
            if location_id.trim().is_empty() {
                return Err(NpcDecideError::MissingLocation);
            }
            if *health == 0 {
                return Err(NpcDecideError::InvalidAmount);
            }
            Ok(vec![AdventureEvent::NpcSpawnedV1(NpcSpawnedV1 {
                name: name.trim().to_string(),
                location_id: location_id.clone(),
                health: *health,
            })])
        }
        NpcCommand::Move { to_location_id } => {
            let profile = active(state)?;
            if to_location_id.trim().is_empty() {
                return Err(NpcDecideError::MissingLocation);
            }
            if &profile.location_id == to_location_id {
                return Err(NpcDecideError::AlreadyThere(to_location_id.clone()));
            }
            Ok(vec![AdventureEvent::NpcMovedV1(NpcMovedV1 {
                from_location_id: profile.location_id.clone(),
                to_location_id: to_location_id.clone(),
            })])
        }
        NpcCommand::TakeDamage { amount, source } => {
            let profile = active(state)?;
            if *amount == 0 {
                return Err(NpcDecideError::InvalidAmount);
            }
            let dealt = (*amount).min(profile.health);
            let mut events = vec![AdventureEvent::NpcDamagedV1(NpcDamagedV1 {
                amount: dealt,
                source: source.clone(),
            })];
            if dealt == profile.health {
                events.push(AdventureEvent::NpcDefeatedV1(NpcDefeatedV1 {
                    defeated_by: source.clone(),
                }));
            }
            Ok(events)
        }
    }
}
