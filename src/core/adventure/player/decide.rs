// Pure decision function for player commands.
//
// Responsibilities
// - Validate the command against the current player state and produce events on success.
// - Clamp damage, healing and relationship changes so that the events describe what actually happened.
// - Never perform input or output.

use crate::core::adventure::command::PlayerCommand;
use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::event::v1::player::{
    ItemAcquiredV1, PlayerCreatedV1, PlayerDamagedV1, PlayerDefeatedV1, PlayerHealedV1,
    PlayerMovedV1, RelationshipChangedV1,
};
use crate::core::adventure::player::state::{
    PlayerState, RELATIONSHIP_MAX, RELATIONSHIP_MIN, STARTING_HEALTH,
};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PlayerDecideError {
    #[error("player already exists")]
    AlreadyExists,
    #[error("player does not exist")]
    NotFound,
    #[error("player has been defeated")]
    Defeated,
    #[error("player name must not be empty")]
    EmptyName,
    #[error("a location id is required")]
    MissingLocation,
    #[error("amount must be greater than zero")]
    InvalidAmount,
    #[error("player is already at {0}")]
    AlreadyThere(String),
    #[error("player already holds {0}")]
    AlreadyHeld(String),
    #[error("player is already at full health")]
    NothingToHeal,
    #[error("relationship with {0} is already at its limit")]
    RelationshipUnchanged(String),
}

fn ensure_active(state: &PlayerState) -> Result<(), PlayerDecideError> {
    if !state.created {
        return Err(PlayerDecideError::NotFound);
    }
    if state.defeated {
        return Err(PlayerDecideError::Defeated);
    }
    Ok(())
}

pub fn decide_player(
    state: &PlayerState,
    command: &PlayerCommand,
) -> Result<Vec<AdventureEvent>, PlayerDecideError> {
    match command {
        PlayerCommand::Create {
            name,
            starting_location_id,
        } => {
            if state.created {
                return Err(PlayerDecideError::AlreadyExists);
            }
            if name.trim().is_empty() {
                return Err(PlayerDecideError::EmptyName);
            }
            if starting_location_id.trim().is_empty() {
                return Err(PlayerDecideError::MissingLocation);
            }
            Ok(vec![AdventureEvent::PlayerCreatedV1(PlayerCreatedV1 {
                name: name.trim().to_string(),
                location_id: starting_location_id.clone(),
                max_health: STARTING_HEALTH,
            })])
        }
        PlayerCommand::Move { to_location_id } => {
            ensure_active(state)?;
            if to_location_id.trim().is_empty() {
                return Err(PlayerDecideError::MissingLocation);
            }
            let from_location_id = state.location_id.clone().unwrap_or_default();
            if &from_location_id == to_location_id {
                return Err(PlayerDecideError::AlreadyThere(to_location_id.clone()));
            }
            Ok(vec![AdventureEvent::PlayerMovedV1(PlayerMovedV1 {
                from_location_id,
                to_location_id: to_location_id.clone(),
            })])
        }
        PlayerCommand::TakeDamage { amount, source } => {
            ensure_active(state)?;
            if *amount == 0 {
                return Err(PlayerDecideError::InvalidAmount);
            }
            let dealt = (*amount).min(state.health);
            let mut events = vec![AdventureEvent::PlayerDamagedV1(PlayerDamagedV1 {
                amount: dealt,
                source: source.clone(),
            })];
            if dealt == state.health {
                events.push(AdventureEvent::PlayerDefeatedV1(PlayerDefeatedV1 {
                    cause: source.clone(),
                }));
            }
            Ok(events)
        }
        PlayerCommand::Heal { amount } => {
            ensure_active(state)?;
            if *amount == 0 {
                return Err(PlayerDecideError::InvalidAmount);
            }
            let room = state.max_health.saturating_sub(state.health);
            if room == 0 {
                return Err(PlayerDecideError::NothingToHeal);
            }
            Ok(vec![AdventureEvent::PlayerHealedV1(PlayerHealedV1 {
                amount: (*amount).min(room),
            })])
        }
        PlayerCommand::AdjustRelationship { npc_id, delta } => {
            ensure_active(state)?;
            if *delta == 0 {
                return Err(PlayerDecideError::InvalidAmount);
            }
            let current = state.relationship_with(npc_id);
            let target = current
                .saturating_add(*delta)
                .clamp(RELATIONSHIP_MIN, RELATIONSHIP_MAX);
            if target == current {
                return Err(PlayerDecideError::RelationshipUnchanged(npc_id.clone()));
            }
            Ok(vec![AdventureEvent::RelationshipChangedV1(
                RelationshipChangedV1 {
                    npc_id: npc_id.clone(),
                    delta: target - current,
                },
            )])
        }
        PlayerCommand::AcquireItem { item_id } => {
            ensure_active(state)?;
            if state.inventory.contains(item_id) {
                return Err(PlayerDecideError::AlreadyHeld(item_id.clone()));
            }
            Ok(vec![AdventureEvent::ItemAcquiredV1(ItemAcquiredV1 {
                item_id: item_id.clone(),
            })])
        }
    }
}
