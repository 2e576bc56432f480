// Commands accepted by the adventure streams, grouped per entity kind.
//
// Routing
// - The outer variant decides the stream category, the command's entity id names the entity.
// - Each inner enum is handled by exactly one decide function with an exhaustive match.

use crate::core::stream::StreamId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "entity", content = "command")]
pub enum AdventureCommand {
    Player(PlayerCommand),
    Npc(NpcCommand),
    Location(LocationCommand),
}

impl AdventureCommand {
    pub fn stream_id(&self, entity_id: &str) -> StreamId {
        match self {
            AdventureCommand::Player(_) => StreamId::player(entity_id),
            AdventureCommand::Npc(_) => StreamId::npc(entity_id),
            AdventureCommand::Location(_) => StreamId::location(entity_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    Create {
        name: String,
        starting_location_id: String,
    },
    Move {
        to_location_id: String,
    },
    TakeDamage {
        amount: u32,
        source: String,
    },
    Heal {
        amount: u32,
    },
    AdjustRelationship {
        npc_id: String,
        delta: i32,
    },
    AcquireItem {
        item_id: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NpcCommand {
    Spawn {
        name: String,
        location_id: String,
        health: u32,
    },
    Move {
        to_location_id: String,
    },
    TakeDamage {
        amount: u32,
        source: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum LocationCommand {
    Discover { name: String, discovered_by: String },
    RecordVisit { visitor_id: String },
}
