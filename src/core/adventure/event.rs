// Root event enumeration for the adventure streams and the versioned payloads.
//
// Purpose
// - Provide a single type to pattern match in evolve functions and projectors.
//
// Versioning and evolution
// - Prefer additive changes. If a breaking change is needed, add a new version and a new variant.
// - Do not change the meaning of historical events.
// - Entity ids are not repeated in payloads; the stream an event lives in names its entity.

pub mod v1 {
    pub mod location;
    pub mod npc;
    pub mod player;
}

use v1::location::{LocationDiscoveredV1, LocationVisitedV1};
use v1::npc::{NpcDamagedV1, NpcDefeatedV1, NpcMovedV1, NpcSpawnedV1};
use v1::player::{
    ItemAcquiredV1, PlayerCreatedV1, PlayerDamagedV1, PlayerDefeatedV1, PlayerHealedV1,
    PlayerMovedV1, RelationshipChangedV1,
};

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum AdventureEvent {
    PlayerCreatedV1(PlayerCreatedV1),
    PlayerMovedV1(PlayerMovedV1),
    PlayerDamagedV1(PlayerDamagedV1),
    PlayerHealedV1(PlayerHealedV1),
    PlayerDefeatedV1(PlayerDefeatedV1),
    ItemAcquiredV1(ItemAcquiredV1),
    RelationshipChangedV1(RelationshipChangedV1),
    NpcSpawnedV1(NpcSpawnedV1),
    NpcMovedV1(NpcMovedV1),
    NpcDamagedV1(NpcDamagedV1),
    NpcDefeatedV1(NpcDefeatedV1),
    LocationDiscoveredV1(LocationDiscoveredV1),
    LocationVisitedV1(LocationVisitedV1),
}

impl AdventureEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            AdventureEvent::PlayerCreatedV1(_) => "PlayerCreated",
            AdventureEvent::PlayerMovedV1(_) => "PlayerMoved",
            AdventureEvent::PlayerDamagedV1(_) => "PlayerDamaged",
            AdventureEvent::PlayerHealedV1(_) => "PlayerHealed",
            AdventureEvent::PlayerDefeatedV1(_) => "PlayerDefeated",
            AdventureEvent::ItemAcquiredV1(_) => "ItemAcquired",
            AdventureEvent::RelationshipChangedV1(_) => "RelationshipChanged",
            AdventureEvent::NpcSpawnedV1(_) => "NpcSpawned",
            AdventureEvent::NpcMovedV1(_) => "NpcMoved",
            AdventureEvent::NpcDamagedV1(_) => "NpcDamaged",
            AdventureEvent::NpcDefeatedV1(_) => "NpcDefeated",
            AdventureEvent::LocationDiscoveredV1(_) => "LocationDiscovered",
            AdventureEvent::LocationVisitedV1(_) => "LocationVisited",
        }
    }

    /// Events that change where an entity is. The occupancy projector only mutates its view for these.
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            AdventureEvent::PlayerCreatedV1(_)
                | AdventureEvent::PlayerMovedV1(_)
                | AdventureEvent::PlayerDefeatedV1(_)
                | AdventureEvent::NpcSpawnedV1(_)
                | AdventureEvent::NpcMovedV1(_)
                | AdventureEvent::NpcDefeatedV1(_)
        )
    }
}
