// Shared test fixture for the player Create command.
// Defaults are read from `json/create_player.json`, the transport shape a caller would send.

use crate::core::adventure::command::{AdventureCommand, PlayerCommand};
use crate::core::envelope::Command;
use crate::test_support::fixtures::events::domain_event::at;
use serde::Deserialize;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerDto {
    pub player_id: String,
    pub name: String,
    pub starting_location_id: String,
}

pub struct PlayerCommandBuilder {
    player_id: String,
    name: String,
    starting_location_id: String,
    issued_at_ms: i64,
}

impl Default for PlayerCommandBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl PlayerCommandBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/test_support/fixtures/commands/json/create_player.json")
                .unwrap();
        let dto: CreatePlayerDto = serde_json::from_str(&json_str).unwrap();

        Self {
            player_id: dto.player_id,
            name: dto.name,
            starting_location_id: dto.starting_location_id,
            issued_at_ms: 1_700_000_000_000,
        }
    }

    pub fn player_id(mut self, v: impl Into<String>) -> Self {
        self.player_id = v.into();
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = v.into();
        self
    }

    pub fn starting_location_id(mut self, v: impl Into<String>) -> Self {
        self.starting_location_id = v.into();
        self
    }

    pub fn issued_at_ms(mut self, v: i64) -> Self {
        self.issued_at_ms = v;
        self
    }

    pub fn build(self) -> PlayerCommand {
        PlayerCommand::Create {
            name: self.name,
            starting_location_id: self.starting_location_id,
        }
    }

    pub fn build_command(self) -> Command<AdventureCommand> {
        let player_id = self.player_id.clone();
        let issued_at = at(self.issued_at_ms);
        Command::new(player_id, AdventureCommand::Player(self.build()), issued_at)
    }
}
