// Adventure service routes commands to their stream and decide function.
//
// Responsibilities
// - Derive the stream from the command's entity kind and entity id.
// - Pick the state shape and decide function for that entity kind with an exhaustive match.
// - Expose current and historical state of players, NPCs and locations.

use crate::application::command_handlers::command_handler::{CommandAccepted, CommandHandler};
use crate::application::errors::ApplicationError;
use crate::application::query_handlers::state_queries::{StateQueries, StateView};
use crate::core::adventure::command::AdventureCommand;
use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::location::decide::{LocationDecideError, decide_location};
use crate::core::adventure::location::state::LocationState;
use crate::core::adventure::npc::decide::{NpcDecideError, decide_npc};
use crate::core::adventure::npc::state::NpcState;
use crate::core::adventure::player::decide::{PlayerDecideError, decide_player};
use crate::core::adventure::player::state::PlayerState;
use crate::core::envelope::Command;
use crate::core::ports::{Clock, EventStore, EventStoreError};
use crate::core::stream::StreamId;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdventureRejection {
    #[error(transparent)]
    Player(#[from] PlayerDecideError),
    #[error(transparent)]
    Npc(#[from] NpcDecideError),
    #[error(transparent)]
    Location(#[from] LocationDecideError),
}

pub type SubmitResult =
    Result<CommandAccepted<AdventureEvent>, ApplicationError<AdventureRejection>>;

pub struct AdventureService<TEventStore>
where
    TEventStore: EventStore<AdventureEvent> + 'static,
{
    handler: CommandHandler<TEventStore, AdventureEvent>,
    queries: StateQueries<TEventStore, AdventureEvent>,
}

impl<TEventStore> AdventureService<TEventStore>
where
    TEventStore: EventStore<AdventureEvent> + 'static,
{
    pub fn new(event_store: Arc<TEventStore>, clock: Arc<dyn Clock>, max_attempts: u32) -> Self {
        Self {
            handler: CommandHandler::new(event_store.clone(), clock).with_max_attempts(max_attempts),
            queries: StateQueries::new(event_store),
        }
    }

    pub async fn submit(&self, command: &Command<AdventureCommand>) -> SubmitResult {
        let stream_id = command.payload.stream_id(&command.entity_id);
        info!(command_id = %command.command_id, %stream_id, "submitting command");
        let result = match &command.payload {
            AdventureCommand::Player(player_command) => self
                .handler
                .execute::<PlayerState, _, _>(&stream_id, |state| {
                    decide_player(state, player_command)
                })
                .await
                .map_err(|e| e.map_rejection(AdventureRejection::from)),
            AdventureCommand::Npc(npc_command) => self
                .handler
                .execute::<NpcState, _, _>(&stream_id, |state| decide_npc(state, npc_command))
                .await
                .map_err(|e| e.map_rejection(AdventureRejection::from)),
            AdventureCommand::Location(location_command) => self
                .handler
                .execute::<LocationState, _, _>(&stream_id, |state| {
                    decide_location(state, location_command)
                })
                .await
                .map_err(|e| e.map_rejection(AdventureRejection::from)),
        };
        if let Err(error) = &result {
            info!(command_id = %command.command_id, %stream_id, %error, "command not applied");
        }
        result
    }

    pub async fn player_state(
        &self,
        player_id: &str,
    ) -> Result<StateView<PlayerState>, EventStoreError> {
        self.queries.load(&StreamId::player(player_id)).await
    }

    pub async fn player_state_at(
        &self,
        player_id: &str,
        at: DateTime<Utc>,
    ) -> Result<StateView<PlayerState>, EventStoreError> {
        self.queries.load_at(&StreamId::player(player_id), at).await
    }

    pub async fn npc_state(&self, npc_id: &str) -> Result<StateView<NpcState>, EventStoreError> {
        self.queries.load(&StreamId::npc(npc_id)).await
    }

    pub async fn npc_state_at(
        &self,
        npc_id: &str,
        at: DateTime<Utc>,
    ) -> Result<StateView<NpcState>, EventStoreError> {
        self.queries.load_at(&StreamId::npc(npc_id), at).await
    }

    pub async fn location_state(
        &self,
        location_id: &str,
    ) -> Result<StateView<LocationState>, EventStoreError> {
        self.queries.load(&StreamId::location(location_id)).await
    }
}
