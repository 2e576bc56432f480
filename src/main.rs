use std::sync::Arc;

use adventure_engine::adapters::in_memory::in_memory_event_store::InMemoryEventStore;
use adventure_engine::adapters::in_memory::in_memory_projections::InMemoryProjections;
use adventure_engine::adapters::system_clock::SystemClock;
use adventure_engine::application::command_handlers::adventure_service::AdventureService;
use adventure_engine::application::errors::ApplicationError;
use adventure_engine::application::projector::runner::Projector;
use adventure_engine::application::query_handlers::occupancy_queries::OccupancyQueries;
use adventure_engine::core::adventure::command::{
    AdventureCommand, LocationCommand, NpcCommand, PlayerCommand,
};
use adventure_engine::core::adventure::event::AdventureEvent;
use adventure_engine::core::envelope::Command;
use adventure_engine::core::ports::{Clock, EventFeed};
use adventure_engine::shell::config::EngineConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = EngineConfig::from_env()?;
    info!(?config, "starting adventure engine");

    let event_store = Arc::new(InMemoryEventStore::<AdventureEvent>::with_notification_capacity(
        config.notification_capacity,
    ));
    let projections = Arc::new(InMemoryProjections::new());
    let projector = Arc::new(Projector::new(
        config.projector_name.clone(),
        projections.clone(),
        projections.clone(),
    ));

    let receiver = event_store.subscribe();
    let runner = {
        let projector = projector.clone();
        let event_store = event_store.clone();
        tokio::spawn(async move { projector.run(event_store.as_ref(), receiver).await })
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let service = AdventureService::new(
        event_store.clone(),
        clock.clone(),
        config.max_command_attempts,
    );

    let command = |entity_id: &str, payload: AdventureCommand| {
        Command::new(entity_id, payload, clock.now())
    };

    service
        .submit(&command(
            "village",
            AdventureCommand::Location(LocationCommand::Discover {
                name: "Millbrook".into(),
                discovered_by: "42".into(),
            }),
        ))
        .await?;
    service
        .submit(&command(
            "42",
            AdventureCommand::Player(PlayerCommand::Create {
                name: "Aria".into(),
                starting_location_id: "village".into(),
            }),
        ))
        .await?;
    service
        .submit(&command(
            "grik",
            AdventureCommand::Npc(NpcCommand::Spawn {
                name: "Grik".into(),
                location_id: "cave".into(),
                health: 30,
            }),
        ))
        .await?;

    let before_the_cave = clock.now();

    service
        .submit(&command(
            "42",
            AdventureCommand::Player(PlayerCommand::Move {
                to_location_id: "cave".into(),
            }),
        ))
        .await?;
    service
        .submit(&command(
            "cave",
            AdventureCommand::Location(LocationCommand::Discover {
                name: "Dripping Cave".into(),
                discovered_by: "42".into(),
            }),
        ))
        .await?;
    service
        .submit(&command(
            "42",
            AdventureCommand::Player(PlayerCommand::TakeDamage {
                amount: 12,
                source: "grik".into(),
            }),
        ))
        .await?;
    service
        .submit(&command(
            "42",
            AdventureCommand::Player(PlayerCommand::AdjustRelationship {
                npc_id: "grik".into(),
                delta: -25,
            }),
        ))
        .await?;

    match service
        .submit(&command(
            "42",
            AdventureCommand::Player(PlayerCommand::Create {
                name: "Aria".into(),
                starting_location_id: "village".into(),
            }),
        ))
        .await
    {
        Err(ApplicationError::Rejected(reason)) => warn!(%reason, "duplicate create rejected"),
        other => warn!(?other, "duplicate create was not rejected"),
    }

    // Notifications are best effort. Stop the runner, then read every stream once
    // more so the view is complete before it is queried.
    runner.abort();
    let _ = runner.await;
    for stream_id in event_store.stream_ids().await {
        projector.catch_up(event_store.as_ref(), &stream_id).await?;
    }

    let player = service.player_state("42").await?;
    info!(version = player.version, state = %serde_json::to_string(&player.state)?, "player:42");
    let earlier = service.player_state_at("42", before_the_cave).await?;
    info!(
        version = earlier.version,
        %before_the_cave,
        state = %serde_json::to_string(&earlier.state)?,
        "player:42 before entering the cave"
    );
    let npc = service.npc_state("grik").await?;
    info!(version = npc.version, state = %serde_json::to_string(&npc.state)?, "npc:grik");
    let cave = service.location_state("cave").await?;
    info!(version = cave.version, state = %serde_json::to_string(&cave.state)?, "location:cave");

    let occupants: Vec<String> = projections
        .occupants("cave")
        .await?
        .into_iter()
        .map(|occupant| occupant.entity.to_string())
        .collect();
    info!(?occupants, "who is in the cave");

    Ok(())
}
