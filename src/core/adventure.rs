// Adventure domain: the business logic layer that runs on the engine.
//
// Structure
// - event.rs + event/: root event enum and versioned payloads
// - command.rs: commands grouped per entity kind
// - player/, npc/, location/: state, evolve (pure state transitions) and decide (pure decisions)
// - projector/: mapping from events to the location occupancy read model

pub mod command;
pub mod event;
pub mod player {
    pub mod decide;
    pub mod evolve;
    pub mod state;
}
pub mod npc {
    pub mod decide;
    pub mod evolve;
    pub mod state;
}
pub mod location {
    pub mod decide;
    pub mod evolve;
    pub mod state;
}
pub mod projector {
    pub mod apply;
    pub mod model;
}
