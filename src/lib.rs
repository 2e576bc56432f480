// Crate entry point. Declares the module tree so the binary and the tests can reach it.
//
// Responsibilities
// - Only declare and expose modules. No engine logic here.

pub mod core {
    pub mod adventure;
    pub mod envelope;
    pub mod fold;
    pub mod ports;
    pub mod stream;
}

pub mod application {
    pub mod errors;
    pub mod command_handlers {
        pub mod adventure_service;
        pub mod command_handler;
    }
    pub mod query_handlers {
        pub mod occupancy_queries;
        pub mod state_queries;
    }
    pub mod projector {
        pub mod repository;
        pub mod runner;
    }
}

pub mod adapters {
    pub mod system_clock;
    pub mod in_memory {
        pub mod in_memory_event_store;
        pub mod in_memory_projections;
        pub mod manual_clock;
    }
}

pub mod shell;

#[cfg(test)]
pub mod test_support {
    pub mod fixtures {
        pub mod events {
            pub mod adventure_events;
            pub mod domain_event;
        }
        pub mod commands {
            pub mod player_commands;
        }
    }
}
