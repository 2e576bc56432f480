// Composition support for the engine binary.
//
// Responsibilities
// - Read config from the environment.

pub mod config;
