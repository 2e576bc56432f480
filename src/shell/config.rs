//! Engine configuration

use std::env;

use anyhow::{Context, Result, ensure};

use crate::adapters::in_memory::in_memory_event_store::DEFAULT_NOTIFICATION_CAPACITY;
use crate::application::command_handlers::command_handler::DEFAULT_MAX_ATTEMPTS;

pub const DEFAULT_PROJECTOR_NAME: &str = "location_occupancy";

/// Engine configuration loaded from environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attempts per command before a version conflict is surfaced
    pub max_command_attempts: u32,
    /// Buffered notifications per subscriber before it lags
    pub notification_capacity: usize,
    /// Name under which the occupancy projector keeps its watermarks
    pub projector_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_command_attempts: DEFAULT_MAX_ATTEMPTS,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
            projector_name: DEFAULT_PROJECTOR_NAME.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let max_command_attempts = match lookup("ENGINE_MAX_COMMAND_ATTEMPTS") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("ENGINE_MAX_COMMAND_ATTEMPTS must be a positive integer")?,
            None => defaults.max_command_attempts,
        };
        ensure!(
            max_command_attempts >= 1,
            "ENGINE_MAX_COMMAND_ATTEMPTS must be at least 1"
        );

        let notification_capacity = match lookup("ENGINE_NOTIFICATION_CAPACITY") {
            Some(raw) => raw
                .trim()
                .parse()
                .context("ENGINE_NOTIFICATION_CAPACITY must be a positive integer")?,
            None => defaults.notification_capacity,
        };
        ensure!(
            notification_capacity >= 1,
            "ENGINE_NOTIFICATION_CAPACITY must be at least 1"
        );

        Ok(Self {
            max_command_attempts,
            notification_capacity,
            projector_name: lookup("ENGINE_PROJECTOR_NAME")
                .filter(|name| !name.trim().is_empty())
                .unwrap_or(defaults.projector_name),
        })
    }
}

#[cfg(test)]
mod engine_config_tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[rstest]
    fn it_should_fall_back_to_defaults() {
        let config = EngineConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_command_attempts, 5);
        assert_eq!(config.notification_capacity, 1024);
        assert_eq!(config.projector_name, "location_occupancy");
    }

    #[rstest]
    fn it_should_read_overrides() {
        let config = EngineConfig::from_lookup(lookup(&[
            ("ENGINE_MAX_COMMAND_ATTEMPTS", "3"),
            ("ENGINE_NOTIFICATION_CAPACITY", " 16 "),
            ("ENGINE_PROJECTOR_NAME", "who_is_where"),
        ]))
        .unwrap();
        assert_eq!(config.max_command_attempts, 3);
        assert_eq!(config.notification_capacity, 16);
        assert_eq!(config.projector_name, "who_is_where");
    }

    #[rstest]
    #[case("ENGINE_MAX_COMMAND_ATTEMPTS", "0", "at least 1")]
    #[case("ENGINE_MAX_COMMAND_ATTEMPTS", "many", "positive integer")]
    #[case("ENGINE_NOTIFICATION_CAPACITY", "0", "at least 1")]
    #[case("ENGINE_NOTIFICATION_CAPACITY", "-4", "positive integer")]
    fn it_should_reject_invalid_values(
        #[case] key: &str,
        #[case] value: &str,
        #[case] message: &str,
    ) {
        let result = EngineConfig::from_lookup(lookup(&[(key, value)]));
        assert!(result.unwrap_err().to_string().contains(message));
    }
}
