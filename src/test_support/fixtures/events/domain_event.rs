// Minimal event payload for exercising the store and the command handler
// without any adventure domain rules.

use crate::core::envelope::Event;
use chrono::{DateTime, TimeZone, Utc};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DomainEvent {
    pub name: String,
}

pub fn at(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .expect("fixture timestamps are valid")
}

pub fn domain_event(name: &str, occurred_at_ms: i64) -> Event<DomainEvent> {
    Event::new(
        DomainEvent {
            name: name.to_string(),
        },
        at(occurred_at_ms),
    )
}
