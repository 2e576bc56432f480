use crate::core::adventure::event::AdventureEvent;
use crate::core::envelope::StoredEvent;
use crate::core::fold::Evolve;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationState {
    pub discovered: bool,
    pub name: Option<String>,
    pub discovered_by: Option<String>,
    pub visitors: BTreeSet<String>,
    pub visit_count: u64,
}

impl Evolve<AdventureEvent> for LocationState {
    fn initial() -> Self {
        Self::default()
    }

    fn evolve(self, event: &StoredEvent<AdventureEvent>) -> Self {
        crate::core::adventure::location::evolve::evolve(self, event.payload())
    }
}
