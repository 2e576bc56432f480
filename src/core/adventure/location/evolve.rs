use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::location::state::LocationState;

pub fn evolve(mut state: LocationState, event: &AdventureEvent) -> LocationState {
    match event {
        AdventureEvent::LocationDiscoveredV1(e) => {
            state.discovered = true;
            state.name = Some(e.name.clone());
            state.discovered_by = Some(e.discovered_by.clone());
        }
        AdventureEvent::LocationVisitedV1(e) => {
            state.visitors.insert(e.visitor_id.clone());
            state.visit_count += 1;
        }
        _ => {}
    }
    state
}
