// Pure decision function for location commands.

use crate::core::adventure::command::LocationCommand;
use crate::core::adventure::event::AdventureEvent;
use crate::core::adventure::event::v1::location::{LocationDiscoveredV1, LocationVisitedV1};
use crate::core::adventure::location::state::LocationState;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LocationDecideError {
    #[error("location has already been discovered")]
    AlreadyDiscovered,
    #[error("location has not been discovered")]
    NotFound,
    #[error("location name must not be empty")]
    EmptyName,
    #[error("a visitor id is required")]
    MissingVisitor,
}

pub fn decide_location(
    state: &LocationState,
    command: &LocationCommand,
) -> Result<Vec<AdventureEvent>, LocationDecideError> {
    match command {
        LocationCommand::Discover {
            name,
            discovered_by,
        } => {
            if state.discovered {
                return Err(LocationDecideError::AlreadyDiscovered);
            }
            if name.trim().is_empty() {
                return Err(LocationDecideError::EmptyName);
            }
            Ok(vec![AdventureEvent::LocationDiscoveredV1(
                LocationDiscoveredV1 {
                    name: name.trim().to_string(),
                    discovered_by: discovered_by.clone(),
                },
            )])
        }
        LocationCommand::RecordVisit { visitor_id } => {
            if !state.discovered {
                return Err(LocationDecideError::NotFound);
            }
            if visitor_id.trim().is_empty() {
                return Err(LocationDecideError::MissingVisitor);
            }
            Ok(vec![AdventureEvent::LocationVisitedV1(LocationVisitedV1 {
                visitor_id: visitor_id.clone(),
            })])
        }
    }
}
