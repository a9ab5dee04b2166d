use crate::ecs::Entity;
use thiserror::Error;

/// Errors raised by the registry.
///
/// Every variant is a misuse of the API by gameplay code. They are reported
/// to the caller rather than papered over with defaults.
#[derive(Debug, Error)]
pub enum EcsError {
    #[error("component type '{component}' has never been registered")]
    UnknownComponentType { component: &'static str },

    #[error("{entity} has no '{component}' component")]
    ComponentNotPresent {
        entity: Entity,
        component: &'static str,
    },

    #[error("{entity} does not exist or has been destroyed")]
    EntityNotFound { entity: Entity },

    #[error("system '{system}' is not registered")]
    SystemNotRegistered { system: &'static str },

    #[error("cannot register component '{component}': signature holds at most {max} types")]
    SignatureCapacityExceeded {
        max: usize,
        component: &'static str,
    },

    #[error("deferred command failed during flush")]
    CommandFailed {
        #[source]
        source: Box<EcsError>,
    },
}
