//! Entity Component System core types.
//!
//! A registry-centred ECS: entities are plain ids, each component type has
//! its own densely packed pool, and each system type keeps the set of
//! entities whose signature covers its requirements. Entity creation and
//! destruction, plus any structural change requested from inside a system
//! pass, are deferred to `Registry::update`, the once-per-frame flush.

mod commands;
mod component;
mod entity;
mod error;
mod macros;
mod pool;
mod registry;
mod signature;
mod storage;
mod system;

pub use commands::Commands;
pub use component::{Component, ComponentId, ComponentSet, ComponentTypes};
pub use entity::{Entity, EntityId, EntityState};
pub use error::EcsError;
pub use pool::{ErasedPool, Pool};
pub use registry::{EntityMut, FlushReport, Registry};
pub use signature::{Signature, MAX_COMPONENTS};
pub use storage::ComponentStorage;
pub use system::{EntitySet, System, SystemView};
