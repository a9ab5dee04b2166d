//! Sprocket Engine Core
//!
//! Contains the fundamental simulation pieces:
//! - Entity Component System (ECS) registry with deferred structural changes
//! - Typed per-frame event bus
//! - Frame clock
//! - Math

pub mod ecs;
pub mod events;
pub mod math;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
