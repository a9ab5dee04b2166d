//! Game systems

mod bounce;
mod collision;
mod movement;
mod render;

pub use bounce::BounceSystem;
pub use collision::CollisionSystem;
pub use movement::MovementSystem;
pub use render::{RenderContext, RenderSystem};
