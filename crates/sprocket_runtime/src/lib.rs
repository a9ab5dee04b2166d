//! Sprocket Runtime
//!
//! Game layer on top of the core registry: components, systems, the
//! render surface seam, level setup and the frame loop.

pub mod components;
pub mod engine;
pub mod level;
pub mod surface;
pub mod systems;

pub use engine::Engine;
