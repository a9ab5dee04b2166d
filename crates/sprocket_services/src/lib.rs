//! Sprocket Services Layer
//!
//! Platform-facing pieces the engine consumes: settings and input.

pub mod input;
pub mod settings;

pub use input::{InputEvent, InputSource, Key, ScriptedInput};
pub use settings::{Settings, SettingsError};
