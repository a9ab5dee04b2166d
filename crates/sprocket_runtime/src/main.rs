//! Sprocket Engine Runtime
//!
//! Loads settings (first CLI argument, defaults otherwise), installs the
//! log subscriber and runs the headless frame loop.

use anyhow::{Context, Result};
use sprocket_runtime::Engine;
use sprocket_services::Settings;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let settings = match std::env::args().nth(1) {
        Some(path) => {
            Settings::load(&path).with_context(|| format!("loading settings from {path}"))?
        }
        None => Settings::default(),
    };

    // RUST_LOG wins over the configured level.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.runtime.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Sprocket Engine v{}", sprocket_core::VERSION);
    if settings.runtime.max_frames == 0 {
        tracing::warn!("max_frames is 0 and input is scripted; running until interrupted");
    }

    let mut engine = Engine::new(settings).context("creating engine")?;
    engine.setup().context("engine setup")?;
    let frames = engine.run().context("frame loop")?;
    engine.shutdown();

    tracing::info!(frames, "runtime finished");
    Ok(())
}
