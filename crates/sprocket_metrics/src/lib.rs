//! Sprocket Metrics - frame and per-system timing
//!
//! Instrumentation for the frame loop. Without the `metrics` feature every
//! type here is a zero-sized stub and all calls compile away.
//!
//! # Usage
//!
//! ```ignore
//! use sprocket_metrics::{FrameTimer, SystemProfiler};
//!
//! let mut timer = FrameTimer::new(120);
//! let mut profiler = SystemProfiler::new(120);
//! timer.begin();
//! profiler.time("movement", || run_movement());
//! timer.end();
//! println!("FPS: {:.1}", timer.fps());
//! ```

#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod ring_buffer;
#[cfg(feature = "metrics")]
mod system_profiler;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;
#[cfg(feature = "metrics")]
pub use system_profiler::{SystemProfiler, SystemTiming};

/// Whether this build collects metrics.
pub const ENABLED: bool = cfg!(feature = "metrics");

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn begin(&mut self) {}
    pub fn end(&mut self) {}
    pub fn frames(&self) -> u64 { 0 }
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
}

#[cfg(not(feature = "metrics"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTiming {
    pub name: &'static str,
    pub last_ms: f64,
    pub average_ms: f64,
    pub calls: u64,
}

#[cfg(not(feature = "metrics"))]
pub struct SystemProfiler;

#[cfg(not(feature = "metrics"))]
impl SystemProfiler {
    pub fn new(_window: usize) -> Self { Self }
    pub fn time<F, R>(&mut self, _name: &'static str, f: F) -> R where F: FnOnce() -> R { f() }
    pub fn timing(&self, _name: &str) -> Option<SystemTiming> { None }
    pub fn report(&self) -> Vec<SystemTiming> { Vec::new() }
    pub fn reset(&mut self) {}
}

#[cfg(test)]
mod tests {
    #[test]
    fn api_is_available_in_every_build() {
        let mut timer = super::FrameTimer::new(60);
        timer.begin();
        timer.end();
        let mut profiler = super::SystemProfiler::new(60);
        let value = profiler.time("noop", || 7);
        assert_eq!(value, 7);
        assert!(timer.fps() >= 0.0);
    }
}
