//! Frame clock
//!
//! Variable-step timing with a frame-rate cap: each tick waits out the rest
//! of the frame budget (unless the frame is already late) and reports the
//! elapsed time since the previous tick.

use std::time::{Duration, Instant};

/// Default frame-rate cap.
pub const DEFAULT_FPS: u32 = 60;

/// Upper bound for a single delta, so a stall cannot blow up integration.
pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

/// Result of one clock tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTick {
    /// Seconds since the previous tick, clamped to the clock's maximum.
    pub delta_seconds: f64,
    /// Index of this frame, starting at 1.
    pub frame: u64,
}

pub struct FrameClock {
    frame_budget: Duration,
    max_delta: Duration,
    previous: Instant,
    frame: u64,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self::with_max_delta(target_fps, DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(target_fps: u32, max_delta: Duration) -> Self {
        Self {
            frame_budget: frame_budget(target_fps),
            max_delta,
            previous: Instant::now(),
            frame: 0,
        }
    }

    /// Milliseconds allotted to each frame.
    pub fn millisecs_per_frame(&self) -> u128 {
        self.frame_budget.as_millis()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Sleep out the remaining frame budget, then measure the delta.
    pub fn tick(&mut self) -> FrameTick {
        let spent = self.previous.elapsed();
        if let Some(wait) = self.frame_budget.checked_sub(spent) {
            if !wait.is_zero() {
                std::thread::sleep(wait);
            }
        }
        let now = Instant::now();
        let delta = self.advance(now.duration_since(self.previous));
        self.previous = now;
        delta
    }

    /// Account for `elapsed` without sleeping or reading the wall clock.
    pub fn advance(&mut self, elapsed: Duration) -> FrameTick {
        self.frame += 1;
        FrameTick {
            delta_seconds: elapsed.min(self.max_delta).as_secs_f64(),
            frame: self.frame,
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

fn frame_budget(target_fps: u32) -> Duration {
    if target_fps == 0 {
        Duration::ZERO
    } else {
        Duration::from_secs(1) / target_fps
    }
}
