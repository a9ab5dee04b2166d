//! Per-system timing, keyed by system name

use super::ring_buffer::RingBuffer;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Snapshot of one system's timings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTiming {
    pub name: &'static str,
    pub last_ms: f64,
    pub average_ms: f64,
    pub calls: u64,
}

struct Samples {
    window: RingBuffer<Duration>,
    calls: u64,
}

pub struct SystemProfiler {
    window: usize,
    // Names in first-seen order, so reports follow run order.
    order: Vec<&'static str>,
    samples: HashMap<&'static str, Samples>,
}

impl SystemProfiler {
    /// Average over the last `window` calls of each system.
    pub fn new(window: usize) -> Self {
        Self {
            window,
            order: Vec::new(),
            samples: HashMap::new(),
        }
    }

    pub fn time<F, R>(&mut self, name: &'static str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        self.record(name, start.elapsed());
        result
    }

    pub fn record(&mut self, name: &'static str, elapsed: Duration) {
        let window = self.window;
        let entry = self.samples.entry(name).or_insert_with(|| Samples {
            window: RingBuffer::new(window),
            calls: 0,
        });
        if entry.calls == 0 {
            self.order.push(name);
        }
        entry.window.push(elapsed);
        entry.calls += 1;
    }

    pub fn timing(&self, name: &str) -> Option<SystemTiming> {
        let (&key, samples) = self.samples.get_key_value(name)?;
        Some(SystemTiming {
            name: key,
            last_ms: samples.window.latest().unwrap_or_default().as_secs_f64() * 1000.0,
            average_ms: samples.window.average().as_secs_f64() * 1000.0,
            calls: samples.calls,
        })
    }

    /// Every system seen so far, in first-run order.
    pub fn report(&self) -> Vec<SystemTiming> {
        self.order
            .iter()
            .filter_map(|name| self.timing(name))
            .collect()
    }

    pub fn reset(&mut self) {
        self.order.clear();
        self.samples.clear();
    }
}
