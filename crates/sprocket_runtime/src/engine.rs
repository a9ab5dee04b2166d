//! Frame loop
//!
//! `Engine` owns the registry, the asset store, the event bus and the
//! platform seams (input and render surface). Each frame runs
//! `process_input -> update -> render`; the registry flush at the start of
//! `update` is the only point where entities appear or disappear.

use crate::level::{self, Level};
use crate::surface::{Color, RecordingSurface, RenderSurface};
use crate::systems::{BounceSystem, CollisionSystem, MovementSystem, RenderContext, RenderSystem};
use anyhow::{Context, Result};
use glam::Vec2;
use sprocket_asset::AssetStore;
use sprocket_core::ecs::Registry;
use sprocket_core::events::{CollisionEvent, EventBus};
use sprocket_core::math::Rect;
use sprocket_core::time::{FrameClock, FrameTick};
use sprocket_metrics::{FrameTimer, SystemProfiler};
use sprocket_services::{InputSource, ScriptedInput, Settings};
use std::time::Duration;

const TIMING_WINDOW: usize = 120;

pub struct Engine<S: RenderSurface = RecordingSurface> {
    settings: Settings,
    registry: Registry,
    assets: AssetStore,
    events: EventBus,
    clock: FrameClock,
    input: Box<dyn InputSource>,
    surface: S,
    bounds: Rect,
    level: Option<Level>,
    is_running: bool,
    collisions: u64,
    frame_timer: FrameTimer,
    profiler: SystemProfiler,
}

impl Engine<RecordingSurface> {
    /// Headless engine: scripted input with no events, recording surface.
    pub fn new(settings: Settings) -> Result<Self> {
        Self::with_surface(settings, RecordingSurface::new())
    }
}

impl<S: RenderSurface> Engine<S> {
    /// Fails if `settings` does not pass `Settings::validate`.
    pub fn with_surface(settings: Settings, surface: S) -> Result<Self> {
        settings.validate().context("invalid engine settings")?;
        let clock = FrameClock::with_max_delta(
            settings.timing.target_fps,
            Duration::from_secs_f64(settings.timing.max_delta_seconds),
        );
        let bounds = Rect::new(
            Vec2::ZERO,
            Vec2::new(settings.window.width as f32, settings.window.height as f32),
        );
        Ok(Self {
            settings,
            registry: Registry::new(),
            assets: AssetStore::new(),
            events: EventBus::new(),
            clock,
            input: Box::new(ScriptedInput::new()),
            surface,
            bounds,
            level: None,
            is_running: false,
            collisions: 0,
            frame_timer: FrameTimer::new(TIMING_WINDOW),
            profiler: SystemProfiler::new(TIMING_WINDOW),
        })
    }

    pub fn with_input(mut self, input: impl InputSource + 'static) -> Self {
        self.input = Box::new(input);
        self
    }

    /// Register systems and textures and spawn the level.
    pub fn setup(&mut self) -> Result<()> {
        self.registry.add_system(MovementSystem)?;
        self.registry.add_system(BounceSystem::new())?;
        self.registry.add_system(CollisionSystem::new())?;
        self.registry.add_system(RenderSystem::new())?;

        level::register_textures(&mut self.assets, &self.settings.level)
            .context("registering level textures")?;
        let level = level::load_level(&mut self.registry, &self.settings.level)?;
        self.level = Some(level);

        tracing::info!(
            systems = self.registry.system_count(),
            textures = self.assets.len(),
            "engine set up"
        );
        Ok(())
    }

    /// Run frames until input asks to quit or `runtime.max_frames` is
    /// reached. Returns the number of frames run.
    pub fn run(&mut self) -> Result<u64> {
        if self.level.is_none() {
            self.setup()?;
        }
        let max_frames = self.settings.runtime.max_frames;
        let report_every = self.settings.runtime.fps_report_interval;
        let start = self.clock.frame();
        self.is_running = true;
        tracing::info!(target_fps = self.settings.timing.target_fps, max_frames, "running");

        while self.is_running {
            self.frame_timer.begin();
            self.process_input();
            if !self.is_running {
                break;
            }
            let tick = self.update()?;
            self.render()?;
            self.frame_timer.end();

            if sprocket_metrics::ENABLED && report_every > 0 && tick.frame % report_every == 0 {
                let (min_ms, max_ms) = self.frame_timer.frame_time_range_ms();
                tracing::info!(
                    frame = tick.frame,
                    fps = self.frame_timer.fps(),
                    frame_ms = self.frame_timer.frame_time_ms(),
                    min_ms,
                    max_ms,
                    "frame stats"
                );
            }
            if max_frames > 0 && tick.frame - start >= max_frames {
                self.is_running = false;
            }
        }
        Ok(self.clock.frame() - start)
    }

    pub fn process_input(&mut self) {
        for event in self.input.poll() {
            if event.requests_quit() {
                tracing::info!(?event, "quit requested");
                self.is_running = false;
            }
        }
    }

    /// Tick the clock and advance the simulation by the measured delta.
    pub fn update(&mut self) -> Result<FrameTick> {
        let tick = self.clock.tick();
        self.step(tick.delta_seconds)?;
        Ok(tick)
    }

    /// Advance the simulation by `dt` seconds: flush the registry, then run
    /// the movement, bounce and collision passes.
    ///
    /// Entities spawned and commands queued since the previous step are
    /// visible to this step's passes.
    pub fn step(&mut self, dt: f64) -> Result<()> {
        self.registry.update().context("flushing registry")?;

        let bounds = self.bounds;
        self.profiler
            .time("movement", || self.registry.run_system::<MovementSystem>(dt))?;
        self.profiler
            .time("bounce", || self.registry.run_system::<BounceSystem>(bounds))?;
        self.profiler.time("collision", || {
            self.registry.run_system::<CollisionSystem>(&mut self.events)
        })?;

        for CollisionEvent { a, b } in self.events.drain::<CollisionEvent>() {
            self.collisions += 1;
            tracing::debug!(a = a.id(), b = b.id(), "collision");
        }
        Ok(())
    }

    pub fn render(&mut self) -> Result<()> {
        self.surface.clear(Color::BACKGROUND);
        let ctx = RenderContext {
            surface: &mut self.surface,
            assets: &self.assets,
        };
        self.profiler
            .time("render", || self.registry.run_system::<RenderSystem>(ctx))?;
        self.surface.present();
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.is_running = false;
        for timing in self.profiler.report() {
            tracing::info!(
                system = timing.name,
                calls = timing.calls,
                average_ms = timing.average_ms,
                "system timing"
            );
        }
        tracing::info!(
            frames = self.clock.frame(),
            entities = self.registry.entity_count(),
            collisions = self.collisions,
            "shutting down"
        );
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    /// World rectangle the bounce system keeps entities inside.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Collision events seen since creation.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }
}
