use glam::Vec2;
use sprocket_core::ecs::EntityState;
use sprocket_runtime::components::Transform;
use sprocket_runtime::surface::Color;
use sprocket_runtime::Engine;
use sprocket_services::{InputEvent, Key, ScriptedInput, Settings, SettingsError};

fn small_settings(max_frames: u64) -> Settings {
    let json = serde_json::json!({
        "timing": { "target_fps": 1000 },
        "level": { "columns": 4, "rows": 3 },
        "runtime": { "max_frames": max_frames, "fps_report_interval": 2 }
    });
    Settings::from_json_str(&json.to_string()).unwrap()
}

#[test]
fn headless_run_stops_at_max_frames() {
    let mut engine = Engine::new(small_settings(3)).unwrap();
    engine.setup().unwrap();
    let frames = engine.run().unwrap();
    engine.shutdown();

    assert_eq!(frames, 3);
    assert_eq!(engine.frame(), 3);
    assert!(!engine.is_running());
    assert_eq!(engine.surface().frames_presented(), 3);
    assert_eq!(engine.surface().clear_color(), Some(Color::BACKGROUND));

    // 12 tiles under 2 vehicles.
    let frame = engine.surface().last_frame();
    assert_eq!(frame.len(), 14);
    assert!(frame[..12].iter().all(|call| call.z_index == 0));
    assert!(frame[12..].iter().all(|call| call.z_index == 1));
}

#[test]
fn run_sets_up_on_demand() {
    let mut engine = Engine::new(small_settings(1)).unwrap();
    assert_eq!(engine.run().unwrap(), 1);
    assert_eq!(engine.registry().entity_count(), 14);
    assert_eq!(engine.registry().system_count(), 4);
    assert_eq!(engine.assets().len(), 3);
    assert_eq!(engine.settings().runtime.max_frames, 1);
    assert_eq!(engine.bounds().size(), Vec2::new(800.0, 600.0));
}

#[test]
fn escape_stops_the_loop() {
    let input = ScriptedInput::new().at(3, InputEvent::KeyDown(Key::Escape));
    let mut engine = Engine::new(small_settings(0)).unwrap().with_input(input);
    engine.setup().unwrap();

    assert_eq!(engine.run().unwrap(), 2);
    assert_eq!(engine.surface().frames_presented(), 2);
}

#[test]
fn level_moves_on_the_first_step() {
    let mut engine = Engine::new(small_settings(0)).unwrap();
    engine.setup().unwrap();
    let level = engine.level().unwrap().clone();
    assert_eq!(level.tiles.len(), 12);
    assert_eq!(
        engine.registry().entity_state(level.tank),
        Some(EntityState::Pending)
    );

    engine.step(0.5).unwrap();
    assert_eq!(
        engine.registry().entity_state(level.tank),
        Some(EntityState::Active)
    );
    // Tank starts at (32, 32) with velocity (10, 20).
    assert_eq!(
        engine.registry().get_component::<Transform>(level.tank).unwrap().position,
        Vec2::new(37.0, 42.0)
    );
}

#[test]
fn vehicles_collide_on_the_first_step() {
    let mut engine = Engine::new(small_settings(0)).unwrap();
    engine.setup().unwrap();
    engine.step(0.0).unwrap();
    assert_eq!(engine.collisions(), 1);
}

#[test]
fn kill_queued_between_frames_applies_before_the_next_passes() {
    let mut engine = Engine::new(small_settings(0)).unwrap();
    engine.setup().unwrap();
    engine.step(0.0).unwrap();
    assert_eq!(engine.collisions(), 1);
    let truck = engine.level().unwrap().truck;

    engine.registry_mut().commands().kill(truck);
    assert!(engine.registry().is_alive(truck));

    engine.step(0.0).unwrap();
    assert!(!engine.registry().is_alive(truck));
    // The truck was gone before the collision pass ran.
    assert_eq!(engine.collisions(), 1);
    engine.render().unwrap();
    assert_eq!(engine.surface().last_frame().len(), 13);
}

#[test]
fn invalid_settings_are_rejected() {
    let mut settings = small_settings(1);
    settings.timing.max_delta_seconds = -1.0;
    let err = Engine::new(settings).err().unwrap();
    assert!(matches!(
        err.downcast_ref::<SettingsError>(),
        Some(SettingsError::Invalid { field: "timing.max_delta_seconds", .. })
    ));

    let mut settings = small_settings(1);
    settings.timing.max_delta_seconds = f64::NAN;
    assert!(Engine::new(settings).is_err());
}
