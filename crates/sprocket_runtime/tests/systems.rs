use glam::Vec2;
use sprocket_asset::AssetStore;
use sprocket_core::ecs::{EntityState, Registry};
use sprocket_core::events::{CollisionEvent, EventBus};
use sprocket_core::math::Rect;
use sprocket_core::spawn;
use sprocket_runtime::components::{BoxCollider, RigidBody, Sprite, Transform};
use sprocket_runtime::surface::{RecordingSurface, RenderSurface};
use sprocket_runtime::systems::{
    BounceSystem, CollisionSystem, MovementSystem, RenderContext, RenderSystem,
};

fn world() -> Rect {
    Rect::new(Vec2::ZERO, Vec2::new(800.0, 600.0))
}

#[test]
fn movement_integrates_only_matching_entities() {
    let mut registry = Registry::new();
    registry.add_system(MovementSystem).unwrap();
    let a = spawn!(registry, Transform::default(), RigidBody::new(1.0, 1.0)).unwrap();
    let b = spawn!(registry, Transform::at(Vec2::new(5.0, 5.0))).unwrap();
    registry.update().unwrap();

    registry.run_system::<MovementSystem>(1.0).unwrap();

    assert_eq!(
        registry.get_component::<Transform>(a).unwrap().position,
        Vec2::new(1.0, 1.0)
    );
    assert_eq!(
        registry.get_component::<Transform>(b).unwrap().position,
        Vec2::new(5.0, 5.0)
    );
    assert_eq!(registry.system_entities::<MovementSystem>().unwrap(), &[a]);
}

#[test]
fn bounce_reflects_and_clamps_at_the_edge() {
    let mut registry = Registry::new();
    registry.add_system(MovementSystem).unwrap();
    registry.add_system(BounceSystem::new()).unwrap();
    let e = spawn!(
        registry,
        Transform::at(Vec2::new(795.0, 10.0)),
        RigidBody::new(10.0, -20.0)
    )
    .unwrap();
    registry.update().unwrap();

    registry.run_system::<MovementSystem>(1.0).unwrap();
    registry.run_system::<BounceSystem>(world()).unwrap();

    assert_eq!(
        registry.get_component::<Transform>(e).unwrap().position,
        Vec2::new(800.0, 0.0)
    );
    assert_eq!(
        registry.get_component::<RigidBody>(e).unwrap().velocity,
        Vec2::new(-10.0, 20.0)
    );
    assert_eq!(registry.get_system::<BounceSystem>().unwrap().bounces(), 1);

    // Heading back inside: no second flip.
    registry.run_system::<BounceSystem>(world()).unwrap();
    assert_eq!(
        registry.get_component::<RigidBody>(e).unwrap().velocity,
        Vec2::new(-10.0, 20.0)
    );
}

#[test]
fn collision_emits_one_event_per_overlapping_pair() {
    let mut registry = Registry::new();
    registry.add_system(CollisionSystem::new()).unwrap();
    let a = spawn!(registry, Transform::default(), BoxCollider::new(10.0, 10.0)).unwrap();
    let b = spawn!(
        registry,
        Transform::at(Vec2::new(5.0, 5.0)),
        BoxCollider::new(10.0, 10.0)
    )
    .unwrap();
    let _far = spawn!(
        registry,
        Transform::at(Vec2::new(100.0, 100.0)),
        BoxCollider::new(10.0, 10.0)
    )
    .unwrap();
    registry.update().unwrap();

    let mut events = EventBus::new();
    registry.run_system::<CollisionSystem>(&mut events).unwrap();

    let collisions = events.drain::<CollisionEvent>();
    assert_eq!(collisions, vec![CollisionEvent { a, b }]);
}

#[test]
fn render_draws_in_layer_order_and_skips_unknown_textures() {
    let mut assets = AssetStore::new();
    let ground = assets.add_texture("ground", "ground.png", 32, 32).unwrap();
    let tank = assets.add_texture("tank", "tank.png", 64, 64).unwrap();

    let mut registry = Registry::new();
    registry.add_system(RenderSystem::new()).unwrap();
    let top = spawn!(
        registry,
        Transform::default(),
        Sprite::new("tank", 64, 64).with_z_index(2)
    )
    .unwrap();
    let first_ground =
        spawn!(registry, Transform::default(), Sprite::new("ground", 32, 32)).unwrap();
    let _ghost = spawn!(
        registry,
        Transform::default(),
        Sprite::new("missing", 8, 8).with_z_index(1)
    )
    .unwrap();
    let _ghost_twin = spawn!(registry, Transform::default(), Sprite::new("missing", 8, 8)).unwrap();
    let second_ground = spawn!(
        registry,
        Transform::new(Vec2::new(32.0, 0.0), Vec2::splat(2.0), 0.0),
        Sprite::new("ground", 32, 32).with_source(32, 0)
    )
    .unwrap();
    registry.update().unwrap();

    let mut surface = RecordingSurface::new();
    registry
        .run_system::<RenderSystem>(RenderContext {
            surface: &mut surface,
            assets: &assets,
        })
        .unwrap();
    surface.present();

    let frame = surface.last_frame();
    let textures: Vec<_> = frame.iter().map(|call| call.texture).collect();
    assert_eq!(textures, vec![ground, ground, tank]);
    assert_eq!(frame[1].src.x, 32);
    assert_eq!(frame[1].dst.size(), Vec2::splat(64.0));

    let system = registry.get_system::<RenderSystem>().unwrap();
    assert_eq!((system.drawn(), system.skipped()), (3, 2));

    let matched = registry.system_entities::<RenderSystem>().unwrap();
    let first = matched.iter().position(|&e| e == first_ground).unwrap();
    let second = matched.iter().position(|&e| e == second_ground).unwrap();
    assert!(first < second);
    assert!(matched.contains(&top));
}

#[test]
fn kills_issued_during_a_pass_wait_for_update() {
    struct Culler;

    impl sprocket_core::ecs::System for Culler {
        type Requires = (Transform,);
        type Context<'c> = ();

        fn run(
            &mut self,
            mut view: sprocket_core::ecs::SystemView<'_>,
            _ctx: (),
        ) -> Result<(), sprocket_core::ecs::EcsError> {
            for &entity in view.entities() {
                if view.get::<Transform>(entity)?.position.x < 0.0 {
                    view.commands().kill(entity);
                }
            }
            Ok(())
        }
    }

    let mut registry = Registry::new();
    registry.add_system(Culler).unwrap();
    let offscreen = spawn!(registry, Transform::at(Vec2::new(-1.0, 0.0))).unwrap();
    let onscreen = spawn!(registry, Transform::default()).unwrap();
    registry.update().unwrap();

    registry.run_system::<Culler>(()).unwrap();
    assert_eq!(registry.entity_state(offscreen), Some(EntityState::Active));
    assert_eq!(registry.system_entities::<Culler>().unwrap().len(), 2);

    registry.update().unwrap();
    assert!(!registry.is_alive(offscreen));
    assert_eq!(registry.system_entities::<Culler>().unwrap(), &[onscreen]);
}
