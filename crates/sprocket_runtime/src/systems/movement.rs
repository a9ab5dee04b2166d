use crate::components::{RigidBody, Transform};
use sprocket_core::ecs::{EcsError, System, SystemView};

/// Integrates velocity into position: `position += velocity * dt`.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    type Requires = (Transform, RigidBody);
    type Context<'c> = f64;

    fn run(&mut self, mut view: SystemView<'_>, dt: f64) -> Result<(), EcsError> {
        let dt = dt as f32;
        for &entity in view.entities() {
            let velocity = view.get::<RigidBody>(entity)?.velocity;
            view.get_mut::<Transform>(entity)?.position += velocity * dt;
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "movement"
    }
}
