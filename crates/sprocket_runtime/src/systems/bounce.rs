use crate::components::{RigidBody, Transform};
use sprocket_core::ecs::{EcsError, System, SystemView};
use sprocket_core::math::Rect;

/// Keeps moving entities inside the world rectangle.
///
/// A position outside the bounds is clamped back onto the edge, and the
/// velocity component pointing further out is reversed. Velocity already
/// heading back inside is left alone so an entity never flips twice.
#[derive(Debug, Default)]
pub struct BounceSystem {
    bounces: u64,
}

impl BounceSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reflections performed since creation.
    pub fn bounces(&self) -> u64 {
        self.bounces
    }
}

impl System for BounceSystem {
    type Requires = (Transform, RigidBody);
    type Context<'c> = Rect;

    fn run(&mut self, mut view: SystemView<'_>, bounds: Rect) -> Result<(), EcsError> {
        for &entity in view.entities() {
            let mut velocity = view.get::<RigidBody>(entity)?.velocity;
            let transform = view.get_mut::<Transform>(entity)?;
            let position = transform.position;

            let mut reflected = false;
            if (position.x < bounds.min.x && velocity.x < 0.0)
                || (position.x > bounds.max.x && velocity.x > 0.0)
            {
                velocity.x = -velocity.x;
                reflected = true;
            }
            if (position.y < bounds.min.y && velocity.y < 0.0)
                || (position.y > bounds.max.y && velocity.y > 0.0)
            {
                velocity.y = -velocity.y;
                reflected = true;
            }
            transform.position = position.clamp(bounds.min, bounds.max);

            if reflected {
                self.bounces += 1;
                view.get_mut::<RigidBody>(entity)?.velocity = velocity;
                tracing::trace!(entity = entity.id(), ?velocity, "bounced");
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "bounce"
    }
}
