use crate::components::{BoxCollider, Transform};
use sprocket_core::ecs::{EcsError, Entity, System, SystemView};
use sprocket_core::events::{CollisionEvent, EventBus};
use sprocket_core::math::Rect;

/// Pairwise AABB test over every collider; one `CollisionEvent` per
/// overlapping pair per pass.
#[derive(Debug, Default)]
pub struct CollisionSystem {
    boxes: Vec<(Entity, Rect)>,
}

impl CollisionSystem {
    pub fn new() -> Self {
        Self::default()
    }
}

/// World-space box of a collider attached at `transform`.
pub(crate) fn world_box(transform: &Transform, collider: &BoxCollider) -> Rect {
    let origin = transform.position + collider.offset * transform.scale;
    let size = glam::Vec2::new(collider.width, collider.height) * transform.scale;
    Rect::from_origin_size(origin, size)
}

impl System for CollisionSystem {
    type Requires = (Transform, BoxCollider);
    type Context<'c> = &'c mut EventBus;

    fn run(&mut self, view: SystemView<'_>, events: &mut EventBus) -> Result<(), EcsError> {
        self.boxes.clear();
        for &entity in view.entities() {
            let rect = world_box(view.get::<Transform>(entity)?, view.get::<BoxCollider>(entity)?);
            self.boxes.push((entity, rect));
        }

        for (i, (a, a_box)) in self.boxes.iter().enumerate() {
            for (b, b_box) in &self.boxes[i + 1..] {
                if a_box.overlaps(b_box) {
                    events.emit(CollisionEvent { a: *a, b: *b });
                }
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "collision"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn world_box_applies_offset_and_scale() {
        let transform = Transform::new(Vec2::new(10.0, 10.0), Vec2::splat(2.0), 0.0);
        let collider = BoxCollider {
            width: 8.0,
            height: 4.0,
            offset: Vec2::new(1.0, 1.0),
        };
        let rect = world_box(&transform, &collider);
        assert_eq!(rect.min, Vec2::new(12.0, 12.0));
        assert_eq!(rect.size(), Vec2::new(16.0, 8.0));
    }
}
