//! Game components
//!
//! Plain data. The registry stores each type in its own pool; systems read
//! and write them through a `SystemView`.

use glam::Vec2;

/// Placement in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    /// Degrees, clockwise.
    pub rotation: f64,
}

impl Transform {
    pub fn new(position: Vec2, scale: Vec2, rotation: f64) -> Self {
        Self {
            position,
            scale,
            rotation,
        }
    }

    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
        }
    }
}

/// Linear velocity in world units per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RigidBody {
    pub velocity: Vec2,
}

impl RigidBody {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            velocity: Vec2::new(x, y),
        }
    }
}

/// A region of a texture drawn at the entity's transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub asset_id: String,
    pub width: u32,
    pub height: u32,
    pub src_x: u32,
    pub src_y: u32,
    /// Lower values are drawn first.
    pub z_index: i32,
}

impl Sprite {
    pub fn new(asset_id: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            asset_id: asset_id.into(),
            width,
            height,
            src_x: 0,
            src_y: 0,
            z_index: 0,
        }
    }

    pub fn with_source(mut self, src_x: u32, src_y: u32) -> Self {
        self.src_x = src_x;
        self.src_y = src_y;
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// Axis-aligned box relative to the transform position, before scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCollider {
    pub width: f32,
    pub height: f32,
    pub offset: Vec2,
}

impl BoxCollider {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_defaults() {
        let t = Transform::default();
        assert_eq!(t.position, Vec2::ZERO);
        assert_eq!(t.scale, Vec2::ONE);
        assert_eq!(t.rotation, 0.0);
        assert_eq!(Transform::at(Vec2::new(3.0, 4.0)).scale, Vec2::ONE);
    }

    #[test]
    fn sprite_builders() {
        let sprite = Sprite::new("tilemap-image", 32, 32)
            .with_source(64, 32)
            .with_z_index(-1);
        assert_eq!((sprite.src_x, sprite.src_y, sprite.z_index), (64, 32, -1));
    }
}
