use crate::components::{Sprite, Transform};
use crate::surface::{DrawCall, RenderSurface, SourceRect};
use sprocket_asset::AssetStore;
use sprocket_core::ecs::{EcsError, System, SystemView};
use sprocket_core::math::Rect;
use std::collections::HashSet;

pub struct RenderContext<'c> {
    pub surface: &'c mut dyn RenderSurface,
    pub assets: &'c AssetStore,
}

/// Draws every sprite in ascending `z_index`, ties in matched-set order.
///
/// Sprites whose texture is not in the asset store are skipped with one
/// warning per asset id per pass.
#[derive(Debug, Default)]
pub struct RenderSystem {
    calls: Vec<DrawCall>,
    drawn: usize,
    skipped: usize,
}

impl RenderSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites drawn by the last pass.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Sprites skipped by the last pass for lack of a texture.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl System for RenderSystem {
    type Requires = (Transform, Sprite);
    type Context<'c> = RenderContext<'c>;

    fn run(&mut self, view: SystemView<'_>, ctx: RenderContext<'_>) -> Result<(), EcsError> {
        self.calls.clear();
        self.skipped = 0;
        let mut missing: HashSet<&str> = HashSet::new();

        for &entity in view.entities() {
            let sprite = view.get::<Sprite>(entity)?;
            let Some(texture) = ctx.assets.texture(&sprite.asset_id) else {
                self.skipped += 1;
                if missing.insert(sprite.asset_id.as_str()) {
                    tracing::warn!(asset = %sprite.asset_id, "sprite references unknown texture");
                }
                continue;
            };

            let transform = view.get::<Transform>(entity)?;
            let size = glam::Vec2::new(sprite.width as f32, sprite.height as f32) * transform.scale;
            self.calls.push(DrawCall {
                texture: texture.handle,
                src: SourceRect {
                    x: sprite.src_x,
                    y: sprite.src_y,
                    width: sprite.width,
                    height: sprite.height,
                },
                dst: Rect::from_origin_size(transform.position, size),
                rotation: transform.rotation,
                z_index: sprite.z_index,
            });
        }

        // Stable, so equal layers keep matched-set order.
        self.calls.sort_by_key(|call| call.z_index);
        for call in &self.calls {
            ctx.surface.draw_sprite(call);
        }
        self.drawn = self.calls.len();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "render"
    }
}
