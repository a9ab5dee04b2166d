//! Level setup
//!
//! Registers the level's textures and spawns a tile grid plus the two
//! vehicles. Tiles alternate between the first two cells of the tilemap.

use crate::components::{BoxCollider, RigidBody, Sprite, Transform};
use anyhow::{Context, Result};
use glam::Vec2;
use sprocket_asset::AssetStore;
use sprocket_core::ecs::{Entity, Registry};
use sprocket_core::spawn;
use sprocket_services::settings::LevelSettings;

pub const TANK_TEXTURE: &str = "tank-image";
pub const TRUCK_TEXTURE: &str = "truck-image";
pub const TILEMAP_TEXTURE: &str = "tilemap-image";

const TILE_LAYER: i32 = 0;
const VEHICLE_LAYER: i32 = 1;

/// Entities created by [`load_level`].
#[derive(Debug, Clone)]
pub struct Level {
    pub tiles: Vec<Entity>,
    pub tank: Entity,
    pub truck: Entity,
}

pub fn register_textures(assets: &mut AssetStore, settings: &LevelSettings) -> Result<()> {
    assets.add_texture(TANK_TEXTURE, "./assets/images/tank-right.png", 64, 64)?;
    assets.add_texture(TRUCK_TEXTURE, "./assets/images/truck-right.png", 64, 64)?;
    // Tilemap sheet: ten tiles across, three down.
    assets.add_texture(
        TILEMAP_TEXTURE,
        "./assets/tilemaps/jungle.png",
        settings.tile_size * 10,
        settings.tile_size * 3,
    )?;
    Ok(())
}

/// Spawn the level. Entities become visible to systems at the next
/// `Registry::update`.
pub fn load_level(registry: &mut Registry, settings: &LevelSettings) -> Result<Level> {
    let tile_size = settings.tile_size;
    let step = (settings.tile_scale * f64::from(tile_size)) as f32;
    let scale = Vec2::splat(settings.tile_scale as f32);

    let mut tiles = Vec::with_capacity((settings.columns * settings.rows) as usize);
    for y in 0..settings.rows {
        for x in 0..settings.columns {
            let src_x = ((x + y) % 2) * tile_size;
            let tile = spawn!(
                *registry,
                Transform::new(Vec2::new(x as f32 * step, y as f32 * step), scale, 0.0),
                Sprite::new(TILEMAP_TEXTURE, tile_size, tile_size)
                    .with_source(src_x, 0)
                    .with_z_index(TILE_LAYER)
            )
            .with_context(|| format!("spawning tile ({x}, {y})"))?;
            tiles.push(tile);
        }
    }

    let tank = spawn!(
        *registry,
        Transform::new(Vec2::new(32.0, 32.0), Vec2::splat(2.0), 0.0),
        RigidBody::new(10.0, 20.0),
        Sprite::new(TANK_TEXTURE, 64, 64).with_z_index(VEHICLE_LAYER),
        BoxCollider::new(64.0, 64.0)
    )
    .context("spawning tank")?;

    let truck = spawn!(
        *registry,
        Transform::new(Vec2::new(100.0, 130.0), Vec2::ONE, 0.0),
        RigidBody::new(-10.0, 25.0),
        Sprite::new(TRUCK_TEXTURE, 64, 64).with_z_index(VEHICLE_LAYER),
        BoxCollider::new(64.0, 64.0)
    )
    .context("spawning truck")?;

    tracing::info!(tiles = tiles.len(), "level loaded");
    Ok(Level { tiles, tank, truck })
}
