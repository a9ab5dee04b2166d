//! Sprocket Asset Store
//!
//! String-keyed texture registry. Decoding image data is the platform
//! layer's job; the store records where each texture comes from and its
//! pixel size, and hands out stable handles that render backends map to
//! their own GPU resources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Texture handle (opaque ID)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TextureHandle(u64);

impl TextureHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// What the store knows about one texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    pub handle: TextureHandle,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset id must not be empty")]
    EmptyId,

    #[error("texture '{id}' has zero size ({width}x{height})")]
    ZeroSize { id: String, width: u32, height: u32 },
}

#[derive(Debug)]
pub struct AssetStore {
    next_id: u64,
    textures: HashMap<String, Texture>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            textures: HashMap::new(),
        }
    }

    /// Register a texture under `id`. Re-registering an id replaces the
    /// entry and issues a fresh handle.
    pub fn add_texture(
        &mut self,
        id: impl Into<String>,
        path: impl AsRef<Path>,
        width: u32,
        height: u32,
    ) -> Result<TextureHandle, AssetError> {
        let id = id.into();
        if id.is_empty() {
            return Err(AssetError::EmptyId);
        }
        if width == 0 || height == 0 {
            return Err(AssetError::ZeroSize { id, width, height });
        }

        let handle = TextureHandle(self.next_id);
        self.next_id += 1;
        let texture = Texture {
            handle,
            path: path.as_ref().to_path_buf(),
            width,
            height,
        };
        tracing::debug!(id = %id, path = %texture.path.display(), width, height, "texture added");
        if self.textures.insert(id.clone(), texture).is_some() {
            tracing::warn!(id = %id, "texture replaced");
        }
        Ok(handle)
    }

    pub fn texture(&self, id: &str) -> Option<&Texture> {
        self.textures.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.textures.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl Default for AssetStore {
    fn default() -> Self {
        Self::new()
    }
}
