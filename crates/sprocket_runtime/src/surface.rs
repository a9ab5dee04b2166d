//! Render surface seam
//!
//! The render system produces draw calls; a platform backend turns them
//! into pixels. `RecordingSurface` keeps them in memory for headless runs.

use sprocket_asset::TextureHandle;
use sprocket_core::math::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const BACKGROUND: Color = Color::rgb(0x15, 0x15, 0x15);
}

/// Pixel region of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture: TextureHandle,
    pub src: SourceRect,
    /// Destination in world units, already scaled.
    pub dst: Rect,
    pub rotation: f64,
    pub z_index: i32,
}

pub trait RenderSurface {
    fn clear(&mut self, color: Color);

    fn draw_sprite(&mut self, call: &DrawCall);

    fn present(&mut self);
}

/// Headless surface: keeps the draw calls of the frame being built and
/// the last presented one.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    clear_color: Option<Color>,
    pending: Vec<DrawCall>,
    presented: Vec<DrawCall>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw calls of the most recently presented frame, in draw order.
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.presented
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn clear_color(&self) -> Option<Color> {
        self.clear_color
    }
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.clear_color = Some(color);
        self.pending.clear();
    }

    fn draw_sprite(&mut self, call: &DrawCall) {
        self.pending.push(call.clone());
    }

    fn present(&mut self) {
        self.presented = std::mem::take(&mut self.pending);
        self.frames += 1;
    }
}
