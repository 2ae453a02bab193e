//! Colors in normalized float and 8-bit pixel form
//!
//! Materials and clear values use [`Color`]; render targets store [`Rgba8`].
//! Converting to 8 bits rounds half away from zero and clamps to `0..=255`.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Normalized RGBA color (each channel nominally in `0.0..=1.0`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub fn from_rgba8(pixel: Rgba8) -> Self {
        Self {
            r: pixel.r as f32 / 255.0,
            g: pixel.g as f32 / 255.0,
            b: pixel.b as f32 / 255.0,
            a: pixel.a as f32 / 255.0,
        }
    }

    pub fn to_rgba8(self) -> Rgba8 {
        Rgba8::new(
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgba8> for Color {
    fn from(pixel: Rgba8) -> Self {
        Self::from_rgba8(pixel)
    }
}

/// `f32::round` rounds half away from zero; NaN saturates to 0 through the cast.
fn channel_to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// One render target pixel, laid out as four bytes in RGBA order.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<Color> for Rgba8 {
    fn from(color: Color) -> Self {
        color.to_rgba8()
    }
}
