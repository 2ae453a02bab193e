//! Rendering backend abstraction
//!
//! Everything the sorter, frame renderer and picker need from a graphics
//! API goes through [`RenderBackend`]. Draws are submitted, not executed:
//! pixel contents are only guaranteed after [`RenderBackend::refresh`].

mod software;

pub use software::SoftwareBackend;

use crate::error::RenderError;
use crate::material::Material;
use glam::{Mat4, UVec2, Vec3};
use prism_core::{CameraView, Color, RenderTargetId};

/// Capability probe result
#[derive(Debug, Clone)]
pub struct DeviceCapabilities {
    pub name: &'static str,
    pub max_target_size: u32,
    /// Whether `read_pixel` round-trips exact 8-bit colors.
    pub exact_readback: bool,
}

/// Indexed triangle list in model space.
#[derive(Debug, Clone, Copy)]
pub struct DrawCall<'a> {
    pub positions: &'a [Vec3],
    /// Three indices per triangle.
    pub indices: &'a [u32],
    pub model: Mat4,
}

pub trait RenderBackend {
    fn capabilities(&self) -> DeviceCapabilities;

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTargetId;

    fn target_size(&self, target: RenderTargetId) -> Option<UVec2>;

    fn set_render_target(&mut self, target: RenderTargetId) -> Result<(), RenderError>;

    fn active_render_target(&self) -> Option<RenderTargetId>;

    /// Clear color and depth of the active target.
    fn clear_render_target(&mut self, color: Color) -> Result<(), RenderError>;

    /// Use `camera`'s view and projection for subsequent draws.
    fn set_view(&mut self, camera: &CameraView);

    fn bind_material(&mut self, material: &Material);

    /// Submit a draw to the active target with the bound material.
    fn draw(&mut self, draw: &DrawCall<'_>) -> Result<(), RenderError>;

    /// Block until all submitted work for `target` has landed in its pixels.
    fn refresh(&mut self, target: RenderTargetId) -> Result<(), RenderError>;

    fn read_pixel(&self, target: RenderTargetId, x: u32, y: u32) -> Result<Color, RenderError>;
}

impl<T: RenderBackend + ?Sized> RenderBackend for &mut T {
    fn capabilities(&self) -> DeviceCapabilities {
        (**self).capabilities()
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTargetId {
        (**self).create_render_target(width, height)
    }

    fn target_size(&self, target: RenderTargetId) -> Option<UVec2> {
        (**self).target_size(target)
    }

    fn set_render_target(&mut self, target: RenderTargetId) -> Result<(), RenderError> {
        (**self).set_render_target(target)
    }

    fn active_render_target(&self) -> Option<RenderTargetId> {
        (**self).active_render_target()
    }

    fn clear_render_target(&mut self, color: Color) -> Result<(), RenderError> {
        (**self).clear_render_target(color)
    }

    fn set_view(&mut self, camera: &CameraView) {
        (**self).set_view(camera)
    }

    fn bind_material(&mut self, material: &Material) {
        (**self).bind_material(material)
    }

    fn draw(&mut self, draw: &DrawCall<'_>) -> Result<(), RenderError> {
        (**self).draw(draw)
    }

    fn refresh(&mut self, target: RenderTargetId) -> Result<(), RenderError> {
        (**self).refresh(target)
    }

    fn read_pixel(&self, target: RenderTargetId, x: u32, y: u32) -> Result<Color, RenderError> {
        (**self).read_pixel(target, x, y)
    }
}
