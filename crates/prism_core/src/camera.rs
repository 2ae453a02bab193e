//! Camera views
//!
//! A [`CameraView`] is a read-only snapshot of a viewpoint for one frame:
//! where the eye is, how the world is projected, and which off-screen
//! render target the camera draws into.

use crate::frustum::Frustum;
use glam::{Mat4, UVec2, Vec3};

/// Handle to a render target owned by a render backend.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderTargetId(u32);

impl RenderTargetId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u32 {
        self.0
    }
}

/// Active viewpoint for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    /// Eye position in world space.
    pub position: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Off-screen buffer this camera renders and picks into.
    pub render_target: RenderTargetId,
}

impl CameraView {
    pub fn new(
        position: Vec3,
        view: Mat4,
        projection: Mat4,
        render_target: RenderTargetId,
    ) -> Self {
        Self {
            position,
            view,
            projection,
            render_target,
        }
    }

    /// Right-handed camera at `eye` looking at `target`, with an identity projection.
    ///
    /// Chain with [`CameraView::with_perspective`] to get a usable camera.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3, render_target: RenderTargetId) -> Self {
        Self::new(eye, Mat4::look_at_rh(eye, target, up), Mat4::IDENTITY, render_target)
    }

    /// Replace the projection with a right-handed perspective (depth in `0..1`).
    pub fn with_perspective(
        mut self,
        fov_y_radians: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        self.projection = Mat4::perspective_rh(fov_y_radians, aspect, near, far);
        self
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    pub fn frustum(&self) -> Frustum {
        Frustum::from_view_projection(&self.view_projection())
    }

    /// Project a world-space point to normalized device coordinates.
    ///
    /// Returns `None` for points on or behind the eye plane.
    pub fn project_to_ndc(&self, point: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Project a world-space point to a pixel of a `width` x `height` target.
    ///
    /// Pixel rows grow downwards. Returns `None` when the point falls outside
    /// the target or behind the camera.
    pub fn project_to_pixel(&self, point: Vec3, width: u32, height: u32) -> Option<UVec2> {
        let ndc = self.project_to_ndc(point)?;
        let x = (ndc.x + 1.0) * 0.5 * width as f32;
        let y = (1.0 - ndc.y) * 0.5 * height as f32;
        if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
            return None;
        }
        Some(UVec2::new(x as u32, y as u32))
    }
}
