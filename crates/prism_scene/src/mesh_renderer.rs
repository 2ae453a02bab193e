//! Mesh renderables

use crate::mesh::Mesh;
use glam::{Mat4, Vec3};
use prism_core::{BoundingSphere, Color};
use prism_render::{DrawCall, Material, RenderBackend, RenderError, RenderPriority, Renderable};

/// Draws a [`Mesh`] at a position with a uniform scale and its own material.
#[derive(Debug, Clone)]
pub struct MeshRenderer {
    mesh: Mesh,
    material: Material,
    translation: Vec3,
    scale: f32,
    priority: u32,
    visible: bool,
}

impl MeshRenderer {
    pub fn new(mesh: Mesh, material: Material) -> Self {
        Self {
            mesh,
            material,
            translation: Vec3::ZERO,
            scale: 1.0,
            priority: RenderPriority::Opaque.value(),
            visible: true,
        }
    }

    /// Mesh drawn with a flat material of `color`.
    pub fn flat(mesh: Mesh, color: Color) -> Self {
        Self::new(mesh, Material::flat(color))
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_priority(mut self, priority: impl Into<u32>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Hidden renderers stay in the scene but decline to draw.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation) * Mat4::from_scale(Vec3::splat(self.scale))
    }

    pub fn bounds(&self) -> BoundingSphere {
        BoundingSphere::new(self.translation, self.mesh.bounding_radius() * self.scale.abs())
    }
}

impl Renderable for MeshRenderer {
    fn render_priority(&self) -> u32 {
        self.priority
    }

    fn position(&self) -> Vec3 {
        self.translation
    }

    fn pre_render(&self, _backend: &mut dyn RenderBackend) -> bool {
        self.visible
    }

    fn render(
        &self,
        backend: &mut dyn RenderBackend,
        material: Option<&Material>,
    ) -> Result<(), RenderError> {
        if material.is_none() {
            backend.bind_material(&self.material);
        }
        backend.draw(&DrawCall {
            positions: self.mesh.positions(),
            indices: self.mesh.indices(),
            model: self.model_matrix(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_follow_translation_and_scale() {
        let renderer = MeshRenderer::flat(Mesh::quad(2.0), Color::WHITE)
            .with_translation(Vec3::new(1.0, 2.0, 3.0))
            .with_scale(3.0);
        let bounds = renderer.bounds();
        assert_eq!(bounds.center, Vec3::new(1.0, 2.0, 3.0));
        assert!((bounds.radius - 3.0 * 2f32.sqrt()).abs() < 1e-5);
        assert_eq!(renderer.position(), bounds.center);
    }

    #[test]
    fn priority_defaults_to_opaque() {
        let renderer = MeshRenderer::flat(Mesh::cube(1.0), Color::WHITE);
        assert_eq!(renderer.render_priority(), RenderPriority::Opaque.value());
        let renderer = renderer.with_priority(RenderPriority::Transparent);
        assert_eq!(renderer.render_priority(), RenderPriority::Transparent.value());
    }
}
