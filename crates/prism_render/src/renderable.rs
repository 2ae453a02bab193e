//! Renderable capability and the per-frame entries that borrow it.

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::material::Material;
use crate::priority::RenderPriority;
use glam::Vec3;
use std::fmt;

/// Stable identifier of a scene object, assigned by the scene.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

impl ObjectId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Something that can be drawn through a [`RenderBackend`].
///
/// Draws follow `pre_render` → `render` → `post_render`. Returning `false`
/// from `pre_render` cancels `render` and `post_render` for that draw.
pub trait Renderable {
    /// Draw-order tier; lower values draw earlier. See [`RenderPriority`].
    fn render_priority(&self) -> u32 {
        RenderPriority::Opaque.value()
    }

    /// World position used for distance sub-ordering within a tier.
    fn position(&self) -> Vec3;

    fn pre_render(&self, _backend: &mut dyn RenderBackend) -> bool {
        true
    }

    /// Issue draw calls. With `material` set, the caller has already bound it
    /// and the renderable must not bind its own.
    fn render(
        &self,
        backend: &mut dyn RenderBackend,
        material: Option<&Material>,
    ) -> Result<(), RenderError>;

    fn post_render(&self, _backend: &mut dyn RenderBackend) {}
}

/// A renderable borrowed from the scene for the duration of one sort or pick.
#[derive(Clone, Copy)]
pub struct RenderableEntry<'a> {
    pub id: ObjectId,
    pub renderable: &'a dyn Renderable,
}

impl<'a> RenderableEntry<'a> {
    pub fn new(id: ObjectId, renderable: &'a dyn Renderable) -> Self {
        Self { id, renderable }
    }

    pub fn priority(&self) -> u32 {
        self.renderable.render_priority()
    }

    pub fn distance_squared(&self, eye: Vec3) -> f32 {
        self.renderable.position().distance_squared(eye)
    }
}

impl fmt::Debug for RenderableEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderableEntry")
            .field("id", &self.id)
            .field("priority", &self.priority())
            .field("position", &self.renderable.position())
            .finish()
    }
}

/// A scene object that passed visibility culling, with or without a renderable.
#[derive(Clone, Copy)]
pub struct VisibleEntry<'a> {
    pub id: ObjectId,
    pub renderable: Option<&'a dyn Renderable>,
}

impl<'a> VisibleEntry<'a> {
    pub fn new(id: ObjectId, renderable: Option<&'a dyn Renderable>) -> Self {
        Self { id, renderable }
    }

    pub fn into_renderable(self) -> Option<RenderableEntry<'a>> {
        self.renderable
            .map(|renderable| RenderableEntry::new(self.id, renderable))
    }
}

impl fmt::Debug for VisibleEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibleEntry")
            .field("id", &self.id)
            .field("renderable", &self.renderable.is_some())
            .finish()
    }
}

/// Drop visible objects that have nothing to draw, keeping scene order.
pub fn collect_renderables<'a>(
    visible: impl IntoIterator<Item = VisibleEntry<'a>>,
) -> Vec<RenderableEntry<'a>> {
    visible
        .into_iter()
        .filter_map(VisibleEntry::into_renderable)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Marker(Vec3);

    impl Renderable for Marker {
        fn position(&self) -> Vec3 {
            self.0
        }

        fn render(
            &self,
            _: &mut dyn RenderBackend,
            _: Option<&Material>,
        ) -> Result<(), RenderError> {
            Ok(())
        }
    }

    #[test]
    fn objects_without_renderables_are_filtered() {
        let a = Marker(Vec3::X);
        let b = Marker(Vec3::Y);
        let visible = vec![
            VisibleEntry::new(ObjectId::new(1), Some(&a)),
            VisibleEntry::new(ObjectId::new(2), None),
            VisibleEntry::new(ObjectId::new(3), Some(&b)),
        ];

        let ids: Vec<_> = collect_renderables(visible).iter().map(|e| e.id.raw()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn default_priority_is_opaque() {
        let marker = Marker(Vec3::new(3.0, 4.0, 0.0));
        let entry = RenderableEntry::new(ObjectId::new(1), &marker);
        assert_eq!(entry.priority(), RenderPriority::Opaque.value());
        assert_eq!(entry.distance_squared(Vec3::ZERO), 25.0);
    }
}
