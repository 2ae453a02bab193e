//! Scene query seam.

use crate::renderable::VisibleEntry;
use prism_core::Frustum;

/// Source of the objects a camera can see.
///
/// Implementations own their objects; returned entries borrow them.
pub trait SceneQuery {
    /// Objects whose bounds intersect `frustum`, in a deterministic order.
    fn visible_entries(&self, frustum: &Frustum) -> Vec<VisibleEntry<'_>>;
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn visible_entries(&self, frustum: &Frustum) -> Vec<VisibleEntry<'_>> {
        (**self).visible_entries(frustum)
    }
}
