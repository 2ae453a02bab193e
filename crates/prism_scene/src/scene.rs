//! Scene container
//!
//! Objects are kept in spawn order, which is also the order culling reports
//! them in. Ids are never reused within a scene.

use crate::mesh_renderer::MeshRenderer;
use prism_core::{BoundingSphere, CameraView, Frustum};
use prism_render::{ObjectId, Renderable, SceneQuery, VisibleEntry};

/// One object in the scene. Objects without a renderable (groups, markers)
/// still take part in culling but are never drawn or picked.
pub struct SceneObject {
    id: ObjectId,
    name: String,
    bounds: BoundingSphere,
    renderable: Option<Box<dyn Renderable>>,
}

impl SceneObject {
    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bounds(&self) -> BoundingSphere {
        self.bounds
    }

    pub fn renderable(&self) -> Option<&dyn Renderable> {
        self.renderable.as_deref()
    }
}

/// Index of a camera registered with [`Scene::add_camera`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CameraHandle(usize);

pub struct Scene {
    next_id: u64,
    objects: Vec<SceneObject>,
    cameras: Vec<CameraView>,
    active_camera: Option<CameraHandle>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            objects: Vec::new(),
            cameras: Vec::new(),
            active_camera: None,
        }
    }

    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        bounds: BoundingSphere,
        renderable: Option<Box<dyn Renderable>>,
    ) -> ObjectId {
        let id = ObjectId::new(self.next_id);
        self.next_id += 1;

        let name = name.into();
        tracing::trace!(id = id.raw(), %name, "spawned scene object");
        self.objects.push(SceneObject {
            id,
            name,
            bounds,
            renderable,
        });
        id
    }

    /// Spawn a mesh, bounded by the renderer's own bounds.
    pub fn spawn_mesh(&mut self, name: impl Into<String>, renderer: MeshRenderer) -> ObjectId {
        let bounds = renderer.bounds();
        self.spawn(name, bounds, Some(Box::new(renderer)))
    }

    pub fn despawn(&mut self, id: ObjectId) -> bool {
        match self.objects.iter().position(|object| object.id == id) {
            Some(index) => {
                self.objects.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Register a camera. The first camera added becomes active.
    pub fn add_camera(&mut self, camera: CameraView) -> CameraHandle {
        let handle = CameraHandle(self.cameras.len());
        self.cameras.push(camera);
        if self.active_camera.is_none() {
            self.active_camera = Some(handle);
        }
        handle
    }

    pub fn set_active_camera(&mut self, handle: CameraHandle) -> bool {
        if handle.0 >= self.cameras.len() {
            return false;
        }
        self.active_camera = Some(handle);
        true
    }

    pub fn clear_active_camera(&mut self) {
        self.active_camera = None;
    }

    pub fn camera(&self, handle: CameraHandle) -> Option<&CameraView> {
        self.cameras.get(handle.0)
    }

    pub fn active_camera(&self) -> Option<&CameraView> {
        self.active_camera.and_then(|handle| self.camera(handle))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneQuery for Scene {
    fn visible_entries(&self, frustum: &Frustum) -> Vec<VisibleEntry<'_>> {
        self.objects
            .iter()
            .filter(|object| frustum.intersects_sphere(&object.bounds))
            .map(|object| VisibleEntry::new(object.id, object.renderable()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use glam::Vec3;
    use prism_core::{Color, RenderTargetId};

    fn camera() -> CameraView {
        CameraView::look_at(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, RenderTargetId::new(0))
            .with_perspective(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0)
    }

    fn cube_at(position: Vec3) -> MeshRenderer {
        MeshRenderer::flat(Mesh::cube(1.0), Color::WHITE).with_translation(position)
    }

    #[test]
    fn ids_are_unique_and_not_reused() {
        let mut scene = Scene::new();
        let a = scene.spawn_mesh("a", cube_at(Vec3::ZERO));
        assert!(scene.despawn(a));
        let b = scene.spawn_mesh("b", cube_at(Vec3::ZERO));
        assert_ne!(a, b);
        assert!(!scene.despawn(a));
        assert_eq!(scene.get(b).map(|o| o.name()), Some("b"));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn culling_keeps_spawn_order_and_empty_objects() {
        let mut scene = Scene::new();
        let front = scene.spawn_mesh("front", cube_at(Vec3::new(0.0, 0.0, -5.0)));
        let behind = scene.spawn_mesh("behind", cube_at(Vec3::new(0.0, 0.0, 5.0)));
        let group = scene.spawn("group", BoundingSphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0), None);
        let far = scene.spawn_mesh("far", cube_at(Vec3::new(1.0, 0.0, -20.0)));

        let visible = scene.visible_entries(&camera().frustum());
        let ids: Vec<_> = visible.iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![front, group, far]);
        assert!(!ids.contains(&behind));
        assert!(visible[1].renderable.is_none());
    }

    #[test]
    fn first_camera_is_active() {
        let mut scene = Scene::new();
        assert!(scene.active_camera().is_none());

        let first = scene.add_camera(camera());
        let second = scene.add_camera(CameraView {
            position: Vec3::ONE,
            ..camera()
        });
        assert_eq!(scene.active_camera().map(|c| c.position), Some(Vec3::ZERO));

        assert!(scene.set_active_camera(second));
        assert_eq!(scene.active_camera().map(|c| c.position), Some(Vec3::ONE));
        assert!(!scene.set_active_camera(CameraHandle(9)));

        scene.clear_active_camera();
        assert!(scene.active_camera().is_none());
        assert!(scene.camera(first).is_some());
    }
}
