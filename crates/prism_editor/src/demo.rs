//! Demo scene shown by the editor

use crate::settings::GraphicsSettings;
use glam::Vec3;
use prism_core::{BoundingSphere, CameraView, Color, RenderTargetId};
use prism_render::RenderPriority;
use prism_scene::{Mesh, MeshRenderer, Scene};

/// Three cubes on a row, a translucent pane in front of them, a backdrop
/// behind and an empty group node. The camera looks down -Z.
pub fn build_scene(target: RenderTargetId, graphics: &GraphicsSettings) -> Scene {
    let mut scene = Scene::new();

    scene.spawn_mesh(
        "backdrop",
        MeshRenderer::flat(Mesh::quad(80.0), Color::rgb(0.2, 0.22, 0.3))
            .with_translation(Vec3::new(0.0, 0.0, -12.0))
            .with_priority(RenderPriority::Background),
    );

    scene.spawn("cubes", BoundingSphere::new(Vec3::ZERO, 6.0), None);

    let cubes = [
        ("red cube", Vec3::new(-3.0, 0.0, 0.0), Color::rgb(0.9, 0.2, 0.2)),
        ("green cube", Vec3::new(0.0, 0.0, -2.0), Color::rgb(0.2, 0.9, 0.2)),
        ("blue cube", Vec3::new(3.0, 0.0, 0.0), Color::rgb(0.2, 0.3, 0.9)),
    ];
    for (name, at, color) in cubes {
        scene.spawn_mesh(
            name,
            MeshRenderer::flat(Mesh::cube(1.5), color).with_translation(at),
        );
    }

    scene.spawn_mesh(
        "glass pane",
        MeshRenderer::flat(Mesh::quad(2.0), Color::new(0.6, 0.8, 1.0, 0.4))
            .with_translation(Vec3::new(1.5, -1.5, 2.0))
            .with_priority(RenderPriority::Transparent),
    );

    let camera = CameraView::look_at(Vec3::new(0.0, 1.0, 10.0), Vec3::ZERO, Vec3::Y, target)
        .with_perspective(
            graphics.field_of_view_degrees.to_radians(),
            graphics.aspect_ratio(),
            0.1,
            100.0,
        );
    scene.add_camera(camera);

    scene
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_render::{FrameRenderer, ObjectColorPicker, RenderBackend, SoftwareBackend};

    fn setup() -> (SoftwareBackend, Scene, CameraView) {
        let graphics = GraphicsSettings::default();
        let mut backend = SoftwareBackend::new();
        let target =
            backend.create_render_target(graphics.resolution_width, graphics.resolution_height);
        let scene = build_scene(target, &graphics);
        let camera = *scene.active_camera().unwrap();
        (backend, scene, camera)
    }

    fn pixel_of(scene: &Scene, camera: &CameraView, name: &str) -> (u32, u32) {
        let graphics = GraphicsSettings::default();
        let object = scene.iter().find(|o| o.name() == name).unwrap();
        let pixel = camera
            .project_to_pixel(
                object.bounds().center,
                graphics.resolution_width,
                graphics.resolution_height,
            )
            .unwrap();
        (pixel.x, pixel.y)
    }

    #[test]
    fn demo_scene_has_an_active_camera() {
        let (_, scene, _) = setup();
        assert!(scene.active_camera().is_some());
        assert_eq!(scene.len(), 6);
    }

    #[test]
    fn every_cube_is_pickable_at_its_center() {
        let (mut backend, scene, camera) = setup();
        for name in ["red cube", "green cube", "blue cube"] {
            let (x, y) = pixel_of(&scene, &camera, name);
            let mut picker = ObjectColorPicker::new(&mut backend, &scene);
            let hit = picker.pick(Some(&camera), x, y).unwrap();
            assert_eq!(scene.get(hit.id).unwrap().name(), name);
        }
    }

    #[test]
    fn backdrop_is_behind_everything() {
        let (mut backend, scene, camera) = setup();
        let mut picker = ObjectColorPicker::new(&mut backend, &scene);
        let hit = picker.pick(Some(&camera), 0, 0).unwrap();
        assert_eq!(scene.get(hit.id).unwrap().name(), "backdrop");
    }

    #[test]
    fn frame_draws_every_renderable() {
        let (mut backend, scene, camera) = setup();
        let stats = FrameRenderer::new(&mut backend, &scene)
            .render_frame(Some(&camera))
            .unwrap();
        assert_eq!(stats.visible, 5);
        assert_eq!(stats.drawn, 5);
    }
}
