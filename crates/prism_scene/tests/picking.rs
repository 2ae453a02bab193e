use glam::Vec3;
use prism_core::{BoundingSphere, CameraView, Color, Rgba8};
use prism_render::{
    FrameRenderer, ObjectColorPicker, ObjectId, PickError, RenderBackend, RenderPriority,
    SoftwareBackend,
};
use prism_scene::{Mesh, MeshRenderer, Scene};

const WIDTH: u32 = 96;
const HEIGHT: u32 = 64;

struct Fixture {
    backend: SoftwareBackend,
    scene: Scene,
    near: ObjectId,
    middle: ObjectId,
    far: ObjectId,
}

/// Three cubes in a row, spawned far-first, plus an empty group node and an
/// object behind the camera.
fn fixture() -> Fixture {
    let mut backend = SoftwareBackend::new();
    let target = backend.create_render_target(WIDTH, HEIGHT);

    let mut scene = Scene::new();
    scene.add_camera(
        CameraView::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, target)
            .with_perspective(
                std::f32::consts::FRAC_PI_3,
                WIDTH as f32 / HEIGHT as f32,
                0.1,
                100.0,
            ),
    );

    let cube = |x: f32, z: f32, color: Color| {
        MeshRenderer::flat(Mesh::cube(1.0), color).with_translation(Vec3::new(x, 0.0, z))
    };
    let far = scene.spawn_mesh("far", cube(3.0, -4.0, Color::rgb(0.0, 0.0, 1.0)));
    let middle = scene.spawn_mesh("middle", cube(0.0, -1.0, Color::rgb(0.0, 1.0, 0.0)));
    scene.spawn("group", BoundingSphere::new(Vec3::ZERO, 1.0), None);
    let near = scene.spawn_mesh("near", cube(-3.0, 2.0, Color::rgb(1.0, 0.0, 0.0)));
    scene.spawn_mesh("behind", cube(0.0, 20.0, Color::BLACK));

    Fixture {
        backend,
        scene,
        near,
        middle,
        far,
    }
}

fn pixel_at(camera: &CameraView, point: Vec3) -> (u32, u32) {
    let pixel = camera
        .project_to_pixel(point, WIDTH, HEIGHT)
        .expect("point should be on screen");
    (pixel.x, pixel.y)
}

#[test]
fn picks_each_cube_under_its_center() {
    let Fixture {
        mut backend,
        scene,
        near,
        middle,
        far,
    } = fixture();
    let camera = *scene.active_camera().unwrap();
    let mut picker = ObjectColorPicker::new(&mut backend, &scene);

    for (expected, index, center) in [
        (near, 0, Vec3::new(-3.0, 0.0, 2.0)),
        (middle, 1, Vec3::new(0.0, 0.0, -1.0)),
        (far, 2, Vec3::new(3.0, 0.0, -4.0)),
    ] {
        let (x, y) = pixel_at(&camera, center);
        let hit = picker.pick(Some(&camera), x, y).expect("cube should be hit");
        assert_eq!(hit.id, expected);
        assert_eq!(hit.index, index);
    }

    // The group node and the object behind the camera never get a color.
    let stats = picker.last_stats();
    assert_eq!((stats.encoded, stats.drawn), (3, 3));
}

#[test]
fn middle_cube_is_painted_with_index_one() {
    let Fixture {
        mut backend, scene, ..
    } = fixture();
    let camera = *scene.active_camera().unwrap();
    let (x, y) = pixel_at(&camera, Vec3::new(0.0, 0.0, -1.0));

    let mut picker = ObjectColorPicker::new(&mut backend, &scene);
    assert!(picker.pick(Some(&camera), x, y).is_some());
    drop(picker);

    let pixel = backend.read_pixel(camera.render_target, x, y).unwrap();
    assert_eq!(pixel.to_rgba8(), Rgba8::new(1, 0, 0, 255));
}

#[test]
fn empty_space_picks_nothing() {
    let Fixture {
        mut backend, scene, ..
    } = fixture();
    let camera = *scene.active_camera().unwrap();
    let mut picker = ObjectColorPicker::new(&mut backend, &scene);

    assert!(picker.pick(Some(&camera), 0, 0).is_none());
    assert!(picker.pick(Some(&camera), WIDTH - 1, HEIGHT - 1).is_none());
}

#[test]
fn picking_ignores_render_priority() {
    let mut backend = SoftwareBackend::new();
    let target = backend.create_render_target(WIDTH, HEIGHT);
    let mut scene = Scene::new();
    let camera = CameraView::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, target)
        .with_perspective(std::f32::consts::FRAC_PI_3, 1.5, 0.1, 100.0);

    let overlay = scene.spawn_mesh(
        "overlay",
        MeshRenderer::flat(Mesh::quad(1.0), Color::WHITE)
            .with_translation(Vec3::new(2.0, 0.0, 0.0))
            .with_priority(RenderPriority::Overlay),
    );
    let backdrop = scene.spawn_mesh(
        "backdrop",
        MeshRenderer::flat(Mesh::quad(1.0), Color::WHITE)
            .with_translation(Vec3::new(-2.0, 0.0, 0.0))
            .with_priority(RenderPriority::Background),
    );

    let mut picker = ObjectColorPicker::new(&mut backend, &scene);
    let (x, y) = pixel_at(&camera, Vec3::new(2.0, 0.0, 0.0));
    assert_eq!(picker.pick(Some(&camera), x, y).map(|hit| hit.id), Some(overlay));
    let (x, y) = pixel_at(&camera, Vec3::new(-2.0, 0.0, 0.0));
    assert_eq!(picker.pick(Some(&camera), x, y).map(|hit| hit.id), Some(backdrop));
}

#[test]
fn hidden_objects_cannot_be_picked() {
    let mut backend = SoftwareBackend::new();
    let target = backend.create_render_target(WIDTH, HEIGHT);
    let mut scene = Scene::new();
    let camera = CameraView::look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y, target)
        .with_perspective(std::f32::consts::FRAC_PI_3, 1.5, 0.1, 100.0);

    scene.spawn_mesh(
        "ghost",
        MeshRenderer::flat(Mesh::cube(2.0), Color::WHITE).with_visible(false),
    );

    let mut picker = ObjectColorPicker::new(&mut backend, &scene);
    let (x, y) = pixel_at(&camera, Vec3::ZERO);
    assert!(picker.pick(Some(&camera), x, y).is_none());
    assert_eq!(picker.last_stats().skipped, 1);
}

#[test]
fn frame_render_and_pick_share_the_target() {
    let Fixture {
        mut backend,
        scene,
        middle,
        ..
    } = fixture();
    let camera = *scene.active_camera().unwrap();
    let (x, y) = pixel_at(&camera, Vec3::new(0.0, 0.0, -1.0));

    let stats = FrameRenderer::new(&mut backend, &scene)
        .render_frame(Some(&camera))
        .unwrap();
    assert_eq!((stats.visible, stats.drawn), (3, 3));
    assert_eq!(
        backend.read_pixel(camera.render_target, x, y).unwrap(),
        Color::rgb(0.0, 1.0, 0.0)
    );

    let mut picker = ObjectColorPicker::new(&mut backend, &scene);
    assert_eq!(picker.pick(Some(&camera), x, y).map(|hit| hit.id), Some(middle));
}

#[test]
fn no_active_camera_picks_nothing() {
    let Fixture {
        mut backend,
        mut scene,
        ..
    } = fixture();
    scene.clear_active_camera();
    let mut picker = ObjectColorPicker::new(&mut backend, &scene);

    let camera = picker.scene().active_camera().copied();
    assert!(matches!(
        picker.try_pick(camera.as_ref(), 0, 0),
        Err(PickError::NoCamera)
    ));
}
