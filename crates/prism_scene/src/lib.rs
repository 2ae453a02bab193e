//! Prism Scene
//!
//! In-memory scene: objects with bounds and optional renderables, meshes,
//! and the cameras that look at them. Implements
//! [`prism_render::SceneQuery`] with bounding-sphere frustum culling.

pub mod mesh;
pub mod mesh_renderer;
pub mod scene;

pub use mesh::Mesh;
pub use mesh_renderer::MeshRenderer;
pub use scene::{CameraHandle, Scene, SceneObject};
