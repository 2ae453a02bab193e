//! Prism Engine Core
//!
//! Contains the fundamental types shared by the render and scene crates:
//! - Math (re-exported glam)
//! - Colors in normalized and 8-bit pixel form
//! - Camera views and view frustums

pub mod camera;
pub mod color;
pub mod frustum;

pub use camera::{CameraView, RenderTargetId};
pub use color::{Color, Rgba8};
pub use frustum::{BoundingSphere, Frustum, Plane};

pub use glam;
pub use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
