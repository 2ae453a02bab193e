//! Prism Render System
//!
//! Draw ordering, color-identity picking and the backend seam they render
//! through. Scenes plug in via [`SceneQuery`]; graphics APIs via
//! [`RenderBackend`]. A CPU [`SoftwareBackend`] is included as the fallback
//! and test backend.

pub mod backend;
pub mod error;
pub mod frame;
pub mod material;
pub mod picking;
pub mod priority;
pub mod renderable;
pub mod scene;
pub mod settings;
pub mod sort;

pub use backend::{DeviceCapabilities, DrawCall, RenderBackend, SoftwareBackend};
pub use error::{PickError, RenderError};
pub use frame::{FrameRenderer, FrameStats};
pub use material::{Material, MaterialLibrary, Uniform, COLOR_UNIFORM, FLAT_MATERIAL};
pub use picking::{
    decode_pick_color, encode_pick_index, pick_index_color, ObjectColorPicker, PickHit,
    PickStats, PICK_CLEAR_COLOR, PICK_INDEX_CAPACITY,
};
pub use priority::RenderPriority;
pub use renderable::{collect_renderables, ObjectId, Renderable, RenderableEntry, VisibleEntry};
pub use scene::SceneQuery;
pub use settings::{PickingSettings, RenderSettings};
pub use sort::{sort_front_to_back, RenderOrderSorter};

pub use prism_core;
