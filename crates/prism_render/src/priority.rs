//! Render priority tiers
//!
//! Tiers are spaced by 1000 so a renderable can nudge itself relative to a
//! tier, e.g. `RenderPriority::Transparent.value() - 1` draws just before
//! every regular transparent object.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderPriority {
    /// Skyboxes and other backdrops.
    Background,
    Opaque,
    /// Cutout geometry (alpha-tested foliage, fences).
    AlphaTest,
    /// Alpha-blended geometry, drawn back to front.
    Transparent,
    /// Gizmos and HUD elements drawn over the scene.
    Overlay,
}

impl RenderPriority {
    pub const fn value(self) -> u32 {
        match self {
            RenderPriority::Background => 1000,
            RenderPriority::Opaque => 2000,
            RenderPriority::AlphaTest => 3000,
            RenderPriority::Transparent => 4000,
            RenderPriority::Overlay => 5000,
        }
    }
}

impl From<RenderPriority> for u32 {
    fn from(priority: RenderPriority) -> Self {
        priority.value()
    }
}
