//! Render settings

use crate::material::FLAT_MATERIAL;
use crate::picking::PICK_INDEX_CAPACITY;
use crate::priority::RenderPriority;
use crate::sort::RenderOrderSorter;
use prism_core::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub clear_color: Color,
    /// First priority drawn back to front.
    pub transparent_threshold: u32,
    pub picking: PickingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Library name of the flat material used for the picking pass.
    pub material: String,
    /// Cap on objects encoded per pick; never raises the color-space ceiling.
    pub max_objects: u32,
}

impl RenderSettings {
    pub fn sorter(&self) -> RenderOrderSorter {
        RenderOrderSorter::new(self.transparent_threshold)
    }
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            clear_color: Color::rgb(0.1, 0.1, 0.12),
            transparent_threshold: RenderPriority::Transparent.value(),
            picking: PickingSettings::default(),
        }
    }
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            material: FLAT_MATERIAL.to_string(),
            max_objects: PICK_INDEX_CAPACITY,
        }
    }
}
