//! Draw ordering
//!
//! Entries are grouped by ascending priority. Inside a tier below the
//! transparent threshold they go front to back (cheap early depth
//! rejection); at or above it they go back to front so blending composes
//! correctly. Distances are squared: only their order matters.

use crate::priority::RenderPriority;
use crate::renderable::RenderableEntry;
use glam::Vec3;
use prism_core::CameraView;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOrderSorter {
    transparent_threshold: u32,
}

impl RenderOrderSorter {
    pub fn new(transparent_threshold: u32) -> Self {
        Self {
            transparent_threshold,
        }
    }

    /// Sort `entries` into draw order for `camera`.
    ///
    /// Without a camera there is no reference point and the slice is left
    /// untouched. The sort is stable: exact ties keep their input order.
    pub fn sort(&self, entries: &mut [RenderableEntry<'_>], camera: Option<&CameraView>) {
        let Some(camera) = camera else {
            tracing::debug!(entries = entries.len(), "no camera; draw order left unsorted");
            return;
        };
        if entries.len() < 2 {
            return;
        }

        let eye = camera.position;
        entries.sort_by(|a, b| self.compare(a, b, eye));
    }

    /// Draw-order comparison of two entries seen from `eye`.
    ///
    /// `total_cmp` keeps this a total order even for NaN positions.
    pub fn compare(&self, a: &RenderableEntry<'_>, b: &RenderableEntry<'_>, eye: Vec3) -> Ordering {
        let priority = a.priority();
        priority.cmp(&b.priority()).then_with(|| {
            let da = a.distance_squared(eye);
            let db = b.distance_squared(eye);
            if priority < self.transparent_threshold {
                da.total_cmp(&db)
            } else {
                db.total_cmp(&da)
            }
        })
    }
}

impl Default for RenderOrderSorter {
    fn default() -> Self {
        Self::new(RenderPriority::Transparent.value())
    }
}

/// Order by ascending distance from the camera, ignoring priority.
pub fn sort_front_to_back(entries: &mut [RenderableEntry<'_>], camera: Option<&CameraView>) {
    let Some(camera) = camera else {
        return;
    };
    let eye = camera.position;
    entries.sort_by(|a, b| a.distance_squared(eye).total_cmp(&b.distance_squared(eye)));
}
