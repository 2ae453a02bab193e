//! Per-frame render driver

use crate::backend::RenderBackend;
use crate::error::RenderError;
use crate::renderable::{collect_renderables, ObjectId, RenderableEntry};
use crate::scene::SceneQuery;
use crate::settings::RenderSettings;
use crate::sort::RenderOrderSorter;
use prism_core::{CameraView, Color};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Renderables that survived culling.
    pub visible: usize,
    pub drawn: usize,
    /// Renderables whose `pre_render` declined.
    pub skipped: usize,
    /// Renderables whose draw failed.
    pub failed: usize,
}

/// Culls, sorts and draws a scene into a camera's render target.
pub struct FrameRenderer<B, S> {
    backend: B,
    scene: S,
    sorter: RenderOrderSorter,
    clear_color: Color,
}

impl<B: RenderBackend, S: SceneQuery> FrameRenderer<B, S> {
    pub fn new(backend: B, scene: S) -> Self {
        Self::with_settings(backend, scene, &RenderSettings::default())
    }

    pub fn with_settings(backend: B, scene: S, settings: &RenderSettings) -> Self {
        Self {
            backend,
            scene,
            sorter: settings.sorter(),
            clear_color: settings.clear_color,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Ids of the visible renderables in the order `render_frame` would draw them.
    pub fn draw_order(&self, camera: &CameraView) -> Vec<ObjectId> {
        self.sorted_entries(camera).iter().map(|entry| entry.id).collect()
    }

    fn sorted_entries(&self, camera: &CameraView) -> Vec<RenderableEntry<'_>> {
        let mut entries = collect_renderables(self.scene.visible_entries(&camera.frustum()));
        self.sorter.sort(&mut entries, Some(camera));
        entries
    }

    /// Render one frame. Without a camera nothing is drawn.
    pub fn render_frame(&mut self, camera: Option<&CameraView>) -> Result<FrameStats, RenderError> {
        let Some(camera) = camera else {
            tracing::debug!("no active camera; skipping frame");
            return Ok(FrameStats::default());
        };

        let mut entries = collect_renderables(self.scene.visible_entries(&camera.frustum()));
        self.sorter.sort(&mut entries, Some(camera));

        let backend = &mut self.backend;
        backend.set_render_target(camera.render_target)?;
        backend.clear_render_target(self.clear_color)?;
        backend.set_view(camera);

        let mut stats = FrameStats {
            visible: entries.len(),
            ..FrameStats::default()
        };
        for entry in &entries {
            if !entry.renderable.pre_render(&mut *backend) {
                stats.skipped += 1;
                continue;
            }
            match entry.renderable.render(&mut *backend, None) {
                Ok(()) => stats.drawn += 1,
                Err(err) => {
                    tracing::warn!(id = entry.id.raw(), %err, "draw failed");
                    stats.failed += 1;
                }
            }
            entry.renderable.post_render(&mut *backend);
        }

        backend.refresh(camera.render_target)?;
        tracing::debug!(
            visible = stats.visible,
            drawn = stats.drawn,
            skipped = stats.skipped,
            failed = stats.failed,
            "frame rendered"
        );
        Ok(stats)
    }
}
