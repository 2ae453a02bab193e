//! Color-identity object picking
//!
//! Every visible renderable is drawn with a unique flat color into the
//! camera's target, then the pixel under the cursor is decoded back into an
//! index. The target is cleared to white, which no index encodes to.
//!
//! Picking forces a full readback and stalls on it, so it is meant for
//! user-triggered, one-shot queries rather than per-frame use.

mod codec;

pub use codec::{decode_pick_color, encode_pick_index, pick_index_color, PICK_INDEX_CAPACITY};

use crate::backend::RenderBackend;
use crate::error::{PickError, RenderError};
use crate::material::{Material, MaterialLibrary, COLOR_UNIFORM};
use crate::renderable::{collect_renderables, ObjectId, Renderable, RenderableEntry};
use crate::scene::SceneQuery;
use crate::settings::PickingSettings;
use crate::sort::sort_front_to_back;
use once_cell::unsync::OnceCell;
use prism_core::{CameraView, Color};
use std::fmt;
use tracing::{debug, warn};

/// Clear color of the picking target; decodes to "no object".
pub const PICK_CLEAR_COLOR: Color = Color::WHITE;

/// The object found under a picked pixel.
#[derive(Clone, Copy)]
pub struct PickHit<'a> {
    pub id: ObjectId,
    /// Position in the front-to-back order of the pick pass.
    pub index: u32,
    pub renderable: &'a dyn Renderable,
}

impl fmt::Debug for PickHit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickHit")
            .field("id", &self.id)
            .field("index", &self.index)
            .finish()
    }
}

/// What the last picking pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PickStats {
    /// Entries that were assigned a color (drawn or skipped).
    pub encoded: u32,
    pub drawn: u32,
    /// Entries whose `pre_render` declined; their color is still consumed.
    pub skipped: u32,
    /// Entries whose draw failed; their color is still consumed.
    pub failed: u32,
    /// The color space or the configured cap ran out before the last entry.
    pub truncated: bool,
}

/// Resolves screen pixels to scene objects by color-identity rendering.
///
/// Owns (or mutably borrows, via `&mut B`) the backend it renders through;
/// `pick` takes `&mut self`, so only one pass can be in flight at a time.
pub struct ObjectColorPicker<B, S> {
    backend: B,
    scene: S,
    materials: MaterialLibrary,
    settings: PickingSettings,
    picking_material: OnceCell<Material>,
    last_stats: PickStats,
}

impl<B: RenderBackend, S: SceneQuery> ObjectColorPicker<B, S> {
    pub fn new(backend: B, scene: S) -> Self {
        Self::with_settings(
            backend,
            scene,
            MaterialLibrary::with_builtins(),
            PickingSettings::default(),
        )
    }

    pub fn with_settings(
        backend: B,
        scene: S,
        materials: MaterialLibrary,
        settings: PickingSettings,
    ) -> Self {
        Self {
            backend,
            scene,
            materials,
            settings,
            picking_material: OnceCell::new(),
            last_stats: PickStats::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn last_stats(&self) -> PickStats {
        self.last_stats
    }

    /// Object under pixel `(x, y)` of `camera`'s render target.
    ///
    /// Every failure degrades to `None`; recoverable ones are logged.
    /// Use [`ObjectColorPicker::try_pick`] to inspect the reason.
    pub fn pick(&mut self, camera: Option<&CameraView>, x: u32, y: u32) -> Option<PickHit<'_>> {
        match self.try_pick(camera, x, y) {
            Ok(hit) => hit,
            Err(err) => {
                warn!(%err, x, y, "pick failed");
                None
            }
        }
    }

    pub fn try_pick(
        &mut self,
        camera: Option<&CameraView>,
        x: u32,
        y: u32,
    ) -> Result<Option<PickHit<'_>>, PickError> {
        let camera = camera.ok_or(PickError::NoCamera)?;

        let materials = &self.materials;
        let material_name = &self.settings.material;
        let mut material = self
            .picking_material
            .get_or_try_init(|| materials.instantiate(material_name))
            .map_err(PickError::NoPickingMaterial)?
            .clone();

        let mut entries = collect_renderables(self.scene.visible_entries(&camera.frustum()));
        sort_front_to_back(&mut entries, Some(camera));

        let limit = self.settings.max_objects.min(PICK_INDEX_CAPACITY);
        self.last_stats = PickStats::default();
        let stats = draw_pick_pass(&mut self.backend, camera, &entries, &mut material, limit)?;
        self.last_stats = stats;
        debug!(
            visible = entries.len(),
            drawn = stats.drawn,
            skipped = stats.skipped,
            failed = stats.failed,
            "pick pass complete"
        );

        let pixel = self
            .backend
            .read_pixel(camera.render_target, x, y)?
            .to_rgba8();
        let Some(index) = decode_pick_color(pixel.rgb()) else {
            debug!(x, y, "no object under pixel");
            return Ok(None);
        };

        let Some(entry) = entries.get(index as usize) else {
            warn!(index, entries = entries.len(), "decoded pick index is out of range");
            return Ok(None);
        };

        Ok(Some(PickHit {
            id: entry.id,
            index,
            renderable: entry.renderable,
        }))
    }
}

/// Draw `entries` with their index colors into the camera's target and wait
/// for the result. Stops early, with a single warning, once `limit` entries
/// have been assigned a color.
fn draw_pick_pass<B: RenderBackend>(
    backend: &mut B,
    camera: &CameraView,
    entries: &[RenderableEntry<'_>],
    material: &mut Material,
    limit: u32,
) -> Result<PickStats, RenderError> {
    backend.set_render_target(camera.render_target)?;
    backend.clear_render_target(PICK_CLEAR_COLOR)?;
    backend.set_view(camera);

    let mut stats = PickStats::default();
    for (position, entry) in entries.iter().enumerate() {
        let color = u32::try_from(position)
            .ok()
            .filter(|&index| index < limit)
            .and_then(pick_index_color);
        let Some(color) = color else {
            warn!(
                encoded = stats.encoded,
                unpickable = entries.len() - position,
                "pick color space exhausted; remaining objects are not pickable this pass"
            );
            stats.truncated = true;
            break;
        };

        material.set_color(COLOR_UNIFORM, color);
        backend.bind_material(material);
        stats.encoded += 1;

        if !entry.renderable.pre_render(&mut *backend) {
            stats.skipped += 1;
            continue;
        }
        match entry.renderable.render(&mut *backend, Some(material)) {
            Ok(()) => stats.drawn += 1,
            Err(err) => {
                warn!(id = entry.id.raw(), %err, "pick draw failed; object is not pickable");
                stats.failed += 1;
            }
        }
        entry.renderable.post_render(&mut *backend);
    }

    backend.refresh(camera.render_target)?;
    Ok(stats)
}
