//! Software rasterizer backend
//!
//! Renders into CPU-side `Rgba8` targets with a float depth buffer. Clears
//! and draws are queued per target and executed by `refresh`, mirroring the
//! submit/readback split of a GPU backend.

use super::{DeviceCapabilities, DrawCall, RenderBackend};
use crate::error::RenderError;
use crate::material::{Material, COLOR_UNIFORM};
use glam::{Mat4, UVec2, Vec2, Vec3, Vec4};
use prism_core::{CameraView, Color, RenderTargetId, Rgba8};

const MAX_TARGET_SIZE: u32 = 8192;

enum Command {
    Clear(Rgba8),
    Triangles {
        clip: Vec<[Vec4; 3]>,
        fill: Rgba8,
    },
}

struct SoftwareTarget {
    width: u32,
    height: u32,
    pixels: Vec<Rgba8>,
    depth: Vec<f32>,
    pending: Vec<Command>,
}

impl SoftwareTarget {
    fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: vec![Rgba8::default(); len],
            depth: vec![f32::INFINITY; len],
            pending: Vec::new(),
        }
    }

    fn flush(&mut self) {
        for command in std::mem::take(&mut self.pending) {
            match command {
                Command::Clear(color) => {
                    self.pixels.fill(color);
                    self.depth.fill(f32::INFINITY);
                }
                Command::Triangles { clip, fill } => {
                    for triangle in &clip {
                        self.rasterize(triangle, fill);
                    }
                }
            }
        }
    }

    /// Fill one clip-space triangle. Triangles touching or crossing the eye
    /// plane are dropped rather than clipped.
    fn rasterize(&mut self, clip: &[Vec4; 3], fill: Rgba8) {
        if clip.iter().any(|v| v.w <= f32::EPSILON) {
            return;
        }

        let (width, height) = (self.width as f32, self.height as f32);
        let screen = clip.map(|v| {
            let ndc = v.truncate() / v.w;
            Vec3::new(
                (ndc.x + 1.0) * 0.5 * width,
                (1.0 - ndc.y) * 0.5 * height,
                ndc.z,
            )
        });

        let area = edge(screen[0].truncate(), screen[1].truncate(), screen[2].truncate());
        if area.abs() <= f32::EPSILON {
            return;
        }

        let min = screen[0].min(screen[1]).min(screen[2]);
        let max = screen[0].max(screen[1]).max(screen[2]);
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = max.x.ceil().min(width) as u32;
        let y1 = max.y.ceil().min(height) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                // Dividing by the signed area makes the weights positive
                // inside the triangle for either winding.
                let w0 = edge(screen[1].truncate(), screen[2].truncate(), p) / area;
                let w1 = edge(screen[2].truncate(), screen[0].truncate(), p) / area;
                let w2 = edge(screen[0].truncate(), screen[1].truncate(), p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let z = w0 * screen[0].z + w1 * screen[1].z + w2 * screen[2].z;
                if !(0.0..=1.0).contains(&z) {
                    continue;
                }

                let idx = y as usize * self.width as usize + x as usize;
                if z < self.depth[idx] {
                    self.depth[idx] = z;
                    self.pixels[idx] = fill;
                }
            }
        }
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
}

/// CPU render backend used as the fallback and in tests.
pub struct SoftwareBackend {
    targets: Vec<SoftwareTarget>,
    active: Option<RenderTargetId>,
    view_projection: Mat4,
    fill: Rgba8,
    submitted_draws: u64,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            active: None,
            view_projection: Mat4::IDENTITY,
            fill: Rgba8::WHITE,
            submitted_draws: 0,
        }
    }

    fn target(&self, id: RenderTargetId) -> Result<&SoftwareTarget, RenderError> {
        self.targets
            .get(id.raw() as usize)
            .ok_or(RenderError::UnknownRenderTarget(id))
    }

    fn target_mut(&mut self, id: RenderTargetId) -> Result<&mut SoftwareTarget, RenderError> {
        self.targets
            .get_mut(id.raw() as usize)
            .ok_or(RenderError::UnknownRenderTarget(id))
    }

    fn active_target_mut(&mut self) -> Result<&mut SoftwareTarget, RenderError> {
        let id = self.active.ok_or(RenderError::NoActiveRenderTarget)?;
        self.target_mut(id)
    }

    /// Row-major pixels of a target as of the last `refresh`.
    pub fn pixels(&self, id: RenderTargetId) -> Option<&[Rgba8]> {
        self.target(id).ok().map(|target| target.pixels.as_slice())
    }

    /// Same as [`SoftwareBackend::pixels`] viewed as raw RGBA bytes.
    pub fn target_bytes(&self, id: RenderTargetId) -> Option<&[u8]> {
        self.pixels(id).map(bytemuck::cast_slice)
    }

    /// Clears and draws queued on a target and not yet refreshed.
    pub fn pending_commands(&self, id: RenderTargetId) -> usize {
        self.target(id).map(|target| target.pending.len()).unwrap_or(0)
    }

    /// Total draw calls accepted since creation.
    pub fn submitted_draws(&self) -> u64 {
        self.submitted_draws
    }
}

impl Default for SoftwareBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SoftwareBackend {
    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities {
            name: "software",
            max_target_size: MAX_TARGET_SIZE,
            exact_readback: true,
        }
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTargetId {
        let id = RenderTargetId::new(self.targets.len() as u32);
        self.targets.push(SoftwareTarget::new(
            width.clamp(1, MAX_TARGET_SIZE),
            height.clamp(1, MAX_TARGET_SIZE),
        ));
        tracing::debug!(target = id.raw(), width, height, "created software render target");
        id
    }

    fn target_size(&self, target: RenderTargetId) -> Option<UVec2> {
        self.target(target)
            .ok()
            .map(|t| UVec2::new(t.width, t.height))
    }

    fn set_render_target(&mut self, target: RenderTargetId) -> Result<(), RenderError> {
        self.target(target)?;
        self.active = Some(target);
        Ok(())
    }

    fn active_render_target(&self) -> Option<RenderTargetId> {
        self.active
    }

    fn clear_render_target(&mut self, color: Color) -> Result<(), RenderError> {
        let target = self.active_target_mut()?;
        target.pending.push(Command::Clear(color.to_rgba8()));
        Ok(())
    }

    fn set_view(&mut self, camera: &CameraView) {
        self.view_projection = camera.view_projection();
    }

    fn bind_material(&mut self, material: &Material) {
        self.fill = material
            .color(COLOR_UNIFORM)
            .unwrap_or(Color::WHITE)
            .to_rgba8();
    }

    fn draw(&mut self, draw: &DrawCall<'_>) -> Result<(), RenderError> {
        let mvp = self.view_projection * draw.model;
        let mut clip = Vec::with_capacity(draw.indices.len() / 3);
        for triangle in draw.indices.chunks_exact(3) {
            let mut corners = [Vec4::ZERO; 3];
            for (corner, &index) in corners.iter_mut().zip(triangle) {
                let position = draw.positions.get(index as usize).ok_or(
                    RenderError::IndexOutOfRange {
                        index,
                        vertex_count: draw.positions.len(),
                    },
                )?;
                *corner = mvp * position.extend(1.0);
            }
            clip.push(corners);
        }

        let fill = self.fill;
        let target = self.active_target_mut()?;
        tracing::trace!(triangles = clip.len(), ?fill, "queued draw");
        target.pending.push(Command::Triangles { clip, fill });
        self.submitted_draws += 1;
        Ok(())
    }

    fn refresh(&mut self, target: RenderTargetId) -> Result<(), RenderError> {
        self.target_mut(target)?.flush();
        Ok(())
    }

    fn read_pixel(&self, target: RenderTargetId, x: u32, y: u32) -> Result<Color, RenderError> {
        let target = self.target(target)?;
        if x >= target.width || y >= target.height {
            return Err(RenderError::PixelOutOfBounds {
                x,
                y,
                width: target.width,
                height: target.height,
            });
        }
        let pixel = target.pixels[y as usize * target.width as usize + x as usize];
        Ok(Color::from_rgba8(pixel))
    }
}
