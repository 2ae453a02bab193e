//! Render target dumps

use prism_core::RenderTargetId;
use prism_render::{RenderBackend, SoftwareBackend};
use std::io::Write;
use std::path::Path;

/// Encode RGBA8 pixels as a binary PPM, dropping alpha.
pub fn encode_ppm(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let header = format!("P6\n{width} {height}\n255\n");
    let mut out = Vec::with_capacity(header.len() + rgba.len() / 4 * 3);
    out.extend_from_slice(header.as_bytes());
    for pixel in rgba.chunks_exact(4) {
        out.extend_from_slice(&pixel[..3]);
    }
    out
}

pub fn write_ppm(
    backend: &SoftwareBackend,
    target: RenderTargetId,
    path: &Path,
) -> anyhow::Result<()> {
    let size = backend
        .target_size(target)
        .ok_or_else(|| anyhow::anyhow!("unknown render target {}", target.raw()))?;
    let bytes = backend
        .target_bytes(target)
        .ok_or_else(|| anyhow::anyhow!("unknown render target {}", target.raw()))?;

    let mut file = std::fs::File::create(path)?;
    file.write_all(&encode_ppm(size.x, size.y, bytes))?;
    tracing::info!(path = %path.display(), width = size.x, height = size.y, "wrote render target");
    Ok(())
}
