//! Render and picking errors

use prism_core::RenderTargetId;
use thiserror::Error;

/// Errors raised by render backends and material lookups.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render target {0:?} does not exist")]
    UnknownRenderTarget(RenderTargetId),

    #[error("no render target is active")]
    NoActiveRenderTarget,

    #[error("pixel ({x}, {y}) is outside the {width}x{height} render target")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("material '{name}' is not registered")]
    UnknownMaterial { name: String },

    #[error("draw call references vertex {index} but only {vertex_count} vertices were supplied")]
    IndexOutOfRange {
        index: u32,
        vertex_count: usize,
    },
}

/// Reasons a pick produced no result other than "nothing under the pixel".
#[derive(Debug, Error)]
pub enum PickError {
    #[error("no active camera to pick from")]
    NoCamera,

    #[error("picking material is unavailable")]
    NoPickingMaterial(#[source] RenderError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
