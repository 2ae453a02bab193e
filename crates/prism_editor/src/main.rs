//! Prism Editor
//!
//! Renders the demo scene once through the software backend and reports
//! which object sits under a pixel.
//!
//! Usage: `prism-editor [settings.json] [x y] [--dump-pick <path>]`

mod demo;
mod settings;
mod snapshot;

use anyhow::{bail, Context, Result};
use prism_render::{
    FrameRenderer, MaterialLibrary, ObjectColorPicker, RenderBackend, SoftwareBackend,
};
use settings::EditorSettings;
use std::path::PathBuf;

#[derive(Debug, Default, PartialEq)]
struct EditorArgs {
    settings: Option<PathBuf>,
    pixel: Option<(u32, u32)>,
    dump_pick: Option<PathBuf>,
}

impl EditorArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut positional = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dump-pick" => {
                    let path = args.next().context("--dump-pick needs a path")?;
                    parsed.dump_pick = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
                _ => positional.push(arg),
            }
        }

        match positional.as_slice() {
            [] => {}
            [path] => parsed.settings = Some(PathBuf::from(path)),
            [x, y] => parsed.pixel = Some(parse_pixel(x, y)?),
            [path, x, y] => {
                parsed.settings = Some(PathBuf::from(path));
                parsed.pixel = Some(parse_pixel(x, y)?);
            }
            _ => bail!("usage: prism-editor [settings.json] [x y] [--dump-pick <path>]"),
        }
        Ok(parsed)
    }
}

fn parse_pixel(x: &str, y: &str) -> Result<(u32, u32)> {
    let x = x.parse().with_context(|| format!("invalid pixel x {x:?}"))?;
    let y = y.parse().with_context(|| format!("invalid pixel y {y:?}"))?;
    Ok((x, y))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    tracing::info!("Prism Editor v{}", prism_core::VERSION);

    let args = EditorArgs::parse(std::env::args().skip(1))?;
    let settings = match &args.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };

    let mut backend = SoftwareBackend::new();
    let caps = backend.capabilities();
    tracing::info!(
        backend = caps.name,
        max_target_size = caps.max_target_size,
        exact_readback = caps.exact_readback,
        "render backend ready"
    );
    if !caps.exact_readback {
        tracing::warn!("backend does not read back exact colors; picking may miss");
    }

    let graphics = &settings.graphics;
    let target =
        backend.create_render_target(graphics.resolution_width, graphics.resolution_height);
    let scene = demo::build_scene(target, graphics);
    let camera = scene.active_camera().copied();

    let frame = FrameRenderer::with_settings(&mut backend, &scene, &settings.render)
        .render_frame(camera.as_ref())
        .context("failed to render the demo frame")?;
    tracing::info!(
        visible = frame.visible,
        drawn = frame.drawn,
        skipped = frame.skipped,
        failed = frame.failed,
        "frame rendered"
    );

    let (x, y) = args
        .pixel
        .unwrap_or((graphics.resolution_width / 2, graphics.resolution_height / 2));
    let mut picker = ObjectColorPicker::with_settings(
        &mut backend,
        &scene,
        MaterialLibrary::with_builtins(),
        settings.render.picking.clone(),
    );
    match picker.pick(camera.as_ref(), x, y) {
        Some(hit) => {
            let name = scene.get(hit.id).map_or("<despawned>", |object| object.name());
            tracing::info!(x, y, id = hit.id.raw(), index = hit.index, %name, "picked");
        }
        None => tracing::info!(x, y, "nothing under pixel"),
    }
    let stats = picker.last_stats();
    tracing::debug!(
        encoded = stats.encoded,
        drawn = stats.drawn,
        skipped = stats.skipped,
        failed = stats.failed,
        truncated = stats.truncated,
        "picking pass"
    );

    if let Some(path) = &args.dump_pick {
        snapshot::write_ppm(&backend, target, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    Ok(())
}
