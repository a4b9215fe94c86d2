//! # Tearsheet Raster
//!
//! Off-thread SVG rasterization behind the channel protocol from
//! [`tearsheet_core::raster`]. This crate owns the only link to the SVG
//! stack; consumers hold a [`RasterBridge`] and never touch usvg
//! directly, so a headless import can skip spawning the worker entirely.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, unbounded};
use tearsheet_core::raster::{
    ConvertedImage, RasterBridge, RasterOutcome, RasterRequest, RasterResponse,
};
use tearsheet_core::types::FontName;
use tearsheet_core::AssetFetcher;
use tracing::{debug, instrument, warn};

/// Handle to the worker thread. Joining it requires the paired
/// [`RasterBridge`] to be dropped first so the request channel closes.
pub struct RasterContext {
    handle: Option<JoinHandle<()>>,
}

impl RasterContext {
    /// Waits for the worker to drain its queue and exit.
    pub fn close(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for RasterContext {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns the rasterization worker and returns the client bridge plus a
/// join handle wrapper. The worker loads system fonts once and serves
/// requests until the bridge is dropped.
pub fn spawn(fetcher: Arc<dyn AssetFetcher>, timeout: Duration) -> (RasterBridge, RasterContext) {
    let (req_tx, req_rx) = unbounded::<RasterRequest>();
    let (resp_tx, resp_rx) = bounded::<RasterResponse>(5);

    let handle = thread::spawn(move || {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();

        for request in req_rx {
            let outcome = match rasterize(fetcher.as_ref(), &options, &request) {
                Ok(image) => RasterOutcome::Converted(image),
                Err(e) => {
                    warn!(source = %request.source, "rasterization failed: {e:#}");
                    RasterOutcome::Failed {
                        error: format!("{e:#}"),
                    }
                }
            };
            let response = RasterResponse {
                request_id: request.request_id,
                outcome,
            };
            if resp_tx.send(response).is_err() {
                break;
            }
        }
        debug!("rendering context shut down");
    });

    (
        RasterBridge::new(req_tx, resp_rx, timeout),
        RasterContext {
            handle: Some(handle),
        },
    )
}

#[instrument(level = "debug", skip(fetcher, options, request), fields(source = %request.source))]
fn rasterize(
    fetcher: &dyn AssetFetcher,
    options: &usvg::Options,
    request: &RasterRequest,
) -> Result<ConvertedImage> {
    let bytes = fetcher.fetch_bytes(&request.source)?;
    let tree = usvg::Tree::from_data(&bytes, options).context("parse SVG")?;
    let size = tree.size();

    // Fit inside the bounding box, never upscale past intrinsic size.
    let scale = (request.max_width / size.width())
        .min(request.max_height / size.height())
        .min(1.0);
    let width = ((size.width() * scale).round() as u32).max(1);
    let height = ((size.height() * scale).round() as u32).max(1);

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow::anyhow!("could not allocate {}x{} pixmap", width, height))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    let pixel_data = pixmap.encode_png().context("encode PNG")?;

    Ok(ConvertedImage {
        pixel_data,
        width,
        height,
    })
}

/// Enumerates the faces installed on this system as family/style pairs,
/// sorted and deduplicated.
pub fn system_fonts() -> Vec<FontName> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let mut fonts: Vec<FontName> = db
        .faces()
        .filter_map(|face| {
            let family = face.families.first().map(|(name, _)| name.clone())?;
            Some(FontName::new(family, face_style(face.weight, face.style)))
        })
        .collect();
    fonts.sort_by(|a, b| (&a.family, &a.style).cmp(&(&b.family, &b.style)));
    fonts.dedup();
    fonts
}

fn face_style(weight: usvg::fontdb::Weight, style: usvg::fontdb::Style) -> String {
    let label = match weight.0 {
        100 => "Thin",
        200 => "Extra Light",
        300 => "Light",
        400 => "Regular",
        500 => "Medium",
        600 => "Semi Bold",
        700 => "Bold",
        800 => "Extra Bold",
        900 => "Black",
        _ => "Regular",
    };
    let italic = !matches!(style, usvg::fontdb::Style::Normal);
    match (label, italic) {
        (label, false) => label.to_string(),
        ("Regular", true) => "Italic".to_string(),
        (label, true) => format!("{label} Italic"),
    }
}
