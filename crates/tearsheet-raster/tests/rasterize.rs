use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use image::GenericImageView;
use tearsheet_core::errors::RasterError;
use tearsheet_core::raster::RasterBridge;
use tearsheet_core::AssetFetcher;
use tearsheet_raster::{spawn, RasterContext};

struct MapFetcher {
    files: HashMap<String, Vec<u8>>,
}

impl AssetFetcher for MapFetcher {
    fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>> {
        self.files
            .get(source)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such asset: {source}"))
    }
}

const WIDE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#ff7f2a"/></svg>"##;
const SMALL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5"><rect width="10" height="5" fill="#3355ff"/></svg>"##;

fn context_with(files: &[(&str, &str)]) -> (RasterBridge, RasterContext) {
    let mut map = HashMap::new();
    for (name, content) in files {
        map.insert(name.to_string(), content.as_bytes().to_vec());
    }
    spawn(
        Arc::new(MapFetcher { files: map }),
        Duration::from_secs(2),
    )
}

#[test]
fn test_svg_fits_bounding_box_preserving_aspect() {
    let (mut bridge, context) = context_with(&[("wide.svg", WIDE_SVG)]);

    let converted = bridge.convert("wide.svg", 40.0, 40.0).unwrap();
    assert_eq!((converted.width, converted.height), (40, 20));

    let decoded = image::load_from_memory(&converted.pixel_data).unwrap();
    assert_eq!(decoded.dimensions(), (40, 20));

    drop(bridge);
    context.close();
}

#[test]
fn test_svg_is_not_upscaled() {
    let (mut bridge, context) = context_with(&[("small.svg", SMALL_SVG)]);

    let converted = bridge.convert("small.svg", 80.0, 60.0).unwrap();
    assert_eq!((converted.width, converted.height), (10, 5));

    drop(bridge);
    context.close();
}

#[test]
fn test_missing_asset_reports_failure() {
    let (mut bridge, context) = context_with(&[]);

    let result = bridge.convert("missing.svg", 40.0, 40.0);
    assert!(matches!(result, Err(RasterError::Failed(_))));

    drop(bridge);
    context.close();
}

#[test]
fn test_invalid_svg_reports_failure() {
    let (mut bridge, context) = context_with(&[("broken.svg", "<svg")]);

    let result = bridge.convert("broken.svg", 40.0, 40.0);
    assert!(matches!(result, Err(RasterError::Failed(_))));

    drop(bridge);
    context.close();
}

#[test]
fn test_sequential_requests_stay_correlated() {
    let (mut bridge, context) =
        context_with(&[("wide.svg", WIDE_SVG), ("small.svg", SMALL_SVG)]);

    let first = bridge.convert("wide.svg", 40.0, 40.0).unwrap();
    assert_eq!((first.width, first.height), (40, 20));

    let second = bridge.convert("small.svg", 80.0, 60.0).unwrap();
    assert_eq!((second.width, second.height), (10, 5));

    let third = bridge.convert("wide.svg", 100.0, 60.0).unwrap();
    assert_eq!((third.width, third.height), (100, 50));

    let failed = bridge.convert("missing.svg", 40.0, 40.0);
    assert!(matches!(failed, Err(RasterError::Failed(_))));

    drop(bridge);
    context.close();
}
