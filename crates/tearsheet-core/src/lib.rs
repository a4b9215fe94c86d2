//! # Tearsheet Core
//!
//! Scene graph, layout engine and the document seam for assembling
//! design-capture boards.
//!
//! ## Core Features
//! - **Scene Graph**: containers, shapes and text nodes in a flat arena.
//! - **Layout**: flexbox auto-layout (hug/fixed sizing, gaps, padding)
//!   solved through Taffy with nominal text metrics.
//! - **Document Seam**: the [`DocumentBackend`] trait plus a headless
//!   implementation for tests and CLI runs.
//! - **Fonts**: family normalization, weight labels and a fallback-chain
//!   resolver with a per-run cache.
//! - **Rasterization Protocol**: channel types and a correlating bridge
//!   for off-thread vector conversion.
//!
//! ## Usage
//!
//! ```
//! use tearsheet_core::document::HeadlessDocument;
//! use tearsheet_core::node::ContainerProps;
//! use tearsheet_core::types::Direction;
//! use tearsheet_core::DocumentBackend;
//!
//! let mut document = HeadlessDocument::new();
//! let root = document.create_container(ContainerProps::new("Board", Direction::Vertical));
//! document.commit_to_page(root).unwrap();
//! assert_eq!(document.page_roots(), &[root]);
//! ```

use std::path::PathBuf;

use anyhow::Result;
use tracing::instrument;

/// The document seam assembly code writes through.
pub mod backend;
/// In-memory backend used by tests and the CLI.
pub mod document;
pub mod errors;
/// Font normalization and fallback resolution.
pub mod fonts;
/// Row-major grid planning.
pub mod grid;
/// Flexbox layout solving over the scene graph.
pub mod layout;
/// Node kinds and their properties.
pub mod node;
/// Channel protocol for off-thread rasterization.
pub mod raster;
/// The scene graph arena.
pub mod scene;
/// Theme palette and layout policy.
pub mod theme;
/// Shared geometry, color and typography types.
pub mod types;

pub use backend::DocumentBackend;
pub use document::HeadlessDocument;
pub use errors::{AssetError, FontUnavailable, ImportError, RasterError};

/// Fetches raw bytes for an asset source string.
pub trait AssetFetcher: Send + Sync {
    fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>>;
}

/// Resolves sources against the filesystem, with a configurable root for
/// relative paths.
pub struct FsAssetFetcher {
    root: PathBuf,
}

impl FsAssetFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetFetcher for FsAssetFetcher {
    #[instrument(level = "debug", skip(self), fields(source = source))]
    fn fetch_bytes(&self, source: &str) -> Result<Vec<u8>> {
        let direct = PathBuf::from(source);
        if direct.is_absolute() {
            return std::fs::read(&direct)
                .map_err(|e| anyhow::anyhow!("failed to read asset '{}': {}", source, e));
        }
        if let Ok(bytes) = std::fs::read(&direct) {
            return Ok(bytes);
        }
        let rooted = self.root.join(source);
        std::fs::read(&rooted).map_err(|e| {
            anyhow::anyhow!(
                "asset not found: {} (checked '{}' and '{}'): {}",
                source,
                direct.display(),
                rooted.display(),
                e
            )
        })
    }
}
