//! The capability seam between board assembly and a concrete document.
//!
//! Assembly code only ever talks to [`DocumentBackend`]. The in-memory
//! [`HeadlessDocument`](crate::document::HeadlessDocument) implements it for
//! tests and CLI runs; embedders bridge it to a live editor.

use crate::errors::{AssetError, FontUnavailable, ImportError};
use crate::node::{ContainerProps, ShapeProps, TextProps};
use crate::types::{FontName, ImageHandle, NodeId, Paint, Stroke};

/// Mutating operations a document must provide for a board to be
/// assembled into it.
pub trait DocumentBackend {
    /// Creates an auto-layout container node.
    fn create_container(&mut self, props: ContainerProps) -> NodeId;

    /// Creates a fixed-size shape node.
    fn create_shape(&mut self, props: ShapeProps) -> NodeId;

    /// Creates a text node.
    fn create_text(&mut self, props: TextProps) -> NodeId;

    /// Attaches `child` under `parent`. Call order is presentation order.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Registers encoded image bytes and returns a handle carrying the
    /// decoded pixel dimensions.
    fn create_image(&mut self, bytes: &[u8]) -> Result<ImageHandle, AssetError>;

    /// Replaces the fill of an existing node.
    fn set_fill(&mut self, node: NodeId, paint: Paint);

    /// Replaces the stroke of an existing node. `None` removes it.
    fn set_stroke(&mut self, node: NodeId, stroke: Option<Stroke>);

    /// Overrides the fixed size of a shape node.
    fn resize(&mut self, node: NodeId, width: f32, height: f32);

    /// Makes a font face available for text nodes.
    ///
    /// Probing is cheap; callers walk fallback chains by calling this
    /// until a face loads.
    fn load_font(&mut self, font: &FontName) -> Result<(), FontUnavailable>;

    /// Finalizes the subtree under `root`: computes layout and attaches it
    /// to the page.
    fn commit_to_page(&mut self, root: NodeId) -> Result<(), ImportError>;

    /// Moves `root` so its center lands on the viewport center.
    fn center_on_viewport(&mut self, root: NodeId);

    /// Selects `root` and scrolls/zooms the viewport to frame it.
    fn select_and_frame(&mut self, root: NodeId);
}
