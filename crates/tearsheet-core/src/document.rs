//! # Headless Document
//!
//! An in-memory [`DocumentBackend`] backed by the scene graph and layout
//! engine. It registers images by decoding their dimensions, tracks an
//! installed-font set for probe calls, and records page/viewport state so
//! tests and the CLI can assert on the assembled board.

use std::collections::HashSet;

use tracing::debug;

use crate::backend::DocumentBackend;
use crate::errors::{AssetError, FontUnavailable, ImportError};
use crate::layout::LayoutEngine;
use crate::node::{ContainerProps, NodeKind, ShapeProps, TextProps};
use crate::scene::SceneGraph;
use crate::types::{FontName, ImageHandle, NodeId, Paint, Point, Stroke};

/// An image registered with the document, kept with its encoded bytes.
pub struct RegisteredImage {
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

/// In-memory document: scene graph, layout engine and page bookkeeping.
pub struct HeadlessDocument {
    pub scene: SceneGraph,
    layout: LayoutEngine,
    images: Vec<RegisteredImage>,
    fonts: HashSet<FontName>,
    /// Every face ever probed through [`DocumentBackend::load_font`], in order.
    pub font_probes: Vec<FontName>,
    viewport_center: Point,
    page_children: Vec<NodeId>,
    selection: Vec<NodeId>,
    framed: Option<NodeId>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        let mut fonts = HashSet::new();
        fonts.insert(FontName::default());
        fonts.insert(FontName::new("Inter", "Medium"));
        Self {
            scene: SceneGraph::new(),
            layout: LayoutEngine::new(),
            images: Vec::new(),
            fonts,
            font_probes: Vec::new(),
            viewport_center: Point::new(0.0, 0.0),
            page_children: Vec::new(),
            selection: Vec::new(),
            framed: None,
        }
    }

    /// Marks a font face as installed so `load_font` probes succeed.
    pub fn insert_font(&mut self, font: FontName) {
        self.fonts.insert(font);
    }

    pub fn set_viewport_center(&mut self, center: Point) {
        self.viewport_center = center;
    }

    pub fn viewport_center(&self) -> Point {
        self.viewport_center
    }

    /// Roots committed to the page, in commit order.
    pub fn page_roots(&self) -> &[NodeId] {
        &self.page_children
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn framed(&self) -> Option<NodeId> {
        self.framed
    }

    pub fn image(&self, handle: &ImageHandle) -> Option<&RegisteredImage> {
        self.images.get(handle.id)
    }

    /// Depth-first search for a node by name under `root`.
    pub fn find_by_name(&self, root: NodeId, name: &str) -> Option<NodeId> {
        let node = self.scene.get_node(root)?;
        if node.kind.name() == name {
            return Some(root);
        }
        for child in &node.children {
            if let Some(found) = self.find_by_name(*child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Renders the subtree under `root` as an indented text outline.
    pub fn dump_tree(&self, root: NodeId) -> String {
        let mut out = String::new();
        self.dump_recursive(root, 0, &mut out);
        out
    }

    fn dump_recursive(&self, id: NodeId, depth: usize, out: &mut String) {
        if let Some(node) = self.scene.get_node(id) {
            let label = match &node.kind {
                NodeKind::Container(_) => "Container",
                NodeKind::Shape(_) => "Shape",
                NodeKind::Text(_) => "Text",
            };
            let rect = node.layout_rect;
            out.push_str(&format!(
                "{}{} [{}] Rect(x:{:.1}, y:{:.1}, w:{:.1}, h:{:.1})\n",
                "  ".repeat(depth),
                node.kind.name(),
                label,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
            ));
            for child in &node.children {
                self.dump_recursive(*child, depth + 1, out);
            }
        }
    }
}

impl Default for HeadlessDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBackend for HeadlessDocument {
    fn create_container(&mut self, props: ContainerProps) -> NodeId {
        self.scene.add_node(NodeKind::Container(props))
    }

    fn create_shape(&mut self, props: ShapeProps) -> NodeId {
        self.scene.add_node(NodeKind::Shape(props))
    }

    fn create_text(&mut self, props: TextProps) -> NodeId {
        self.scene.add_node(NodeKind::Text(props))
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.scene.add_child(parent, child);
    }

    fn create_image(&mut self, bytes: &[u8]) -> Result<ImageHandle, AssetError> {
        use image::GenericImageView;
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AssetError::DecodeFailed(e.to_string()))?;
        let (width, height) = decoded.dimensions();
        let id = self.images.len();
        self.images.push(RegisteredImage {
            width,
            height,
            bytes: bytes.to_vec(),
        });
        Ok(ImageHandle { id, width, height })
    }

    fn set_fill(&mut self, node: NodeId, paint: Paint) {
        if let Some(node) = self.scene.get_node_mut(node) {
            match (&mut node.kind, paint) {
                (NodeKind::Container(props), Paint::Solid(color)) => {
                    props.fill = Some(color);
                }
                (NodeKind::Shape(props), paint) => props.fill = Some(paint),
                (NodeKind::Text(props), Paint::Solid(color)) => props.color = color,
                _ => {}
            }
        }
    }

    fn set_stroke(&mut self, node: NodeId, stroke: Option<Stroke>) {
        if let Some(node) = self.scene.get_node_mut(node) {
            if let NodeKind::Shape(props) = &mut node.kind {
                props.stroke = stroke;
            }
        }
    }

    fn resize(&mut self, node: NodeId, width: f32, height: f32) {
        if let Some(node) = self.scene.get_node_mut(node) {
            if let NodeKind::Shape(props) = &mut node.kind {
                props.width = width;
                props.height = height;
            }
        }
    }

    fn load_font(&mut self, font: &FontName) -> Result<(), FontUnavailable> {
        self.font_probes.push(font.clone());
        if self.fonts.contains(font) {
            Ok(())
        } else {
            Err(FontUnavailable {
                family: font.family.clone(),
                style: font.style.clone(),
            })
        }
    }

    fn commit_to_page(&mut self, root: NodeId) -> Result<(), ImportError> {
        if self.scene.get_node(root).is_none() {
            return Err(ImportError::Backend(format!("unknown node id {root}")));
        }
        self.layout
            .solve(&mut self.scene, root)
            .map_err(|e| ImportError::Backend(e.to_string()))?;
        self.page_children.push(root);
        debug!(root, "committed board to page");
        Ok(())
    }

    fn center_on_viewport(&mut self, root: NodeId) {
        let center = self.viewport_center;
        if let Some(node) = self.scene.get_node_mut(root) {
            node.layout_rect.x = center.x - node.layout_rect.width / 2.0;
            node.layout_rect.y = center.y - node.layout_rect.height / 2.0;
        }
    }

    fn select_and_frame(&mut self, root: NodeId) {
        self.selection = vec![root];
        self.framed = Some(root);
    }
}
