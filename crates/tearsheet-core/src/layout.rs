//! # Layout System
//!
//! ## Responsibilities
//! - Mirror the scene graph into a Taffy flexbox tree.
//! - Solve auto-layout (hug/fixed sizing, gaps, padding, alignment).
//! - Write solved rectangles back onto the scene nodes.
//!
//! Text is measured with nominal glyph metrics so hug containers size
//! deterministically without a font rasterizer in the loop.

use std::collections::HashMap;

use taffy::prelude::*;
use tracing::instrument;

use crate::node::{NodeKind, TextProps};
use crate::scene::SceneGraph;
use crate::types::{Align, Direction, NodeId, Rect, Sizing};

/// Nominal advance width of one glyph, as a fraction of the font size.
const GLYPH_ADVANCE_EM: f32 = 0.6;
/// Nominal line height, as a fraction of the font size.
const LINE_HEIGHT_EM: f32 = 1.2;

/// Solves flexbox layout for a scene graph and writes the results back.
pub struct LayoutEngine {
    taffy: TaffyTree<NodeId>,
    node_map: HashMap<NodeId, taffy::NodeId>,
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            node_map: HashMap::new(),
        }
    }

    /// Computes layout for the subtree under `root` and stores the solved
    /// rectangle on every scene node. Coordinates are parent-relative,
    /// except the root which stays at the origin until positioned.
    #[instrument(level = "debug", skip(self, scene))]
    pub fn solve(&mut self, scene: &mut SceneGraph, root: NodeId) -> Result<(), taffy::TaffyError> {
        // Phase A: ensure every scene node has a Taffy twin with a fresh style.
        for (id, node) in scene.nodes.iter().enumerate() {
            let style = node_style(&node.kind);
            if let Some(taffy_id) = self.node_map.get(&id) {
                self.taffy.set_style(*taffy_id, style)?;
            } else {
                let taffy_id = self.taffy.new_leaf_with_context(style, id)?;
                self.node_map.insert(id, taffy_id);
            }
        }

        // Phase B: mirror the hierarchy.
        for (id, node) in scene.nodes.iter().enumerate() {
            let children: Vec<taffy::NodeId> = node
                .children
                .iter()
                .filter_map(|child| self.node_map.get(child).copied())
                .collect();
            if let Some(taffy_id) = self.node_map.get(&id) {
                self.taffy.set_children(*taffy_id, &children)?;
            }
        }

        if let Some(&root_taffy) = self.node_map.get(&root) {
            self.taffy.compute_layout_with_measure(
                root_taffy,
                Size {
                    width: AvailableSpace::MaxContent,
                    height: AvailableSpace::MaxContent,
                },
                |known: Size<Option<f32>>,
                 _available: Size<AvailableSpace>,
                 _taffy_id: taffy::NodeId,
                 context: Option<&mut NodeId>,
                 _style: &Style| {
                    if let Some(id) = context {
                        if let Some(node) = scene.get_node(*id) {
                            if let NodeKind::Text(props) = &node.kind {
                                return measure_text(props, known);
                            }
                        }
                    }
                    Size::ZERO
                },
            )?;

            self.write_back_recursive(scene, root);
        }
        Ok(())
    }

    fn write_back_recursive(&self, scene: &mut SceneGraph, id: NodeId) {
        if let Some(&taffy_id) = self.node_map.get(&id) {
            if let Ok(layout) = self.taffy.layout(taffy_id) {
                let rect = Rect::from_xywh(
                    layout.location.x,
                    layout.location.y,
                    layout.size.width,
                    layout.size.height,
                );
                if let Some(node) = scene.get_node_mut(id) {
                    node.layout_rect = rect;
                }
            }
        }
        let children = scene
            .get_node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default();
        for child in children {
            self.write_back_recursive(scene, child);
        }
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn node_style(kind: &NodeKind) -> Style {
    match kind {
        NodeKind::Container(props) => {
            let gap = LengthPercentage::length(props.spacing);
            let pad = LengthPercentage::length(props.padding);
            Style {
                display: Display::Flex,
                flex_direction: match props.direction {
                    Direction::Vertical => FlexDirection::Column,
                    Direction::Horizontal => FlexDirection::Row,
                },
                justify_content: Some(match props.align {
                    Align::Start => JustifyContent::FlexStart,
                    Align::Center => JustifyContent::Center,
                }),
                // Counter-axis pins to the start; stretch would inflate
                // hug-sized siblings.
                align_items: Some(AlignItems::FlexStart),
                gap: Size {
                    width: gap,
                    height: gap,
                },
                padding: taffy::geometry::Rect {
                    left: pad,
                    right: pad,
                    top: pad,
                    bottom: pad,
                },
                size: Size {
                    width: dimension(props.width),
                    height: dimension(props.height),
                },
                flex_shrink: 0.0,
                ..Style::DEFAULT
            }
        }
        NodeKind::Shape(props) => Style {
            size: Size {
                width: Dimension::length(props.width),
                height: Dimension::length(props.height),
            },
            flex_shrink: 0.0,
            ..Style::DEFAULT
        },
        NodeKind::Text(_) => Style {
            flex_shrink: 0.0,
            ..Style::DEFAULT
        },
    }
}

fn dimension(sizing: Sizing) -> Dimension {
    match sizing {
        Sizing::Hug => Dimension::auto(),
        Sizing::Fixed(value) => Dimension::length(value),
    }
}

/// Measures text with nominal metrics: a fixed advance per glyph and a
/// fixed line height, wrapping when a width constraint is imposed.
fn measure_text(props: &TextProps, known: Size<Option<f32>>) -> Size<f32> {
    let advance = props.font_size * GLYPH_ADVANCE_EM;
    let line = props.font_size * LINE_HEIGHT_EM;
    let glyphs = props.characters.chars().count().max(1) as f32;
    let natural = glyphs * advance;

    let constrained = known.width.or(props.fixed_width);
    match constrained {
        Some(width) if width > 0.0 => {
            let lines = (natural / width).ceil().max(1.0);
            Size {
                width,
                height: lines * line,
            }
        }
        _ => Size {
            width: natural,
            height: line,
        },
    }
}
