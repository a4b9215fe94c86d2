//! Visual node kinds placed on a board.
//!
//! Three kinds cover everything assembly produces: auto-layout containers,
//! fixed-size shapes, and single-style text runs.

use crate::types::{Align, Color, Direction, FontName, Paint, Sizing, Stroke, TextAlign};

/// The visual payload of a scene node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container(ContainerProps),
    Shape(ShapeProps),
    Text(TextProps),
}

impl NodeKind {
    /// The layer name shown in the document tree.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Container(p) => &p.name,
            NodeKind::Shape(p) => &p.name,
            NodeKind::Text(p) => &p.name,
        }
    }
}

/// An auto-layout frame that stacks its children along one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerProps {
    pub name: String,
    pub direction: Direction,
    /// Gap between consecutive children, in pixels.
    pub spacing: f32,
    /// Uniform padding on all four sides.
    pub padding: f32,
    pub width: Sizing,
    pub height: Sizing,
    /// Main-axis alignment of children.
    pub align: Align,
    /// Background fill; `None` renders fully transparent.
    pub fill: Option<Color>,
    pub corner_radius: f32,
}

impl ContainerProps {
    pub fn new(name: impl Into<String>, direction: Direction) -> Self {
        Self {
            name: name.into(),
            direction,
            spacing: 0.0,
            padding: 0.0,
            width: Sizing::Hug,
            height: Sizing::Hug,
            align: Align::Start,
            fill: None,
            corner_radius: 0.0,
        }
    }
}

/// A fixed-size rectangle, optionally rounded, filled and stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeProps {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub corner_radius: f32,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
}

impl ShapeProps {
    pub fn new(name: impl Into<String>, width: f32, height: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            corner_radius: 0.0,
            fill: None,
            stroke: None,
        }
    }
}

/// A single-style text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextProps {
    pub name: String,
    pub characters: String,
    pub font: FontName,
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub underline: bool,
    /// URL the text links to, if any.
    pub hyperlink: Option<String>,
    /// Wrap width; text grows downward when set.
    pub fixed_width: Option<f32>,
}

impl TextProps {
    pub fn new(name: impl Into<String>, characters: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: characters.into(),
            font: FontName::default(),
            font_size: 12.0,
            color: Color::WHITE,
            align: TextAlign::Left,
            underline: false,
            hyperlink: None,
            fixed_width: None,
        }
    }
}
