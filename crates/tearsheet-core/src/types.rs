//! # Types Module
//!
//! Shared data types used across the importer.
//!
//! ## Responsibilities
//! - **Color**: RGBA color representation with hex conversion.
//! - **Geometry**: `Point` and `Rect` in page coordinates.
//! - **Paint**: Solid and image fills, plus strokes.
//!
//! ## Key Types
//! - `Color`: Float-based RGBA color.
//! - `FontName`: A family/style pair as document backends name faces.
//! - `NodeId`: Type alias for arena indices (`usize`).

use serde::{Deserialize, Serialize};

/// A unique identifier for a node in the scene graph.
pub type NodeId = usize;

/// Handle to pixel data registered with a document backend.
///
/// Carries the native dimensions so callers can clamp shapes without
/// another backend round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub id: usize,
    pub width: u32,
    pub height: u32,
}

// --- Geometry ---

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle.
///
/// Layout writes these parent-relative; only the committed root is
/// absolute on the page.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// --- Color ---

/// Represents a RGBA color in float format (0.0 - 1.0).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rrggbb`, `rrggbb` or `#rgb` (case-insensitive).
    ///
    /// Returns `None` for anything else; callers decide how to degrade.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let (r, g, b) = match digits.len() {
            6 => (
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            ),
            3 => (
                u8::from_str_radix(&digits[0..1], 16).ok()? * 17,
                u8::from_str_radix(&digits[1..2], 16).ok()? * 17,
                u8::from_str_radix(&digits[2..3], 16).ok()? * 17,
            ),
            _ => return None,
        };
        Some(Color::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            1.0,
        ))
    }

    /// Formats as lowercase `#rrggbb`. Alpha is not carried.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// --- Typography ---

/// A font family/style pair as the document backend names faces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

impl FontName {
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

impl std::fmt::Display for FontName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.family, self.style)
    }
}

impl Default for FontName {
    /// The face every board relies on being present.
    fn default() -> Self {
        Self::new("Inter", "Regular")
    }
}

// --- Paint ---

/// Fill applied to a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Pixel data previously registered with the backend.
    Image(ImageHandle),
}

/// A solid border.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub weight: f32,
}

// --- Layout Inputs ---

/// Stacking direction of an auto-layout container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Vertical,
    Horizontal,
}

/// How a container sizes itself along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Sizing {
    /// Grow to fit content.
    #[default]
    Hug,
    /// Fixed length in pixels.
    Fixed(f32),
}

/// Main-axis alignment of a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
}

/// Horizontal alignment of glyphs inside a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_is_case_insensitive() {
        let color = Color::from_hex("#1A2B3C").unwrap();
        assert_eq!(color.to_hex(), "#1a2b3c");
        assert_eq!(Color::from_hex("1a2b3c"), Some(color));
    }

    #[test]
    fn test_hex_shorthand_expands() {
        assert_eq!(Color::from_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#000"), Some(Color::BLACK));
        assert_eq!(Color::from_hex("f80"), Color::from_hex("#ff8800"));
    }

    #[test]
    fn test_hex_rejects_garbage() {
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("zzzzzz"), None);
        assert_eq!(Color::from_hex("#ff88"), None);
        // Multi-byte input must not panic on byte slicing.
        assert_eq!(Color::from_hex("#ф00"), None);
    }
}
