//! Board theme and layout policy knobs.

use std::time::Duration;

use crate::types::Color;

/// The color palette a board is drawn with.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub card: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub border: Color,
    pub link: Color,
}

impl Theme {
    /// A neutral gray ramp keyed by the usual 50..950 steps.
    pub fn neutral(step: u32) -> Color {
        let value = match step {
            50 => 0.98,
            100 => 0.96,
            200 => 0.90,
            300 => 0.83,
            400 => 0.64,
            500 => 0.45,
            600 => 0.32,
            700 => 0.25,
            800 => 0.15,
            900 => 0.09,
            950 => 0.04,
            _ => 0.45,
        };
        Color::new(value, value, value, 1.0)
    }

    /// The note card sits slightly above the regular card surface.
    pub fn note_fill(&self) -> Color {
        Color::new(
            (self.card.r + 0.03).min(1.0),
            (self.card.g + 0.03).min(1.0),
            (self.card.b + 0.03).min(1.0),
            self.card.a,
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Self::neutral(900),
            card: Self::neutral(800),
            text_primary: Self::neutral(50),
            text_secondary: Self::neutral(400),
            border: Self::neutral(700),
            link: Color::new(0.4, 0.7, 1.0, 1.0),
        }
    }
}

/// Every sizing and spacing constant that shapes an assembled board.
#[derive(Debug, Clone)]
pub struct LayoutPolicy {
    pub root_padding: f32,
    pub root_spacing: f32,
    pub root_corner_radius: f32,
    pub header_spacing: f32,
    pub title_max_chars: usize,
    pub title_font_size: f32,
    pub url_font_size: f32,
    pub section_spacing: f32,
    pub section_title_font_size: f32,
    pub swatch_size: f32,
    pub swatch_corner_radius: f32,
    pub swatch_spacing: f32,
    pub swatch_caption_font_size: f32,
    pub color_row_max: usize,
    pub row_spacing: f32,
    pub font_card_width: f32,
    pub font_card_padding: f32,
    pub font_card_corner_radius: f32,
    pub font_card_spacing: f32,
    pub font_name_font_size: f32,
    pub font_weights_font_size: f32,
    pub specimen_font_size: f32,
    pub image_row_capacity: usize,
    pub image_column_width: f32,
    pub image_column_spacing: f32,
    pub image_corner_radius: f32,
    pub image_caption_font_size: f32,
    pub icon_box: (f32, f32),
    pub background_box: (f32, f32),
    pub raster_box: (f32, f32),
    pub note_width: f32,
    pub note_text_width: f32,
    pub note_padding: f32,
    pub note_corner_radius: f32,
    pub note_spacing: f32,
    pub note_font_size: f32,
    pub footer_spacing: f32,
    pub footer_font_size: f32,
    pub border_weight: f32,
    pub raster_timeout: Duration,
}

impl LayoutPolicy {
    /// Color rows shrink to the item count when fewer than the cap.
    pub fn color_row_capacity(&self, count: usize) -> usize {
        self.color_row_max.min(count)
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self {
            root_padding: 24.0,
            root_spacing: 24.0,
            root_corner_radius: 16.0,
            header_spacing: 6.0,
            title_max_chars: 25,
            title_font_size: 20.0,
            url_font_size: 12.0,
            section_spacing: 12.0,
            section_title_font_size: 16.0,
            swatch_size: 50.0,
            swatch_corner_radius: 6.0,
            swatch_spacing: 6.0,
            swatch_caption_font_size: 9.0,
            color_row_max: 8,
            row_spacing: 12.0,
            font_card_width: 350.0,
            font_card_padding: 10.0,
            font_card_corner_radius: 8.0,
            font_card_spacing: 4.0,
            font_name_font_size: 14.0,
            font_weights_font_size: 11.0,
            specimen_font_size: 16.0,
            image_row_capacity: 4,
            image_column_width: 80.0,
            image_column_spacing: 6.0,
            image_corner_radius: 6.0,
            image_caption_font_size: 9.0,
            icon_box: (40.0, 40.0),
            background_box: (100.0, 60.0),
            raster_box: (80.0, 60.0),
            note_width: 350.0,
            note_text_width: 330.0,
            note_padding: 10.0,
            note_corner_radius: 6.0,
            note_spacing: 4.0,
            note_font_size: 11.0,
            footer_spacing: 4.0,
            footer_font_size: 9.0,
            border_weight: 1.0,
            raster_timeout: Duration::from_secs(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_row_capacity_caps_at_max() {
        let policy = LayoutPolicy::default();
        assert_eq!(policy.color_row_capacity(3), 3);
        assert_eq!(policy.color_row_capacity(8), 8);
        assert_eq!(policy.color_row_capacity(30), 8);
    }

    #[test]
    fn test_note_fill_sits_above_card() {
        let theme = Theme::default();
        let note = theme.note_fill();
        assert!(note.r > theme.card.r);
        assert!(note.r <= 1.0);
    }
}
