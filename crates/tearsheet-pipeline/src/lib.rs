//! # Tearsheet Pipeline
//!
//! Turns a parsed capture payload into a board on a [`DocumentBackend`]:
//! header, color swatches, typography cards, image grid, note card and
//! footer, assembled in one pass. Individual items degrade to bordered
//! placeholders instead of failing the import.

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use tearsheet_core::backend::DocumentBackend;
use tearsheet_core::errors::{AssetError, ImportError};
use tearsheet_core::fonts::{self, FontResolver};
use tearsheet_core::grid;
use tearsheet_core::node::{ContainerProps, ShapeProps, TextProps};
use tearsheet_core::raster::RasterBridge;
use tearsheet_core::theme::{LayoutPolicy, Theme};
use tearsheet_core::types::{
    Align, Color, Direction, FontName, NodeId, Paint, Sizing, Stroke, TextAlign,
};
use tearsheet_core::AssetFetcher;
use tearsheet_schema::{ColorUnit, DesignDocument, FontUnit, ImageKind, ImageUnit};

use crate::shell::{ShellEvent, ShellNotifier};

pub mod shell;

/// What an import produced, for logs and machine-readable output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    /// Root node of the assembled board.
    pub root: NodeId,
    pub nodes_created: usize,
    pub colors: usize,
    pub fonts: usize,
    pub images: usize,
    /// Items that fell back to a placeholder or default fill.
    pub degraded_items: usize,
}

/// True when a source string names an SVG document.
pub fn is_vector_source(source: &str) -> bool {
    source.to_ascii_lowercase().contains(".svg")
}

/// Inline and empty sources carry no fetchable bytes. They keep their
/// placeholder without counting as degraded.
fn is_inline_source(source: &str) -> bool {
    source.is_empty() || source.starts_with("data:") || source.starts_with("blob:")
}

/// Assembles the full board for `document` and commits it to the page.
///
/// `raster` is optional: without it every vector source degrades to a
/// placeholder but the import still succeeds.
#[instrument(level = "info", skip_all, fields(url = %document.page.url))]
pub fn import_design(
    document: &DesignDocument,
    backend: &mut dyn DocumentBackend,
    fetcher: &dyn AssetFetcher,
    raster: Option<&mut RasterBridge>,
    notifier: &dyn ShellNotifier,
    policy: &LayoutPolicy,
    theme: &Theme,
) -> Result<ImportSummary, ImportError> {
    let mut assembler = Assembler {
        backend,
        fetcher,
        raster,
        notifier,
        policy,
        theme,
        resolver: FontResolver::new(),
        nodes_created: 0,
        degraded_items: 0,
    };
    assembler.run(document)
}

struct Assembler<'a> {
    backend: &'a mut dyn DocumentBackend,
    fetcher: &'a dyn AssetFetcher,
    raster: Option<&'a mut RasterBridge>,
    notifier: &'a dyn ShellNotifier,
    policy: &'a LayoutPolicy,
    theme: &'a Theme,
    resolver: FontResolver,
    nodes_created: usize,
    degraded_items: usize,
}

impl<'a> Assembler<'a> {
    fn run(&mut self, document: &DesignDocument) -> Result<ImportSummary, ImportError> {
        self.notifier.notify(ShellEvent::ReportVisibility(true));

        // Base faces for headings and body text. A miss is survivable,
        // the backend substitutes whatever it has.
        for font in [FontName::new("Inter", "Medium"), FontName::default()] {
            if let Err(missing) = self.backend.load_font(&font) {
                warn!(%missing, "base face unavailable, text may substitute");
            }
        }

        let root = self.build_root(document);
        let header = self.build_header(document);
        self.backend.append_child(root, header);

        if let Some(colors) = document.units.colors.as_deref() {
            if !colors.is_empty() {
                let section = self.build_colors(colors);
                self.backend.append_child(root, section);
            }
        }
        if let Some(font_units) = document.units.fonts.as_deref() {
            if !font_units.is_empty() {
                let section = self.build_fonts(font_units);
                self.backend.append_child(root, section);
            }
        }
        if let Some(images) = document.units.images.as_deref() {
            if !images.is_empty() {
                let section = self.build_images(images);
                self.backend.append_child(root, section);
                let note = self.build_note();
                self.backend.append_child(root, note);
            }
        }

        let footer = self.build_footer();
        self.backend.append_child(root, footer);

        self.backend.commit_to_page(root)?;
        self.backend.center_on_viewport(root);
        self.backend.select_and_frame(root);
        self.notifier.notify(ShellEvent::ReportVisibility(false));

        let report = document.report();
        let summary = ImportSummary {
            root,
            nodes_created: self.nodes_created,
            colors: report.colors,
            fonts: report.fonts,
            images: report.images,
            degraded_items: self.degraded_items,
        };
        info!(
            nodes = summary.nodes_created,
            degraded = summary.degraded_items,
            "board assembled"
        );
        Ok(summary)
    }

    // --- Node helpers ---

    fn container(&mut self, props: ContainerProps) -> NodeId {
        self.nodes_created += 1;
        self.backend.create_container(props)
    }

    fn shape(&mut self, props: ShapeProps) -> NodeId {
        self.nodes_created += 1;
        self.backend.create_shape(props)
    }

    fn text(&mut self, props: TextProps) -> NodeId {
        self.nodes_created += 1;
        self.backend.create_text(props)
    }

    fn section(&mut self, name: &str) -> NodeId {
        let mut props = ContainerProps::new(name, Direction::Vertical);
        props.spacing = self.policy.section_spacing;
        self.container(props)
    }

    fn section_heading(&mut self, characters: String) -> NodeId {
        let mut props = TextProps::new("Section Title", characters);
        props.font = FontName::new("Inter", "Medium");
        props.font_size = self.policy.section_title_font_size;
        props.color = self.theme.text_primary;
        self.text(props)
    }

    // --- Board skeleton ---

    fn build_root(&mut self, document: &DesignDocument) -> NodeId {
        let title = truncate_title(&document.page.title, self.policy.title_max_chars);
        let mut props = ContainerProps::new(
            format!("[{}] — {}", title, document.page.url),
            Direction::Vertical,
        );
        props.padding = self.policy.root_padding;
        props.spacing = self.policy.root_spacing;
        props.corner_radius = self.policy.root_corner_radius;
        props.fill = Some(self.theme.background);
        self.container(props)
    }

    fn build_header(&mut self, document: &DesignDocument) -> NodeId {
        let mut props = ContainerProps::new("Header", Direction::Vertical);
        props.spacing = self.policy.header_spacing;
        let header = self.container(props);

        // The header title carries the full page title, only the board
        // name clips it.
        let mut title = TextProps::new("Title", document.page.title.clone());
        title.font = FontName::new("Inter", "Medium");
        title.font_size = self.policy.title_font_size;
        title.color = self.theme.text_primary;
        let title = self.text(title);
        self.backend.append_child(header, title);

        let mut url = TextProps::new("Source Link", document.page.url.clone());
        url.font_size = self.policy.url_font_size;
        url.color = self.theme.link;
        url.underline = true;
        url.hyperlink = Some(document.page.url.clone());
        let url = self.text(url);
        self.backend.append_child(header, url);

        header
    }

    // --- Colors ---

    fn build_colors(&mut self, colors: &[ColorUnit]) -> NodeId {
        let section = self.section("Colors");
        let heading = self.section_heading(format!("Colors ({})", colors.len()));
        self.backend.append_child(section, heading);

        let capacity = self.policy.color_row_capacity(colors.len());
        let rows = grid::plan(colors.iter().collect(), capacity);
        for (i, row) in rows.into_iter().enumerate() {
            let mut props =
                ContainerProps::new(format!("Color Row {}", i + 1), Direction::Horizontal);
            props.spacing = self.policy.row_spacing;
            let row_node = self.container(props);
            for unit in row {
                let item = self.build_color_item(unit);
                self.backend.append_child(row_node, item);
            }
            self.backend.append_child(section, row_node);
        }
        section
    }

    fn build_color_item(&mut self, unit: &ColorUnit) -> NodeId {
        let mut props = ContainerProps::new(unit.value.clone(), Direction::Vertical);
        props.spacing = self.policy.swatch_spacing;
        props.align = Align::Center;
        let item = self.container(props);

        let fill = match Color::from_hex(&unit.value) {
            Some(color) => color,
            None => {
                self.degraded_items += 1;
                warn!(value = %unit.value, "unparsable color value, using card fill");
                self.theme.card
            }
        };
        let mut swatch = ShapeProps::new(
            unit.value.clone(),
            self.policy.swatch_size,
            self.policy.swatch_size,
        );
        swatch.corner_radius = self.policy.swatch_corner_radius;
        swatch.fill = Some(Paint::Solid(fill));
        // Low-contrast colors would melt into the board without a border.
        if !unit.is_contrasted {
            swatch.stroke = Some(Stroke {
                color: self.theme.border,
                weight: self.policy.border_weight,
            });
        }
        let swatch = self.shape(swatch);
        self.backend.append_child(item, swatch);

        let mut caption = TextProps::new("Hex", unit.value.to_uppercase());
        caption.font_size = self.policy.swatch_caption_font_size;
        caption.color = self.theme.text_secondary;
        caption.align = TextAlign::Center;
        let caption = self.text(caption);
        self.backend.append_child(item, caption);

        item
    }

    // --- Fonts ---

    fn build_fonts(&mut self, font_units: &[FontUnit]) -> NodeId {
        let section = self.section("Fonts");
        let heading = self.section_heading(format!("Typography ({})", font_units.len()));
        self.backend.append_child(section, heading);

        for unit in font_units {
            let card = self.build_font_card(unit);
            self.backend.append_child(section, card);
        }
        section
    }

    fn build_font_card(&mut self, unit: &FontUnit) -> NodeId {
        let mut props = ContainerProps::new(unit.family.clone(), Direction::Vertical);
        props.width = Sizing::Fixed(self.policy.font_card_width);
        props.padding = self.policy.font_card_padding;
        props.corner_radius = self.policy.font_card_corner_radius;
        props.spacing = self.policy.font_card_spacing;
        props.fill = Some(self.theme.card);
        let card = self.container(props);

        let family = fonts::normalize_family(&unit.family);
        let face = self.resolver.resolve(&mut *self.backend, &unit.family);
        debug!(family = %family, face = %face, "resolved specimen face");

        let mut name = TextProps::new("Font Name", family.clone());
        name.font = FontName::new("Inter", "Medium");
        name.font_size = self.policy.font_name_font_size;
        name.color = self.theme.text_primary;
        let name = self.text(name);
        self.backend.append_child(card, name);

        let labels: Vec<&str> = unit.weights.iter().map(|w| fonts::weight_label(w)).collect();
        let mut weights = TextProps::new("Weights", labels.join(", "));
        weights.font_size = self.policy.font_weights_font_size;
        weights.color = self.theme.text_secondary;
        let weights = self.text(weights);
        self.backend.append_child(card, weights);

        let mut specimen = TextProps::new("Specimen", family);
        specimen.font = face;
        specimen.font_size = self.policy.specimen_font_size;
        specimen.color = self.theme.text_primary;
        let specimen = self.text(specimen);
        self.backend.append_child(card, specimen);

        card
    }

    // --- Images ---

    fn build_images(&mut self, images: &[ImageUnit]) -> NodeId {
        let section = self.section("Images");
        let heading = self.section_heading(format!("Images ({})", images.len()));
        self.backend.append_child(section, heading);

        let indexed: Vec<(usize, &ImageUnit)> = images.iter().enumerate().collect();
        let rows = grid::plan(indexed, self.policy.image_row_capacity);
        for (i, row) in rows.into_iter().enumerate() {
            let mut props =
                ContainerProps::new(format!("Image Row {}", i + 1), Direction::Horizontal);
            props.spacing = self.policy.row_spacing;
            let row_node = self.container(props);
            for (index, unit) in row {
                let item = self.build_image_item(index, unit);
                self.backend.append_child(row_node, item);
            }
            self.backend.append_child(section, row_node);
        }
        section
    }

    fn build_image_item(&mut self, index: usize, unit: &ImageUnit) -> NodeId {
        let layer_name = unit
            .name
            .clone()
            .unwrap_or_else(|| format!("{}_{}", unit.kind.label(), index + 1));

        let mut props = ContainerProps::new(layer_name.clone(), Direction::Vertical);
        props.width = Sizing::Fixed(self.policy.image_column_width);
        props.spacing = self.policy.image_column_spacing;
        props.align = Align::Center;
        let item = self.container(props);

        let (box_width, box_height) = self.nominal_box(unit.kind);
        let mut shape = ShapeProps::new(layer_name, box_width, box_height);
        shape.corner_radius = self.policy.image_corner_radius;
        let shape = self.shape(shape);
        self.populate_image(shape, unit);
        self.backend.append_child(item, shape);

        let caption_text = unit
            .name
            .clone()
            .unwrap_or_else(|| unit.kind.label().to_string());
        let mut caption = TextProps::new("Caption", caption_text);
        caption.font_size = self.policy.image_caption_font_size;
        caption.color = self.theme.text_secondary;
        caption.align = TextAlign::Center;
        let caption = self.text(caption);
        self.backend.append_child(item, caption);

        item
    }

    fn nominal_box(&self, kind: ImageKind) -> (f32, f32) {
        match kind {
            ImageKind::Icon => self.policy.icon_box,
            ImageKind::Background => self.policy.background_box,
            ImageKind::Raster => self.policy.raster_box,
        }
    }

    /// Fills `shape` with the source's pixels, or a placeholder when the
    /// source cannot be materialized.
    fn populate_image(&mut self, shape: NodeId, unit: &ImageUnit) {
        if is_inline_source(&unit.source) {
            debug!(name = ?unit.name, "inline or empty source, keeping placeholder");
            self.apply_placeholder(shape);
            return;
        }

        if is_vector_source(&unit.source) {
            // Vectors render into a square box keyed by kind; the worker
            // preserves aspect inside it.
            let (box_width, _) = self.nominal_box(unit.kind);
            let converted = match self.raster.as_deref_mut() {
                Some(bridge) => bridge.convert(&unit.source, box_width, box_width),
                None => {
                    warn!(source = %unit.source, "no rendering context for vector source");
                    self.degrade(shape);
                    return;
                }
            };
            match converted {
                Ok(image) => match self.backend.create_image(&image.pixel_data) {
                    Ok(handle) => {
                        self.backend
                            .resize(shape, image.width as f32, image.height as f32);
                        self.backend.set_fill(shape, Paint::Image(handle));
                    }
                    Err(error) => {
                        warn!(source = %unit.source, %error, "converted pixels failed to register");
                        self.degrade(shape);
                    }
                },
                Err(error) => {
                    warn!(source = %unit.source, %error, "vector conversion failed");
                    self.degrade(shape);
                }
            }
            return;
        }

        let bytes = match self.fetcher.fetch_bytes(&unit.source) {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = AssetError::LoadFailed(format!("{e:#}"));
                warn!(source = %unit.source, %error, "image fetch failed");
                self.degrade(shape);
                return;
            }
        };
        match self.backend.create_image(&bytes) {
            Ok(handle) => {
                let (box_width, box_height) = self.nominal_box(unit.kind);
                let width = box_width.min(handle.width as f32);
                let height = box_height.min(handle.height as f32);
                self.backend.resize(shape, width, height);
                self.backend.set_fill(shape, Paint::Image(handle));
            }
            Err(error) => {
                warn!(source = %unit.source, %error, "image decode failed");
                self.degrade(shape);
            }
        }
    }

    fn apply_placeholder(&mut self, shape: NodeId) {
        self.backend.set_fill(shape, Paint::Solid(self.theme.card));
        self.backend.set_stroke(
            shape,
            Some(Stroke {
                color: self.theme.border,
                weight: self.policy.border_weight,
            }),
        );
    }

    fn degrade(&mut self, shape: NodeId) {
        self.degraded_items += 1;
        self.apply_placeholder(shape);
    }

    // --- Note and footer ---

    fn build_note(&mut self) -> NodeId {
        let mut props = ContainerProps::new("Export Note", Direction::Vertical);
        props.width = Sizing::Fixed(self.policy.note_width);
        props.padding = self.policy.note_padding;
        props.corner_radius = self.policy.note_corner_radius;
        props.spacing = self.policy.note_spacing;
        props.fill = Some(self.theme.note_fill());
        let note = self.container(props);

        let mut text = TextProps::new(
            "Note",
            "For more accurate use in projects or to import other images, \
             export images from the capture manually",
        );
        text.font_size = self.policy.note_font_size;
        text.color = self.theme.text_secondary;
        text.fixed_width = Some(self.policy.note_text_width);
        let text = self.text(text);
        self.backend.append_child(note, text);

        note
    }

    fn build_footer(&mut self) -> NodeId {
        let mut props = ContainerProps::new("Generated by", Direction::Horizontal);
        props.spacing = self.policy.footer_spacing;
        let footer = self.container(props);

        let parts: [(&str, Option<&str>); 4] = [
            ("Generated by", None),
            ("Tearsheet Importer", Some("https://tearsheet.app/importer")),
            ("based on data from", None),
            ("Tearsheet Capture", Some("https://tearsheet.app")),
        ];
        for (characters, hyperlink) in parts {
            let text = self.footer_text(characters, hyperlink);
            self.backend.append_child(footer, text);
        }
        footer
    }

    fn footer_text(&mut self, characters: &str, hyperlink: Option<&str>) -> NodeId {
        let mut props = TextProps::new(characters, characters);
        props.font_size = self.policy.footer_font_size;
        props.color = if hyperlink.is_some() {
            self.theme.link
        } else {
            self.theme.text_secondary
        };
        props.hyperlink = hyperlink.map(str::to_string);
        self.text(props)
    }
}

fn truncate_title(title: &str, max_chars: usize) -> String {
    if title.chars().count() > max_chars {
        let clipped: String = title.chars().take(max_chars).collect();
        format!("{clipped}...")
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_vector_source() {
        assert!(is_vector_source("logo.svg"));
        assert!(is_vector_source("assets/Logo.SVG"));
        assert!(is_vector_source("icon.svg?v=2"));
        assert!(!is_vector_source("photo.png"));
    }

    #[test]
    fn test_is_inline_source() {
        assert!(is_inline_source(""));
        assert!(is_inline_source("data:image/png;base64,AAAA"));
        assert!(is_inline_source("blob:https://example.com/abc"));
        assert!(!is_inline_source("photo.png"));
    }

    #[test]
    fn test_truncate_title_clips_long_titles_only() {
        assert_eq!(truncate_title("Short", 25), "Short");
        let long = "This page title is far longer than the cap";
        assert_eq!(
            truncate_title(long, 25),
            "This page title is far lo..."
        );
        assert_eq!(truncate_title("exactly-ten", 11), "exactly-ten");
    }
}
