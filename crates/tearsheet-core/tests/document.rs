use std::io::Cursor;

use tearsheet_core::document::HeadlessDocument;
use tearsheet_core::errors::AssetError;
use tearsheet_core::node::{ContainerProps, ShapeProps, TextProps};
use tearsheet_core::types::{Color, Direction, FontName, Paint, Point, Stroke};
use tearsheet_core::DocumentBackend;

fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 40, 255]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_commit_lays_out_padded_column() {
    let mut document = HeadlessDocument::new();
    let mut root_props = ContainerProps::new("Board", Direction::Vertical);
    root_props.padding = 24.0;
    root_props.spacing = 24.0;
    let root = document.create_container(root_props);
    let a = document.create_shape(ShapeProps::new("A", 50.0, 50.0));
    let b = document.create_shape(ShapeProps::new("B", 50.0, 50.0));
    document.append_child(root, a);
    document.append_child(root, b);

    document.commit_to_page(root).unwrap();

    let root_rect = document.scene.get_node(root).unwrap().layout_rect;
    assert_eq!(root_rect.width, 98.0);
    assert_eq!(root_rect.height, 172.0);

    let a_rect = document.scene.get_node(a).unwrap().layout_rect;
    assert_eq!((a_rect.x, a_rect.y), (24.0, 24.0));
    let b_rect = document.scene.get_node(b).unwrap().layout_rect;
    assert_eq!((b_rect.x, b_rect.y), (24.0, 98.0));

    assert_eq!(document.page_roots(), &[root]);
}

#[test]
fn test_center_on_viewport_offsets_root() {
    let mut document = HeadlessDocument::new();
    document.set_viewport_center(Point::new(500.0, 300.0));
    let root = document.create_container(ContainerProps::new("Board", Direction::Vertical));
    let shape = document.create_shape(ShapeProps::new("S", 100.0, 40.0));
    document.append_child(root, shape);
    document.commit_to_page(root).unwrap();

    document.center_on_viewport(root);

    let rect = document.scene.get_node(root).unwrap().layout_rect;
    assert_eq!(rect.x, 450.0);
    assert_eq!(rect.y, 280.0);
}

#[test]
fn test_text_measures_by_nominal_metrics() {
    let mut document = HeadlessDocument::new();
    let root = document.create_container(ContainerProps::new("Board", Direction::Vertical));
    let mut props = TextProps::new("Caption", "abcdefghij");
    props.font_size = 10.0;
    let text = document.create_text(props);
    document.append_child(root, text);
    document.commit_to_page(root).unwrap();

    let rect = document.scene.get_node(text).unwrap().layout_rect;
    assert!((rect.width - 60.0).abs() < 0.1, "width was {}", rect.width);
    assert!((rect.height - 12.0).abs() < 0.1, "height was {}", rect.height);
}

#[test]
fn test_create_image_decodes_dimensions() {
    let mut document = HeadlessDocument::new();
    let handle = document.create_image(&tiny_png(3, 2)).unwrap();
    assert_eq!((handle.width, handle.height), (3, 2));
    let stored = document.image(&handle).unwrap();
    assert_eq!((stored.width, stored.height), (3, 2));
}

#[test]
fn test_create_image_rejects_garbage() {
    let mut document = HeadlessDocument::new();
    let result = document.create_image(b"not an image");
    assert!(matches!(result, Err(AssetError::DecodeFailed(_))));
}

#[test]
fn test_shape_mutations_apply() {
    let mut document = HeadlessDocument::new();
    let shape = document.create_shape(ShapeProps::new("S", 10.0, 10.0));

    document.set_fill(shape, Paint::Solid(Color::WHITE));
    document.set_stroke(
        shape,
        Some(Stroke {
            color: Color::BLACK,
            weight: 1.0,
        }),
    );
    document.resize(shape, 80.0, 30.0);

    let node = document.scene.get_node(shape).unwrap();
    match &node.kind {
        tearsheet_core::node::NodeKind::Shape(props) => {
            assert!(matches!(props.fill, Some(Paint::Solid(_))));
            assert!(props.stroke.is_some());
            assert_eq!((props.width, props.height), (80.0, 30.0));
        }
        other => panic!("expected a shape, got {}", other.name()),
    }
}

#[test]
fn test_load_font_checks_installed_set() {
    let mut document = HeadlessDocument::new();
    assert!(document.load_font(&FontName::new("Inter", "Regular")).is_ok());
    assert!(document.load_font(&FontName::new("Comic Sans", "Black")).is_err());
    assert_eq!(document.font_probes.len(), 2);
}

#[test]
fn test_select_and_frame_records_selection() {
    let mut document = HeadlessDocument::new();
    let root = document.create_container(ContainerProps::new("Board", Direction::Vertical));
    document.select_and_frame(root);
    assert_eq!(document.selection(), &[root]);
    assert_eq!(document.framed(), Some(root));
}

#[test]
fn test_commit_rejects_unknown_root() {
    let mut document = HeadlessDocument::new();
    assert!(document.commit_to_page(99).is_err());
}

#[test]
fn test_dump_tree_shows_hierarchy() {
    let mut document = HeadlessDocument::new();
    let root = document.create_container(ContainerProps::new("Board", Direction::Vertical));
    let swatch = document.create_shape(ShapeProps::new("Swatch", 50.0, 50.0));
    document.append_child(root, swatch);
    document.commit_to_page(root).unwrap();

    let dump = document.dump_tree(root);
    assert!(dump.starts_with("Board [Container]"));
    assert!(dump.contains("  Swatch [Shape]"));
}
