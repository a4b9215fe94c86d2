use tearsheet_core::document::HeadlessDocument;
use tearsheet_core::fonts::FontResolver;
use tearsheet_core::types::FontName;

#[test]
fn test_resolver_takes_first_loadable_style() {
    let mut document = HeadlessDocument::new();
    document.insert_font(FontName::new("Georgia", "Book"));
    let mut resolver = FontResolver::new();

    let face = resolver.resolve(&mut document, "georgia");

    assert_eq!(face, FontName::new("Georgia", "Book"));
    // Regular probed first and missed, Book hit.
    assert_eq!(
        document.font_probes,
        vec![
            FontName::new("Georgia", "Regular"),
            FontName::new("Georgia", "Book"),
        ]
    );
}

#[test]
fn test_resolver_falls_back_to_default_face() {
    let mut document = HeadlessDocument::new();
    let mut resolver = FontResolver::new();

    let face = resolver.resolve(&mut document, "Totally Unknown");

    assert_eq!(face, FontName::default());
    // Five chain probes plus the fallback warm-up load.
    assert_eq!(document.font_probes.len(), 6);
    assert_eq!(document.font_probes[5], FontName::default());
}

#[test]
fn test_resolver_caches_per_family() {
    let mut document = HeadlessDocument::new();
    document.insert_font(FontName::new("Georgia", "Regular"));
    let mut resolver = FontResolver::new();

    let first = resolver.resolve(&mut document, "Georgia");
    let second = resolver.resolve(&mut document, "GEORGIA");
    let third = resolver.resolve(&mut document, "georgia");

    assert_eq!(first, second);
    assert_eq!(second, third);
    assert_eq!(document.font_probes.len(), 1);
}
