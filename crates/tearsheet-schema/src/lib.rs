use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while turning a raw capture payload into a [`DesignDocument`].
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The payload is not syntactically valid JSON.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
    /// The payload parses as JSON but does not match the document shape.
    #[error("schema violation: {0}")]
    SchemaViolation(String),
}

/// A capture payload produced by the browser-side collector.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DesignDocument {
    /// Collector version that produced the payload.
    pub version: String,
    /// Opaque session token, if the collector attached one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub page: PageInfo,
    pub units: Units,
}

/// Identity of the captured page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
}

/// The captured design tokens, grouped by kind. Every group is optional;
/// a missing group and an empty list both mean "nothing captured".
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Units {
    #[serde(default)]
    pub colors: Option<Vec<ColorUnit>>,
    #[serde(default)]
    pub fonts: Option<Vec<FontUnit>>,
    #[serde(default)]
    pub images: Option<Vec<ImageUnit>>,
}

/// A single captured color.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ColorUnit {
    /// Hex string, e.g. `#1a2b3c`.
    pub value: String,
    /// Whether the color already stands out against a dark board. Swatches
    /// that don't get a visible border.
    #[serde(rename = "isContrasted", default = "default_true")]
    pub is_contrasted: bool,
}

fn default_true() -> bool {
    true
}

/// A single captured font family with the weights seen on the page.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FontUnit {
    pub family: String,
    /// Numeric CSS weights as captured, e.g. `["400", "700"]`.
    #[serde(default)]
    pub weights: Vec<String>,
}

/// Classification of a captured image reference.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ImageKind {
    Icon,
    #[serde(rename = "bg-image")]
    Background,
    /// Anything the collector could not classify.
    #[serde(other)]
    #[default]
    Raster,
}

impl ImageKind {
    /// Short label used for captions and fallback layer names.
    pub fn label(&self) -> &'static str {
        match self {
            ImageKind::Icon => "icon",
            ImageKind::Background => "bg-image",
            ImageKind::Raster => "image",
        }
    }
}

/// A single captured image reference.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ImageUnit {
    #[serde(default)]
    pub kind: ImageKind,
    /// Source URL or path as captured. May be empty or inline (`data:`).
    #[serde(default)]
    pub source: String,
    /// Human-readable name (alt text, filename), when the collector had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Summary of a validated document, suitable for logs and previews.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub version: String,
    pub title: String,
    pub url: String,
    pub colors: usize,
    pub fonts: usize,
    pub images: usize,
}

impl DesignDocument {
    /// Recounts the captured units. Computed fresh on every call so the
    /// report always reflects the current document state.
    pub fn report(&self) -> ValidationReport {
        ValidationReport {
            version: self.version.clone(),
            title: self.page.title.clone(),
            url: self.page.url.clone(),
            colors: count(&self.units.colors),
            fonts: count(&self.units.fonts),
            images: count(&self.units.images),
        }
    }
}

fn count<T>(units: &Option<Vec<T>>) -> usize {
    units.as_ref().map(Vec::len).unwrap_or(0)
}

/// Parses a raw capture payload.
///
/// Syntactically broken JSON and JSON that does not match the document
/// shape are reported as distinct errors, so callers can tell a truncated
/// paste from a payload produced by an incompatible collector.
pub fn parse_document(payload: &str) -> Result<DesignDocument, SchemaError> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| SchemaError::MalformedJson(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| SchemaError::SchemaViolation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_roundtrip() {
        let document = DesignDocument {
            version: "1.4.0".to_string(),
            token: None,
            page: PageInfo {
                title: "Acme Store".to_string(),
                url: "https://acme.test".to_string(),
                favicon: Some("https://acme.test/favicon.ico".to_string()),
            },
            units: Units {
                colors: Some(vec![ColorUnit {
                    value: "#ff0000".to_string(),
                    is_contrasted: true,
                }]),
                fonts: Some(vec![FontUnit {
                    family: "Inter".to_string(),
                    weights: vec!["400".to_string(), "700".to_string()],
                }]),
                images: Some(vec![ImageUnit {
                    kind: ImageKind::Icon,
                    source: "https://acme.test/logo.svg".to_string(),
                    name: Some("Logo".to_string()),
                }]),
            },
        };

        let json = serde_json::to_string_pretty(&document).unwrap();
        let loaded = parse_document(&json).unwrap();
        assert_eq!(loaded.report(), document.report());
        assert_eq!(loaded.units.images.unwrap()[0].kind, ImageKind::Icon);
    }

    #[test]
    fn test_broken_json_is_malformed() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, SchemaError::MalformedJson(_)));
    }

    #[test]
    fn test_wrong_shape_is_schema_violation() {
        let err = parse_document(r#"{"version": "1.0.0"}"#).unwrap_err();
        assert!(matches!(err, SchemaError::SchemaViolation(_)));
    }

    #[test]
    fn test_unknown_image_kind_falls_back_to_raster() {
        let json = r#"{
            "version": "1.4.0",
            "page": {"title": "t", "url": "u"},
            "units": {"images": [{"kind": "sprite", "source": "a.png"}]}
        }"#;
        let document = parse_document(json).unwrap();
        assert_eq!(document.units.images.unwrap()[0].kind, ImageKind::Raster);
    }

    #[test]
    fn test_bg_image_kind_uses_wire_name() {
        let json = r#"{
            "version": "1.4.0",
            "page": {"title": "t", "url": "u"},
            "units": {"images": [{"kind": "bg-image", "source": "hero.png"}]}
        }"#;
        let document = parse_document(json).unwrap();
        assert_eq!(document.units.images.unwrap()[0].kind, ImageKind::Background);
    }

    #[test]
    fn test_missing_contrast_flag_defaults_true() {
        let json = r##"{
            "version": "1.4.0",
            "page": {"title": "t", "url": "u"},
            "units": {"colors": [{"value": "#102030"}]}
        }"##;
        let document = parse_document(json).unwrap();
        assert!(document.units.colors.unwrap()[0].is_contrasted);
    }

    #[test]
    fn test_report_counts_missing_groups_as_zero() {
        let json = r#"{
            "version": "1.4.0",
            "page": {"title": "t", "url": "u"},
            "units": {}
        }"#;
        let report = parse_document(json).unwrap().report();
        assert_eq!((report.colors, report.fonts, report.images), (0, 0, 0));
    }
}
