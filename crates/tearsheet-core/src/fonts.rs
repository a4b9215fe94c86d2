//! Font name normalization and fallback resolution.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::backend::DocumentBackend;
use crate::types::FontName;

/// Styles probed, in order, when resolving a raw family name to a
/// loadable face.
pub const FALLBACK_STYLES: [&str; 5] = ["Regular", "Book", "Roman", "Medium", "Normal"];

/// Title-cases each whitespace-separated word of a raw family name.
pub fn normalize_family(raw: &str) -> String {
    raw.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Maps a numeric CSS weight to its conventional label. Unknown codes
/// pass through unchanged.
pub fn weight_label(code: &str) -> &str {
    match code.trim() {
        "100" => "Thin",
        "200" => "Extra Light",
        "300" => "Light",
        "400" => "Regular",
        "500" => "Medium",
        "600" => "Semi Bold",
        "700" => "Bold",
        "800" => "Extra Bold",
        "900" => "Black",
        other => other,
    }
}

/// Resolves raw family names to loadable faces, caching one probe walk
/// per normalized family.
pub struct FontResolver {
    cache: HashMap<String, FontName>,
}

impl FontResolver {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Returns the first loadable face for `raw_family`, walking
    /// [`FALLBACK_STYLES`] against the backend. When nothing loads, the
    /// default face is warmed and returned instead.
    pub fn resolve(&mut self, backend: &mut dyn DocumentBackend, raw_family: &str) -> FontName {
        let family = normalize_family(raw_family);
        if let Some(hit) = self.cache.get(&family) {
            return hit.clone();
        }

        let mut resolved = None;
        for style in FALLBACK_STYLES {
            let candidate = FontName::new(family.clone(), style);
            match backend.load_font(&candidate) {
                Ok(()) => {
                    resolved = Some(candidate);
                    break;
                }
                Err(missing) => debug!(%missing, "font style probe missed"),
            }
        }

        let face = resolved.unwrap_or_else(|| {
            let fallback = FontName::default();
            if let Err(missing) = backend.load_font(&fallback) {
                warn!(%missing, "default face failed to load");
            }
            warn!(
                family = %family,
                fallback = %fallback.family,
                "no loadable style, using fallback face"
            );
            fallback
        });

        self.cache.insert(family, face.clone());
        face
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_family_title_cases_words() {
        assert_eq!(normalize_family("helvetica neue"), "Helvetica Neue");
        assert_eq!(normalize_family("ARIAL"), "Arial");
        assert_eq!(normalize_family("  inter   display "), "Inter Display");
    }

    #[test]
    fn test_weight_label_maps_known_codes() {
        assert_eq!(weight_label("400"), "Regular");
        assert_eq!(weight_label(" 700 "), "Bold");
        assert_eq!(weight_label("200"), "Extra Light");
        assert_eq!(weight_label("450"), "450");
        assert_eq!(weight_label("italic"), "italic");
    }
}
