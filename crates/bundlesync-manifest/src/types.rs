//! Library descriptor types written into the manifest
//!
//! A descriptor lists generated assets per section:
//!
//! ```yaml
//! widget:
//!   js:
//!     dist/widget.:
//!       minified: true
//!       preprocess: false
//!   css:
//!     dist/widget.:
//!       minified: true
//!       preprocess: false
//! ```

use crate::errors::SyncError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Asset key -> loader options. Sorted so repeated runs render identically.
pub type AssetSection = BTreeMap<String, AssetOptions>;

/// How the asset loader should treat a file
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetOptions {
    pub minified: bool,
    pub preprocess: bool,
}

impl AssetOptions {
    /// Build output: already minified, must not be aggregated again
    pub const PREBUILT: AssetOptions = AssetOptions {
        minified: true,
        preprocess: false,
    };
}

/// Stylesheet section, either flat like `js` or nested under one group
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum StylesheetSection {
    Flat(AssetSection),
    Grouped(BTreeMap<String, AssetSection>),
}

impl StylesheetSection {
    fn build(keys: &[String], group: Option<&str>) -> Self {
        let section = asset_section(keys);
        match group {
            Some(group) => {
                let mut grouped = BTreeMap::new();
                grouped.insert(group.to_string(), section);
                StylesheetSection::Grouped(grouped)
            }
            None => StylesheetSection::Flat(section),
        }
    }
}

/// Generated content of one manifest entry
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub js: Option<AssetSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css: Option<StylesheetSection>,
}

impl LibraryDescriptor {
    /// Build a descriptor; a section exists only when it has at least one key
    pub fn from_keys(
        script_keys: &[String],
        stylesheet_keys: &[String],
        css_group: Option<&str>,
    ) -> Self {
        LibraryDescriptor {
            js: (!script_keys.is_empty()).then(|| asset_section(script_keys)),
            css: (!stylesheet_keys.is_empty())
                .then(|| StylesheetSection::build(stylesheet_keys, css_group)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.js.is_none() && self.css.is_none()
    }

    pub fn to_value(&self) -> Result<serde_yaml::Value, SyncError> {
        Ok(serde_yaml::to_value(self)?)
    }
}

fn asset_section(keys: &[String]) -> AssetSection {
    keys.iter()
        .map(|key| (key.clone(), AssetOptions::PREBUILT))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_keys_no_sections() {
        let descriptor = LibraryDescriptor::from_keys(&[], &[], None);
        assert!(descriptor.is_empty());

        let rendered = serde_yaml::to_string(&descriptor).unwrap_or_default();
        assert_eq!(rendered.trim(), "{}");
    }

    #[test]
    fn test_only_script_section() {
        let descriptor = LibraryDescriptor::from_keys(&keys(&["dist/app."]), &[], None);
        assert!(descriptor.css.is_none());
        let js = descriptor.js.unwrap_or_default();
        assert_eq!(js.get("dist/app."), Some(&AssetOptions::PREBUILT));
    }

    #[test]
    fn test_flat_stylesheet_matches_script_shape() {
        let descriptor =
            LibraryDescriptor::from_keys(&keys(&["dist/app."]), &keys(&["dist/app."]), None);
        let Ok(value) = descriptor.to_value() else {
            panic!("descriptor should serialize");
        };
        assert_eq!(value.get("js"), value.get("css"));
    }

    #[test]
    fn test_grouped_stylesheet_is_initialized() {
        let descriptor =
            LibraryDescriptor::from_keys(&[], &keys(&["dist/a.", "dist/b."]), Some("layout"));
        assert!(descriptor.js.is_none());
        let Some(StylesheetSection::Grouped(groups)) = &descriptor.css else {
            panic!("stylesheets should be grouped");
        };
        assert_eq!(groups.get("layout").map(|section| section.len()), Some(2));

        let Ok(value) = descriptor.to_value() else {
            panic!("descriptor should serialize");
        };
        let minified = value
            .get("css")
            .and_then(|css| css.get("layout"))
            .and_then(|layout| layout.get("dist/b."))
            .and_then(|opts| opts.get("minified"))
            .and_then(|m| m.as_bool());
        assert_eq!(minified, Some(true));
    }

    #[test]
    fn test_section_keys_sorted() {
        let descriptor =
            LibraryDescriptor::from_keys(&keys(&["dist/zeta.", "dist/alpha."]), &[], None);
        let rendered = serde_yaml::to_string(&descriptor).unwrap_or_default();
        let alpha = rendered.find("dist/alpha.");
        let zeta = rendered.find("dist/zeta.");
        assert!(alpha.is_some() && zeta.is_some());
        assert!(alpha < zeta);
    }
}
