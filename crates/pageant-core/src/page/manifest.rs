//! Page manifests
//!
//! A manifest is the serialized description of a page: its URL, root font
//! size, and an ordered list of blocks. Manifests load from TOML or JSON
//! (by file extension) and build into a [`Document`] with stacked geometry.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Document, Element};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageManifest {
    /// Full page URL; same-page link checks compare against its path+query
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Pixel value of one `rem` in offset attributes
    #[serde(default = "default_root_font_size")]
    pub root_font_size: f64,
    #[serde(default)]
    pub blocks: Vec<BlockManifest>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlockManifest {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub href: Option<String>,
    /// Per-link scroll offset override: "120", "96px", or "4.5rem"
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub text: String,
    /// Explicit height in document pixels; defaults to the line count
    #[serde(default)]
    pub height: Option<f64>,
}

fn default_url() -> String {
    Document::DEFAULT_URL.to_string()
}

fn default_root_font_size() -> f64 {
    16.0
}

fn default_tag() -> String {
    "p".to_string()
}

impl PageManifest {
    /// Load a manifest from disk; `.json` parses as JSON, anything else as
    /// TOML.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            toml::from_str(&content).map_err(|e| crate::Error::Manifest(e.to_string()))
        }
    }

    /// Build the document, stacking blocks top to bottom.
    pub fn build(&self) -> crate::Result<Document> {
        let mut doc = Document::new(&self.url)?;
        doc.set_root_font_size(self.root_font_size);
        for block in &self.blocks {
            let mut el = Element::new(block.tag.as_str());
            el.id = block.id.clone();
            for class in &block.classes {
                el.add_class(class);
            }
            if let Some(href) = &block.href {
                el.set_attr("href", href);
            }
            if let Some(offset) = &block.offset {
                el.set_attr("data-offset", offset);
            }
            el.lines = block.text.lines().map(str::to_string).collect();
            if el.lines.is_empty() {
                el.lines.push(String::new());
            }
            if let Some(height) = block.height {
                el.height = height.max(0.0);
            }
            doc.push(el);
        }
        Ok(doc)
    }
}
