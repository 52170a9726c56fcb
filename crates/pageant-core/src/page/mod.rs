//! Headless document model
//!
//! A loaded page is a flat list of block elements with vertical geometry in
//! abstract pixels, a body class set, a scroll position, and a current URL.
//! This is the only surface the interaction components touch; how the page
//! was produced (manifest file, generator, test fixture) is the host's
//! business.

pub mod manifest;
pub mod selector;

pub use manifest::{BlockManifest, PageManifest};
pub use selector::Selector;

use std::collections::{BTreeMap, BTreeSet};

use url::Url;

/// Index-based element handle, stable for the lifetime of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A block-level element: tag, classes, attributes, text, and resolved
/// vertical geometry.
#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    classes: BTreeSet<String>,
    attrs: BTreeMap<String, String>,
    pub lines: Vec<String>,
    /// Absolute top edge in document pixels
    pub top: f64,
    /// Rendered height in document pixels
    pub height: f64,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            classes: BTreeSet::new(),
            attrs: BTreeMap::new(),
            lines: Vec::new(),
            top: 0.0,
            height: 0.0,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.attrs.insert(name.to_string(), value.to_string());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn href(&self) -> Option<&str> {
        self.attr("href")
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether focus may land on this element: an explicit tabindex, or an
    /// anchor with an href.
    pub fn focusable(&self) -> bool {
        self.attr("tabindex").is_some() || (self.tag == "a" && self.attr("href").is_some())
    }
}

/// The loaded page.
#[derive(Debug, Clone)]
pub struct Document {
    url: Url,
    elements: Vec<Element>,
    body_classes: BTreeSet<String>,
    root_font_size: f64,
    viewport_height: f64,
    scroll_y: f64,
    focused: Option<NodeId>,
}

impl Document {
    pub const DEFAULT_URL: &'static str = "https://localhost/";

    pub fn new(url: &str) -> crate::Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            elements: Vec::new(),
            body_classes: BTreeSet::new(),
            root_font_size: 16.0,
            viewport_height: 0.0,
            scroll_y: 0.0,
            focused: None,
        })
    }

    /// Append an element, stacking it below the current content.
    pub fn push(&mut self, mut element: Element) -> NodeId {
        element.top = self.content_height();
        if element.height <= 0.0 {
            element.height = element.lines.len().max(1) as f64;
        }
        self.elements.push(element);
        NodeId(self.elements.len() - 1)
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.elements.len()).map(NodeId)
    }

    pub fn elements(&self) -> impl Iterator<Item = (NodeId, &Element)> {
        self.elements.iter().enumerate().map(|(i, e)| (NodeId(i), e))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// All elements matching a selector, in document order. A selector that
    /// does not parse matches nothing.
    pub fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        let Some(selector) = Selector::parse(selector) else {
            tracing::warn!(selector, "unparsable selector, matching nothing");
            return Vec::new();
        };
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, el)| selector.matches(el))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    /// First element matching a selector.
    pub fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.query_selector_all(selector).into_iter().next()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(NodeId)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolve an href the way a browser resolves `new URL(href, origin)`:
    /// against the document origin, not the current directory.
    pub fn resolve_href(&self, href: &str) -> Option<Url> {
        let mut origin = self.url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        origin.join(href).ok()
    }

    pub fn root_font_size(&self) -> f64 {
        self.root_font_size
    }

    pub fn set_root_font_size(&mut self, px: f64) {
        self.root_font_size = px.max(1.0);
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
        // Re-clamp: shrinking content or growing viewport can strand the
        // scroll position past the new maximum.
        self.set_scroll(self.scroll_y);
    }

    pub fn content_height(&self) -> f64 {
        self.elements.last().map(Element::bottom).unwrap_or(0.0)
    }

    pub fn max_scroll(&self) -> f64 {
        (self.content_height() - self.viewport_height).max(0.0)
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Absolute scroll write, clamped into the scrollable range.
    pub fn set_scroll(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_scroll(self.scroll_y + delta);
    }

    pub fn body_has_class(&self, class: &str) -> bool {
        self.body_classes.contains(class)
    }

    pub fn add_body_class(&mut self, class: &str) {
        self.body_classes.insert(class.to_string());
    }

    pub fn remove_body_class(&mut self, class: &str) {
        self.body_classes.remove(class);
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    /// Move focus to an element. Returns false (and does nothing) for
    /// non-focusable targets. Unless `prevent_scroll` is set, the element is
    /// brought into view.
    pub fn focus(&mut self, node: NodeId, prevent_scroll: bool) -> bool {
        let Some(el) = self.elements.get(node.0) else {
            return false;
        };
        if !el.focusable() {
            return false;
        }
        let (top, bottom) = (el.top, el.bottom());
        self.focused = Some(node);
        if !prevent_scroll {
            if top < self.scroll_y {
                self.set_scroll(top);
            } else if bottom > self.scroll_y + self.viewport_height {
                self.set_scroll(bottom - self.viewport_height);
            }
        }
        true
    }
}
