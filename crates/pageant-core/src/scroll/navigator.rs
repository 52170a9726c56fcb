//! Fragment-link interception and smooth scroll control
//!
//! The navigator records every anchor whose href contains a fragment,
//! decides per click whether to intercept, and animates the document scroll
//! position from the host's frame ticks.

use std::time::{Duration, Instant};

use tracing::debug;

use super::easing::EasingType;
use super::session::{ScrollSession, SessionStep};
use crate::config::{OffsetSource, ScrollConfig};
use crate::page::{Document, NodeId};

/// Whether a click was taken over by the navigator. `NotIntercepted` means
/// the host should perform its default navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Intercepted,
    NotIntercepted,
}

impl ClickOutcome {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, ClickOutcome::Intercepted)
    }
}

/// Programmatic scroll target: an element handle or a selector (first match).
#[derive(Debug, Clone, Copy)]
pub enum ScrollTarget<'a> {
    Node(NodeId),
    Selector(&'a str),
}

impl From<NodeId> for ScrollTarget<'_> {
    fn from(node: NodeId) -> Self {
        ScrollTarget::Node(node)
    }
}

impl<'a> From<&'a str> for ScrollTarget<'a> {
    fn from(selector: &'a str) -> Self {
        ScrollTarget::Selector(selector)
    }
}

/// Optional callbacks around a scroll session. `before_scroll` fires
/// immediately before the session starts, `after_scroll` immediately after
/// the final snap.
#[derive(Default)]
pub struct ScrollHooks {
    pub before_scroll: Option<Box<dyn FnMut(NodeId)>>,
    pub after_scroll: Option<Box<dyn FnMut(NodeId)>>,
}

pub struct SmoothScroll {
    triggers: Vec<NodeId>,
    /// Offset resolved at construction, non-negative
    offset: f64,
    duration: Duration,
    easing: EasingType,
    no_scroll_class: String,
    hooks: ScrollHooks,
    session: Option<ScrollSession>,
    destroyed: bool,
}

impl SmoothScroll {
    /// Scan the document for fragment links and resolve the configured
    /// offset. A selector offset measures its first match's rendered height
    /// here, once; it is not re-measured later.
    pub fn new(doc: &Document, config: &ScrollConfig, hooks: ScrollHooks) -> Self {
        let triggers = doc.query_selector_all(r##"a[href*="#"]"##);
        let offset = match &config.offset {
            OffsetSource::Px(px) => px.max(0.0),
            OffsetSource::Selector(selector) => doc
                .query_selector(selector)
                .and_then(|node| doc.get(node))
                .map(|el| el.height)
                .unwrap_or(0.0)
                .max(0.0),
        };
        Self {
            triggers,
            offset,
            duration: Duration::from_millis(config.duration_ms.max(1)),
            easing: config.easing,
            no_scroll_class: config.no_scroll_class.clone(),
            hooks,
            session: None,
            destroyed: false,
        }
    }

    /// The offset resolved at construction.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.session.is_some()
    }

    /// Decide a click on `node`. Interception requires all of: the element
    /// is a recorded trigger without the no-scroll class, its href is a
    /// same-page fragment link, and the fragment resolves to an element.
    /// Everything else falls through to default navigation.
    pub fn handle_click(&mut self, doc: &mut Document, node: NodeId, now: Instant) -> ClickOutcome {
        if self.destroyed || !self.triggers.contains(&node) {
            return ClickOutcome::NotIntercepted;
        }
        let Some(el) = doc.get(node) else {
            return ClickOutcome::NotIntercepted;
        };
        if el.has_class(&self.no_scroll_class) {
            return ClickOutcome::NotIntercepted;
        }
        let Some(href) = el.href().map(str::to_string) else {
            return ClickOutcome::NotIntercepted;
        };
        let Some(hash_index) = href.find('#') else {
            return ClickOutcome::NotIntercepted;
        };

        // A pure fragment is always same-page; otherwise the href must
        // resolve to the current path and query.
        let same_page = hash_index == 0
            || match doc.resolve_href(&href) {
                Some(target_url) => {
                    target_url.path() == doc.url().path()
                        && target_url.query().unwrap_or("") == doc.url().query().unwrap_or("")
                }
                None => false,
            };
        if !same_page {
            return ClickOutcome::NotIntercepted;
        }

        let fragment = &href[hash_index + 1..];
        let Some(target) = doc.element_by_id(fragment) else {
            // Unresolvable fragments fall back to default navigation.
            return ClickOutcome::NotIntercepted;
        };

        let custom_offset = doc
            .get(node)
            .and_then(|el| el.attr("data-offset"))
            .and_then(|raw| parse_offset_value(raw, doc.root_font_size()));

        self.scroll_to(doc, target, custom_offset, now);
        ClickOutcome::Intercepted
    }

    /// Programmatic scroll to an element or selector, bypassing click
    /// interception and per-link overrides. Missing targets do nothing.
    pub fn animate_scroll<'a>(
        &mut self,
        doc: &mut Document,
        target: impl Into<ScrollTarget<'a>>,
        now: Instant,
    ) {
        let node = match target.into() {
            ScrollTarget::Node(node) => doc.get(node).map(|_| node),
            ScrollTarget::Selector(selector) => doc.query_selector(selector),
        };
        if let Some(node) = node {
            self.scroll_to(doc, node, None, now);
        }
    }

    /// Start a session toward `target.top − offset`. A session already in
    /// flight is superseded; since every frame writes an absolute position,
    /// this matches the "last animation chain wins" behavior of stacking
    /// frame loops.
    fn scroll_to(&mut self, doc: &mut Document, target: NodeId, custom_offset: Option<f64>, now: Instant) {
        let Some(el) = doc.get(target) else {
            return;
        };
        let offset = custom_offset.unwrap_or(self.offset);
        let from = doc.scroll_y();
        let to = el.top - offset;
        debug!(from, to, offset, "starting scroll session");

        if let Some(before) = self.hooks.before_scroll.as_mut() {
            before(target);
        }
        self.session = Some(ScrollSession::new(
            now,
            from,
            to,
            self.duration,
            self.easing,
            target,
        ));
    }

    /// Advance the running session one frame. On completion: snap exactly to
    /// the target position, move focus there without scrolling (temporary
    /// tabindex, restored immediately), then fire the after hook.
    ///
    /// Runs even after `destroy()`: teardown stops future clicks, not an
    /// animation already in flight.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        let Some(session) = &self.session else {
            return;
        };
        match session.step(now) {
            SessionStep::Running(pos) => doc.set_scroll(pos),
            SessionStep::Finished(pos) => {
                let target = session.target();
                doc.set_scroll(pos);

                if let Some(el) = doc.get_mut(target) {
                    el.set_attr("tabindex", "-1");
                    doc.focus(target, true);
                    if let Some(el) = doc.get_mut(target) {
                        el.remove_attr("tabindex");
                    }
                }

                if let Some(after) = self.hooks.after_scroll.as_mut() {
                    after(target);
                }
                self.session = None;
            }
        }
    }

    /// Stop handling clicks. Does not cancel an in-flight session.
    pub fn destroy(&mut self) {
        self.triggers.clear();
        self.destroyed = true;
    }
}

/// Parse a per-link offset override: bare number or `px` suffix in pixels,
/// `rem` suffix multiplied by the root font size. Unparsable values are
/// ignored (the configured offset applies).
fn parse_offset_value(raw: &str, root_font_size: f64) -> Option<f64> {
    let raw = raw.trim();
    if let Some(rem) = raw.strip_suffix("rem") {
        return rem.trim().parse::<f64>().ok().map(|v| v * root_font_size);
    }
    if let Some(px) = raw.strip_suffix("px") {
        return px.trim().parse::<f64>().ok();
    }
    raw.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::page::{Document, Element};

    fn fixture() -> Document {
        let mut doc = Document::new("https://site.test/index.html").unwrap();

        let mut header = Element::new("header");
        header.add_class("site-header");
        header.height = 6.0;
        doc.push(header);

        let mut nav = Element::new("a");
        nav.set_attr("href", "#features");
        doc.push(nav);

        let mut skip = Element::new("a");
        skip.set_attr("href", "#features");
        skip.add_class("no-scroll");
        doc.push(skip);

        let mut other_page = Element::new("a");
        other_page.set_attr("href", "/pricing.html#features");
        doc.push(other_page);

        let mut offset_link = Element::new("a");
        offset_link.set_attr("href", "#features");
        offset_link.set_attr("data-offset", "2rem");
        doc.push(offset_link);

        let mut dangling = Element::new("a");
        dangling.set_attr("href", "#nowhere");
        doc.push(dangling);

        let mut filler = Element::new("p");
        filler.height = 100.0;
        doc.push(filler);

        let mut features = Element::new("section");
        features.id = Some("features".into());
        features.height = 40.0;
        doc.push(features);

        doc.set_viewport_height(20.0);
        doc.set_root_font_size(16.0);
        doc
    }

    fn navigator(doc: &Document, config: &ScrollConfig) -> SmoothScroll {
        SmoothScroll::new(doc, config, ScrollHooks::default())
    }

    fn finish(nav: &mut SmoothScroll, doc: &mut Document, start: Instant, duration_ms: u64) {
        // a mid-flight frame plus one frame past the duration
        nav.tick(doc, start + Duration::from_millis(duration_ms / 2));
        nav.tick(doc, start + Duration::from_millis(duration_ms + 20));
    }

    #[test]
    fn test_click_intercepts_and_lands_on_target() {
        for duration_ms in [40u64, 500, 3000] {
            let mut doc = fixture();
            let config = ScrollConfig {
                duration_ms,
                ..Default::default()
            };
            let mut nav = navigator(&doc, &config);
            let link = doc.query_selector_all("a")[0];
            let start = Instant::now();

            let outcome = nav.handle_click(&mut doc, link, start);
            assert!(outcome.is_intercepted());
            assert!(nav.is_animating());

            finish(&mut nav, &mut doc, start, duration_ms);
            assert!(!nav.is_animating());

            let target_top = doc.get(doc.element_by_id("features").unwrap()).unwrap().top;
            assert!(
                (doc.scroll_y() - target_top).abs() < 1.0,
                "duration {}ms landed at {} instead of {}",
                duration_ms,
                doc.scroll_y(),
                target_top
            );
        }
    }

    #[test]
    fn test_no_scroll_class_not_intercepted() {
        let mut doc = fixture();
        let mut nav = navigator(&doc, &ScrollConfig::default());
        let skip = doc.query_selector(".no-scroll").unwrap();
        let outcome = nav.handle_click(&mut doc, skip, Instant::now());
        assert!(!outcome.is_intercepted());
        assert!(!nav.is_animating());
    }

    #[test]
    fn test_cross_page_link_not_intercepted() {
        let mut doc = fixture();
        let mut nav = navigator(&doc, &ScrollConfig::default());
        let link = doc.query_selector_all("a")[2];
        assert_eq!(doc.get(link).unwrap().href(), Some("/pricing.html#features"));
        let outcome = nav.handle_click(&mut doc, link, Instant::now());
        assert!(!outcome.is_intercepted());
    }

    #[test]
    fn test_same_path_relative_href_intercepted() {
        let mut doc = fixture();
        let link = doc.push({
            let mut el = Element::new("a");
            el.set_attr("href", "/index.html#features");
            el
        });
        let mut nav = navigator(&doc, &ScrollConfig::default());
        let outcome = nav.handle_click(&mut doc, link, Instant::now());
        assert!(outcome.is_intercepted());
    }

    #[test]
    fn test_dangling_fragment_not_intercepted() {
        let mut doc = fixture();
        let mut nav = navigator(&doc, &ScrollConfig::default());
        let dangling = doc.query_selector_all("a")[4];
        assert_eq!(doc.get(dangling).unwrap().href(), Some("#nowhere"));
        let outcome = nav.handle_click(&mut doc, dangling, Instant::now());
        assert!(!outcome.is_intercepted());
    }

    #[test]
    fn test_selector_offset_resolved_at_construction() {
        let doc = fixture();
        let config = ScrollConfig {
            offset: OffsetSource::Selector(".site-header".into()),
            ..Default::default()
        };
        let nav = navigator(&doc, &config);
        assert_eq!(nav.offset(), 6.0);

        let missing = ScrollConfig {
            offset: OffsetSource::Selector(".gone".into()),
            ..Default::default()
        };
        assert_eq!(navigator(&doc, &missing).offset(), 0.0);

        let negative = ScrollConfig {
            offset: OffsetSource::Px(-12.0),
            ..Default::default()
        };
        assert_eq!(navigator(&doc, &negative).offset(), 0.0);
    }

    #[test]
    fn test_fixed_offset_applies() {
        let mut doc = fixture();
        let config = ScrollConfig {
            duration_ms: 50,
            offset: OffsetSource::Px(6.0),
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let link = doc.query_selector_all("a")[0];
        let start = Instant::now();
        nav.handle_click(&mut doc, link, start);
        finish(&mut nav, &mut doc, start, 50);

        let target_top = doc.get(doc.element_by_id("features").unwrap()).unwrap().top;
        assert!((doc.scroll_y() - (target_top - 6.0)).abs() < 1.0);
    }

    #[test]
    fn test_data_offset_override_takes_precedence() {
        let mut doc = fixture();
        let config = ScrollConfig {
            duration_ms: 50,
            offset: OffsetSource::Px(6.0),
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let link = doc.query_selector_all("a")[3];
        assert_eq!(doc.get(link).unwrap().attr("data-offset"), Some("2rem"));
        let start = Instant::now();
        nav.handle_click(&mut doc, link, start);
        finish(&mut nav, &mut doc, start, 50);

        let target_top = doc.get(doc.element_by_id("features").unwrap()).unwrap().top;
        // 2rem × 16 = 32 beats the configured 6
        assert!((doc.scroll_y() - (target_top - 32.0)).abs() < 1.0);
    }

    #[test]
    fn test_parse_offset_value_units() {
        assert_eq!(parse_offset_value("24", 16.0), Some(24.0));
        assert_eq!(parse_offset_value("24px", 16.0), Some(24.0));
        assert_eq!(parse_offset_value("1.5rem", 16.0), Some(24.0));
        assert_eq!(parse_offset_value(" 2rem ", 10.0), Some(20.0));
        assert_eq!(parse_offset_value("wide", 16.0), None);
    }

    #[test]
    fn test_hooks_fire_in_order() {
        let mut doc = fixture();
        let calls = Rc::new(RefCell::new(Vec::new()));
        let before = Rc::clone(&calls);
        let after = Rc::clone(&calls);
        let hooks = ScrollHooks {
            before_scroll: Some(Box::new(move |_| before.borrow_mut().push("before"))),
            after_scroll: Some(Box::new(move |_| after.borrow_mut().push("after"))),
        };
        let config = ScrollConfig {
            duration_ms: 50,
            ..Default::default()
        };
        let mut nav = SmoothScroll::new(&doc, &config, hooks);
        let link = doc.query_selector_all("a")[0];
        let start = Instant::now();

        nav.handle_click(&mut doc, link, start);
        assert_eq!(*calls.borrow(), vec!["before"]);

        finish(&mut nav, &mut doc, start, 50);
        assert_eq!(*calls.borrow(), vec!["before", "after"]);
    }

    #[test]
    fn test_focus_moves_without_scroll_jump() {
        let mut doc = fixture();
        let config = ScrollConfig {
            duration_ms: 50,
            offset: OffsetSource::Px(6.0),
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let link = doc.query_selector_all("a")[0];
        let start = Instant::now();
        nav.handle_click(&mut doc, link, start);
        finish(&mut nav, &mut doc, start, 50);

        let target = doc.element_by_id("features").unwrap();
        assert_eq!(doc.focused(), Some(target));
        // the temporary tabindex is gone again
        assert_eq!(doc.get(target).unwrap().attr("tabindex"), None);
        // focusing did not disturb the final position
        let target_top = doc.get(target).unwrap().top;
        assert!((doc.scroll_y() - (target_top - 6.0)).abs() < 1.0);
    }

    #[test]
    fn test_new_session_supersedes_old() {
        let mut doc = fixture();
        doc.push({
            let mut el = Element::new("section");
            el.id = Some("second".into());
            el.height = 30.0;
            el
        });
        let link2 = doc.push({
            let mut el = Element::new("a");
            el.set_attr("href", "#second");
            el
        });
        let config = ScrollConfig {
            duration_ms: 100,
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let link1 = doc.query_selector_all("a")[0];
        let start = Instant::now();

        nav.handle_click(&mut doc, link1, start);
        nav.tick(&mut doc, start + Duration::from_millis(30));
        nav.handle_click(&mut doc, link2, start + Duration::from_millis(40));
        finish(&mut nav, &mut doc, start + Duration::from_millis(40), 100);

        let second_top = doc.get(doc.element_by_id("second").unwrap()).unwrap().top;
        let expected = second_top.min(doc.max_scroll());
        assert!((doc.scroll_y() - expected).abs() < 1.0);
    }

    #[test]
    fn test_animate_scroll_programmatic() {
        let mut doc = fixture();
        let config = ScrollConfig {
            duration_ms: 50,
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let start = Instant::now();

        nav.animate_scroll(&mut doc, "#features", start);
        assert!(nav.is_animating());
        finish(&mut nav, &mut doc, start, 50);
        let target_top = doc.get(doc.element_by_id("features").unwrap()).unwrap().top;
        assert!((doc.scroll_y() - target_top).abs() < 1.0);

        // a missing selector does nothing
        nav.animate_scroll(&mut doc, ".gone", start);
        assert!(!nav.is_animating());
    }

    #[test]
    fn test_destroy_stops_clicks_but_not_flight() {
        let mut doc = fixture();
        let config = ScrollConfig {
            duration_ms: 100,
            ..Default::default()
        };
        let mut nav = navigator(&doc, &config);
        let link = doc.query_selector_all("a")[0];
        let start = Instant::now();

        nav.handle_click(&mut doc, link, start);
        nav.destroy();

        // no further clicks are handled
        let outcome = nav.handle_click(&mut doc, link, start + Duration::from_millis(10));
        assert!(!outcome.is_intercepted());

        // but the in-flight session still lands
        finish(&mut nav, &mut doc, start, 100);
        let target_top = doc.get(doc.element_by_id("features").unwrap()).unwrap().top;
        assert!((doc.scroll_y() - target_top).abs() < 1.0);
    }

    #[test]
    fn test_duration_invariant_clamped() {
        let doc = fixture();
        let config = ScrollConfig {
            duration_ms: 0,
            ..Default::default()
        };
        let nav = navigator(&doc, &config);
        assert_eq!(nav.duration, Duration::from_millis(1));
    }
}
