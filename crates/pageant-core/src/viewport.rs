//! Viewport intersection tracking
//!
//! Observes matched elements and reports enter/leave transitions against a
//! root region (the viewport, or another element) expanded by a CSS-style
//! root margin. The host runs `update` on every frame tick and after scroll
//! or resize; that recompute pass is the observation primitive. The first
//! pass reports every element's current state, later passes only changes.

use std::str::FromStr;

use crate::page::{Document, NodeId};

/// One edge of a root margin: fixed pixels, or a percentage of the root
/// region's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    Px(f64),
    Percent(f64),
}

impl MarginValue {
    fn resolve(&self, root_height: f64) -> f64 {
        match self {
            MarginValue::Px(px) => *px,
            MarginValue::Percent(pct) => root_height * pct / 100.0,
        }
    }
}

impl FromStr for MarginValue {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(pct) = s.strip_suffix('%') {
            return pct.trim().parse::<f64>().map(MarginValue::Percent).map_err(|_| ());
        }
        if let Some(px) = s.strip_suffix("px") {
            return px.trim().parse::<f64>().map(MarginValue::Px).map_err(|_| ());
        }
        s.parse::<f64>().map(MarginValue::Px).map_err(|_| ())
    }
}

/// CSS-shorthand root margin. Positive values grow the root region,
/// negative values shrink it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootMargin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl Default for RootMargin {
    fn default() -> Self {
        Self {
            top: MarginValue::Px(0.0),
            right: MarginValue::Px(0.0),
            bottom: MarginValue::Px(0.0),
            left: MarginValue::Px(0.0),
        }
    }
}

impl FromStr for RootMargin {
    type Err = ();

    /// 1–4 values with the usual shorthand expansion.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values: Vec<MarginValue> = s
            .split_whitespace()
            .map(MarginValue::from_str)
            .collect::<Result<_, _>>()?;
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [v, h] => (*v, *h, *v, *h),
            [t, h, b] => (*t, *h, *b, *h),
            [t, r, b, l] => (*t, *r, *b, *l),
            _ => return Err(()),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl RootMargin {
    /// Parse leniently: anything unparsable collapses to zero margins.
    pub fn parse_or_default(s: &str) -> Self {
        s.parse().unwrap_or_default()
    }
}

pub struct TrackerOptions {
    /// Root region; None is the viewport
    pub root: Option<NodeId>,
    pub root_margin: RootMargin,
    /// Intersection ratio required once above zero; at 0.0 any overlap
    /// counts
    pub threshold: f64,
    /// Unobserve an element after its first entry
    pub once: bool,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: RootMargin::default(),
            threshold: 0.0,
            once: true,
        }
    }
}

struct TrackedElement {
    node: NodeId,
    observed: bool,
    last: Option<bool>,
}

pub struct ViewportTracker {
    tracked: Vec<TrackedElement>,
    options: TrackerOptions,
    callback: Box<dyn FnMut(NodeId, bool)>,
    destroyed: bool,
}

impl ViewportTracker {
    pub fn new(
        doc: &Document,
        selector: &str,
        callback: Box<dyn FnMut(NodeId, bool)>,
        options: TrackerOptions,
    ) -> Self {
        let tracked = doc
            .query_selector_all(selector)
            .into_iter()
            .map(|node| TrackedElement {
                node,
                observed: true,
                last: None,
            })
            .collect();
        Self {
            tracked,
            options,
            callback,
            destroyed: false,
        }
    }

    /// How many elements are still being observed.
    pub fn observed_count(&self) -> usize {
        self.tracked.iter().filter(|t| t.observed).count()
    }

    /// Recompute intersection state and fire the callback for each observed
    /// element whose state changed (or is being reported for the first
    /// time). Under `once`, an intersecting element is unobserved right
    /// after its callback.
    pub fn update(&mut self, doc: &Document) {
        if self.destroyed {
            return;
        }

        let (root_top, root_bottom) = match self.options.root {
            None => (doc.scroll_y(), doc.scroll_y() + doc.viewport_height()),
            Some(node) => match doc.get(node) {
                Some(el) => (el.top, el.bottom()),
                None => return,
            },
        };
        let root_height = root_bottom - root_top;
        let top = root_top - self.options.root_margin.top.resolve(root_height);
        let bottom = root_bottom + self.options.root_margin.bottom.resolve(root_height);

        for tracked in self.tracked.iter_mut().filter(|t| t.observed) {
            let Some(el) = doc.get(tracked.node) else {
                continue;
            };
            let intersecting = intersects(el.top, el.bottom(), top, bottom, self.options.threshold);
            if tracked.last != Some(intersecting) {
                (self.callback)(tracked.node, intersecting);
                if intersecting && self.options.once {
                    tracked.observed = false;
                }
                tracked.last = Some(intersecting);
            }
        }
    }

    /// Disconnect: releases every observed element at once.
    pub fn destroy(&mut self) {
        self.tracked.clear();
        self.destroyed = true;
    }
}

fn intersects(el_top: f64, el_bottom: f64, root_top: f64, root_bottom: f64, threshold: f64) -> bool {
    let height = el_bottom - el_top;
    if height <= 0.0 {
        // zero-height elements intersect while their edge is inside the root
        return el_top >= root_top && el_top <= root_bottom;
    }
    let overlap = el_bottom.min(root_bottom) - el_top.max(root_top);
    if threshold <= 0.0 {
        overlap > 0.0
    } else {
        overlap / height >= threshold
    }
}
