use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use pageant_core::{
    AppConfig, Document, InputEvent, InputMode, InputModeDetector, NodeId, PageManifest,
    RootMargin, ScrollHooks, SmoothScroll, TrackerOptions, ViewportTracker,
};

use crate::input::Action;
use crate::theme::Theme;

/// Application state: one loaded document plus the three interaction
/// components, constructed together as soon as the page is available.
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub doc: Document,
    pub title: String,
    navigator: SmoothScroll,
    detector: InputModeDetector,
    tracker: ViewportTracker,
    /// Elements the tracker has reported visible
    revealed: Rc<RefCell<BTreeSet<NodeId>>>,
    /// Set by the after-scroll hook, drained into the status line
    scroll_landed: Rc<RefCell<Option<NodeId>>>,
    /// Anchors reachable with Tab, in document order
    links: Vec<NodeId>,
    focused_link: Option<usize>,
    pub pending_key: Option<char>,
    pub status_message: Option<String>,
    pub show_help: bool,
    pub should_quit: bool,
    page_area: Rect,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme, manifest: &PageManifest) -> anyhow::Result<Self> {
        let doc = manifest.build()?;
        let title = manifest
            .title
            .clone()
            .unwrap_or_else(|| doc.url().path().to_string());

        let scroll_landed: Rc<RefCell<Option<NodeId>>> = Rc::new(RefCell::new(None));
        let landed = Rc::clone(&scroll_landed);
        let hooks = ScrollHooks {
            before_scroll: None,
            after_scroll: Some(Box::new(move |node| {
                *landed.borrow_mut() = Some(node);
            })),
        };
        let navigator = SmoothScroll::new(&doc, &config.scroll, hooks);
        let detector = InputModeDetector::new(&doc, &config.input);

        let revealed: Rc<RefCell<BTreeSet<NodeId>>> = Rc::new(RefCell::new(BTreeSet::new()));
        let sink = Rc::clone(&revealed);
        let tracker = ViewportTracker::new(
            &doc,
            &config.tracker.selector,
            Box::new(move |node, on| {
                if on {
                    sink.borrow_mut().insert(node);
                } else {
                    sink.borrow_mut().remove(&node);
                }
            }),
            TrackerOptions {
                root: None,
                root_margin: RootMargin::parse_or_default(&config.tracker.root_margin),
                threshold: config.tracker.threshold,
                once: config.tracker.once,
            },
        );

        let links = doc.query_selector_all("a[href]");

        Ok(Self {
            config,
            theme,
            doc,
            title,
            navigator,
            detector,
            tracker,
            revealed,
            scroll_landed,
            links,
            focused_link: None,
            pending_key: None,
            status_message: None,
            show_help: false,
            should_quit: false,
            page_area: Rect::default(),
        })
    }

    pub fn is_animating(&self) -> bool {
        self.navigator.is_animating()
    }

    pub fn input_mode(&self) -> Option<InputMode> {
        self.detector.mode()
    }

    pub fn is_revealed(&self, node: NodeId) -> bool {
        self.revealed.borrow().contains(&node)
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed.borrow().len()
    }

    pub fn focused_link(&self) -> Option<NodeId> {
        self.focused_link.and_then(|i| self.links.get(i).copied())
    }

    /// The rectangle the page renders into; mouse hit tests and the
    /// document viewport height derive from it.
    pub fn set_page_area(&mut self, area: Rect) {
        self.page_area = area;
        self.doc.set_viewport_height(area.height as f64);
    }

    pub fn page_area(&self) -> Rect {
        self.page_area
    }

    pub fn apply_action(&mut self, action: Action, now: Instant) {
        self.pending_key = None;
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.doc.scroll_by(1.0),
            Action::ScrollUp => self.doc.scroll_by(-1.0),
            Action::ScrollHalfPageDown => self.doc.scroll_by(self.half_page()),
            Action::ScrollHalfPageUp => self.doc.scroll_by(-self.half_page()),
            Action::ScrollPageDown => self.doc.scroll_by(self.doc.viewport_height()),
            Action::ScrollPageUp => self.doc.scroll_by(-self.doc.viewport_height()),
            Action::JumpToTop => self.doc.set_scroll(0.0),
            Action::JumpToBottom => {
                let max = self.doc.max_scroll();
                self.doc.set_scroll(max);
            }
            Action::PendingG => self.pending_key = Some('g'),
            Action::NextLink => self.cycle_link(1),
            Action::PrevLink => self.cycle_link(-1),
            Action::Activate => {
                if let Some(node) = self.focused_link() {
                    self.tap(node, now);
                }
            }
            Action::Help => self.show_help = true,
            Action::ExitMode => {
                self.show_help = false;
                self.status_message = None;
            }
            Action::None => {}
        }
    }

    /// Deliver an activation as a tap: touch-start, click, touch-end. On a
    /// keyboard-plus-mouse terminal this exercises the same arbitration a
    /// hybrid device does.
    fn tap(&mut self, node: NodeId, now: Instant) {
        self.detector
            .handle_event(&mut self.doc, &InputEvent::TouchStart { target: Some(node) });
        self.click(node, now);
        self.detector
            .handle_event(&mut self.doc, &InputEvent::TouchEnd { target: Some(node) });
    }

    fn click(&mut self, node: NodeId, now: Instant) {
        let outcome = self.navigator.handle_click(&mut self.doc, node, now);
        if !outcome.is_intercepted() {
            // Default navigation would happen here; the viewer just reports
            // the destination.
            let href = self
                .doc
                .get(node)
                .and_then(|el| el.href())
                .map(str::to_string);
            if let Some(href) = href {
                debug!(href, "link not intercepted");
                self.status_message = Some(format!("open {}", href));
            }
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent, now: Instant) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.detector.handle_event(&mut self.doc, &InputEvent::MouseMove);
            }
            MouseEventKind::ScrollDown => self.doc.scroll_by(3.0),
            MouseEventKind::ScrollUp => self.doc.scroll_by(-3.0),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(node) = self.hit_test(mouse.column, mouse.row) {
                    if let Some(i) = self.links.iter().position(|&l| l == node) {
                        self.focused_link = Some(i);
                    }
                    self.click(node, now);
                }
            }
            _ => {}
        }
    }

    /// Advance animation and intersection state one frame.
    pub fn on_tick(&mut self, now: Instant) {
        self.navigator.tick(&mut self.doc, now);
        self.tracker.update(&self.doc);

        if let Some(node) = self.scroll_landed.borrow_mut().take() {
            if let Some(id) = self.doc.get(node).and_then(|el| el.id.clone()) {
                self.status_message = Some(format!("reached #{}", id));
            }
        }
    }

    pub fn on_resize(&mut self, _width: u16, height: u16) {
        // the status bar keeps one row; the real area arrives with the next
        // draw via set_page_area
        self.doc.set_viewport_height(height.saturating_sub(1) as f64);
    }

    /// Map a terminal cell to the element rendered there.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<NodeId> {
        let area = self.page_area;
        if column < area.x
            || column >= area.x + area.width
            || row < area.y
            || row >= area.y + area.height
        {
            return None;
        }
        let line = self.doc.scroll_y().round() + (row - area.y) as f64;
        self.doc
            .elements()
            .find(|(_, el)| el.top <= line && line < el.bottom())
            .map(|(node, _)| node)
    }

    /// Tear down the interaction layer; events delivered afterwards are
    /// ignored by every component.
    pub fn destroy_interactions(&mut self) {
        self.navigator.destroy();
        self.detector.destroy();
        self.tracker.destroy();
    }

    fn half_page(&self) -> f64 {
        (self.doc.viewport_height() / 2.0).max(1.0)
    }

    fn cycle_link(&mut self, step: i64) {
        if self.links.is_empty() {
            return;
        }
        let len = self.links.len() as i64;
        let next = match self.focused_link {
            Some(i) => (i as i64 + step).rem_euclid(len),
            None => {
                if step >= 0 {
                    0
                } else {
                    len - 1
                }
            }
        };
        self.focused_link = Some(next as usize);
        if let Some(node) = self.focused_link() {
            self.doc.focus(node, false);
        }
    }
}
