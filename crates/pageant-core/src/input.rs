//! Touch/mouse input-mode arbitration
//!
//! Tracks which input device the user touched last and mirrors it onto the
//! document body as a class pair, plus a per-element "touched" marker while
//! a contact is down. The document-level triggers are armed flags: a mode
//! flip disarms its own trigger and re-arms only the other one, so an
//! established mode never reprocesses its own event type and rapid flips
//! cannot duplicate registration.

use tracing::debug;

use crate::config::InputModeConfig;
use crate::events::InputEvent;
use crate::page::{Document, NodeId};

/// Process-wide input mode, mutually exclusive, set by whichever device
/// event arrived last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Touch,
    Mouse,
}

pub struct InputModeDetector {
    bound: Vec<NodeId>,
    touched_class: String,
    touch_class: String,
    mouse_class: String,
    touch_armed: bool,
    mouse_armed: bool,
    mode: Option<InputMode>,
    destroyed: bool,
}

impl InputModeDetector {
    /// Bind the matched elements and arm both document-level triggers.
    pub fn new(doc: &Document, config: &InputModeConfig) -> Self {
        Self {
            bound: doc.query_selector_all(&config.selector),
            touched_class: config.touched_class.clone(),
            touch_class: config.touch_class.clone(),
            mouse_class: config.mouse_class.clone(),
            touch_armed: true,
            mouse_armed: true,
            mode: None,
            destroyed: false,
        }
    }

    /// The current mode, None until the first qualifying event.
    pub fn mode(&self) -> Option<InputMode> {
        self.mode
    }

    pub fn handle_event(&mut self, doc: &mut Document, event: &InputEvent) {
        if self.destroyed {
            return;
        }
        match event {
            InputEvent::TouchStart { target } => {
                // Per-element marker, independent of the global mode.
                if let Some(node) = target {
                    if self.bound.contains(node) {
                        if let Some(el) = doc.get_mut(*node) {
                            el.add_class(&self.touched_class);
                        }
                    }
                }
                if self.touch_armed {
                    self.touch_armed = false;
                    self.mouse_armed = true;
                    doc.add_body_class(&self.touch_class);
                    doc.remove_body_class(&self.mouse_class);
                    self.mode = Some(InputMode::Touch);
                    debug!("input mode: touch");
                }
            }
            InputEvent::TouchEnd { target } => {
                if let Some(node) = target {
                    if self.bound.contains(node) {
                        if let Some(el) = doc.get_mut(*node) {
                            el.remove_class(&self.touched_class);
                        }
                    }
                }
            }
            InputEvent::MouseMove => {
                if self.mouse_armed {
                    self.mouse_armed = false;
                    self.touch_armed = true;
                    doc.remove_body_class(&self.touch_class);
                    doc.add_body_class(&self.mouse_class);
                    self.mode = Some(InputMode::Mouse);
                    debug!("input mode: mouse");
                }
            }
            InputEvent::Click { .. } => {}
        }
    }

    /// Unbind all elements and disarm both triggers. Body classes are left
    /// as they are; they describe the last observed state.
    pub fn destroy(&mut self) {
        self.bound.clear();
        self.touch_armed = false;
        self.mouse_armed = false;
        self.destroyed = true;
    }
}
