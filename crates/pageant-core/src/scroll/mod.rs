//! Smooth scrolling for in-page anchor navigation
//!
//! `easing` and `timing` are pure helpers; `session` holds the state of one
//! running animation; `navigator` is the controller that intercepts
//! fragment-link clicks and drives the session from the host's frame ticks.

pub mod easing;
pub mod navigator;
pub mod session;
pub mod timing;

pub use easing::EasingType;
pub use navigator::{ClickOutcome, ScrollHooks, ScrollTarget, SmoothScroll};
pub use session::ScrollSession;
