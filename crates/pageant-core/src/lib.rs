pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod page;
pub mod scroll;
pub mod viewport;

pub use config::{AppConfig, InputModeConfig, OffsetSource, ScrollConfig, TrackerConfig};
pub use error::{Error, Result};
pub use events::InputEvent;
pub use input::{InputMode, InputModeDetector};
pub use page::{Document, Element, NodeId, PageManifest};
pub use scroll::{ClickOutcome, EasingType, ScrollHooks, ScrollTarget, SmoothScroll};
pub use viewport::{RootMargin, TrackerOptions, ViewportTracker};
