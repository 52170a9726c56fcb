use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scroll::EasingType;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub input: InputModeConfig,
    #[serde(default)]
    pub tracker: TrackerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme name
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Idle event-poll tick in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Frame rate while a scroll animation is active
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            tick_rate_ms: default_tick_rate_ms(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Scroll offset: a fixed pixel value, or a selector whose first match
/// contributes its rendered height (measured once, at construction).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OffsetSource {
    Px(f64),
    Selector(String),
}

impl Default for OffsetSource {
    fn default() -> Self {
        OffsetSource::Px(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animation duration in milliseconds (at least 1)
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Scroll offset source
    #[serde(default)]
    pub offset: OffsetSource,
    /// Links carrying this class are never intercepted
    #[serde(default = "default_no_scroll_class")]
    pub no_scroll_class: String,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            offset: OffsetSource::default(),
            no_scroll_class: default_no_scroll_class(),
            easing: EasingType::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputModeConfig {
    /// Elements that receive the per-element touched marker
    #[serde(default = "default_input_selector")]
    pub selector: String,
    /// Class added to an element between touch-start and touch-end
    #[serde(default = "default_touched_class")]
    pub touched_class: String,
    /// Body class while the input mode is touch
    #[serde(default = "default_touch_class")]
    pub touch_class: String,
    /// Body class while the input mode is mouse
    #[serde(default = "default_mouse_class")]
    pub mouse_class: String,
}

impl Default for InputModeConfig {
    fn default() -> Self {
        Self {
            selector: default_input_selector(),
            touched_class: default_touched_class(),
            touch_class: default_touch_class(),
            mouse_class: default_mouse_class(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Elements observed for viewport intersection
    #[serde(default = "default_tracker_selector")]
    pub selector: String,
    /// Root margin, CSS shorthand (px or %)
    #[serde(default = "default_root_margin")]
    pub root_margin: String,
    /// Intersection ratio required to count as visible
    #[serde(default)]
    pub threshold: f64,
    /// Stop observing an element after its first entry
    #[serde(default = "default_true")]
    pub once: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            selector: default_tracker_selector(),
            root_margin: default_root_margin(),
            threshold: 0.0,
            once: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "gruvbox-dark".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_animation_fps() -> u16 {
    60
}

fn default_duration_ms() -> u64 {
    500
}

fn default_no_scroll_class() -> String {
    "no-scroll".to_string()
}

fn default_input_selector() -> String {
    "a".to_string()
}

fn default_touched_class() -> String {
    "touched".to_string()
}

fn default_touch_class() -> String {
    "touch-is-active".to_string()
}

fn default_mouse_class() -> String {
    "mouse-is-active".to_string()
}

fn default_tracker_selector() -> String {
    ".reveal".to_string()
}

fn default_root_margin() -> String {
    "0px".to_string()
}

fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/pageant/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pageant")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.scroll.duration_ms, 500);
        assert_eq!(config.scroll.no_scroll_class, "no-scroll");
        assert_eq!(config.scroll.easing, EasingType::CubicInOut);
        assert!(matches!(config.scroll.offset, OffsetSource::Px(px) if px == 0.0));
        assert_eq!(config.input.selector, "a");
        assert_eq!(config.tracker.threshold, 0.0);
        assert!(config.tracker.once);
    }

    #[test]
    fn test_offset_source_from_toml() {
        let config: ScrollConfig = toml::from_str(
            r#"
            duration_ms = 300
            offset = ".header"
            "#,
        )
        .unwrap();
        assert_eq!(config.duration_ms, 300);
        assert!(matches!(config.offset, OffsetSource::Selector(ref s) if s == ".header"));

        let config: ScrollConfig = toml::from_str("offset = 64.0").unwrap();
        assert!(matches!(config.offset, OffsetSource::Px(px) if px == 64.0));
    }

    #[test]
    fn test_config_round_trip() {
        let config = AppConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.scroll.duration_ms, config.scroll.duration_ms);
        assert_eq!(parsed.tracker.selector, config.tracker.selector);
    }

    #[test]
    fn test_unknown_easing_rejected() {
        let parsed: std::result::Result<ScrollConfig, _> = toml::from_str("easing = \"bounce\"");
        assert!(parsed.is_err());
    }
}
