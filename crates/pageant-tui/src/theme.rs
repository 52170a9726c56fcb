use ratatui::style::Color;

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey: Color,

    // Semantic colors
    pub heading: Color,
    pub link: Color,
    pub selection: Color,
    pub touched: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        gruvbox_dark()
    }
}

/// Gruvbox Material dark
fn gruvbox_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey: Color::Rgb(0x92, 0x83, 0x74),
        heading: Color::Rgb(0xd8, 0xa6, 0x57),
        link: Color::Rgb(0x7d, 0xae, 0xa3),
        selection: Color::Rgb(0x45, 0x40, 0x3d),
        touched: Color::Rgb(0xe7, 0x8a, 0x4e),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        error: Color::Rgb(0xea, 0x69, 0x62),
        success: Color::Rgb(0xa9, 0xb6, 0x65),
        info: Color::Rgb(0x7d, 0xae, 0xa3),
    }
}

fn one_dark() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2c, 0x34),
        bg1: Color::Rgb(0x2c, 0x31, 0x3a),
        bg2: Color::Rgb(0x3e, 0x44, 0x51),
        fg0: Color::Rgb(0xab, 0xb2, 0xbf),
        fg1: Color::Rgb(0xc8, 0xcc, 0xd4),
        grey: Color::Rgb(0x5c, 0x63, 0x70),
        heading: Color::Rgb(0xe5, 0xc0, 0x7b),
        link: Color::Rgb(0x61, 0xaf, 0xef),
        selection: Color::Rgb(0x3e, 0x44, 0x51),
        touched: Color::Rgb(0xd1, 0x9a, 0x66),
        accent: Color::Rgb(0x98, 0xc3, 0x79),
        error: Color::Rgb(0xe0, 0x6c, 0x75),
        success: Color::Rgb(0x98, 0xc3, 0x79),
        info: Color::Rgb(0x61, 0xaf, 0xef),
    }
}

fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xd8, 0xde, 0xe9),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey: Color::Rgb(0x4c, 0x56, 0x6a),
        heading: Color::Rgb(0xeb, 0xcb, 0x8b),
        link: Color::Rgb(0x88, 0xc0, 0xd0),
        selection: Color::Rgb(0x43, 0x4c, 0x5e),
        touched: Color::Rgb(0xd0, 0x87, 0x70),
        accent: Color::Rgb(0xa3, 0xbe, 0x8c),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
        success: Color::Rgb(0xa3, 0xbe, 0x8c),
        info: Color::Rgb(0x81, 0xa1, 0xc1),
    }
}

/// Load a theme by name; unknown names fall back to the default.
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "gruvbox-dark" => gruvbox_dark(),
        "one-dark" | "onedark" => one_dark(),
        "nord" => nord(),
        _ => Theme::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_known_and_fallback() {
        assert!(matches!(load_theme("nord").bg0, Color::Rgb(0x2e, 0x34, 0x40)));
        assert!(matches!(
            load_theme("no-such-theme").bg0,
            Color::Rgb(0x28, 0x28, 0x28)
        ));
    }
}
