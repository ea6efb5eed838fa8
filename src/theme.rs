// Theme support for the TUI
//
// Provides color palettes that can be configured via config file.
// "auto" uses terminal's ANSI palette, named themes use true color (RGB).

use ratatui::style::Color;

/// Color palette for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Chrome
    pub title: Color,
    pub border: Color,
    pub border_focused: Color,
    pub status_bar: Color,

    // Control rail
    pub control_label: Color,
    pub control_value: Color,
    pub control_editing: Color,
    pub favorite: Color,

    // Focus hint overlay
    pub hint_text: Color,
    pub hint_border: Color,

    // Chart
    pub bullish: Color,
    pub bearish: Color,
    pub axis: Color,
}

impl Theme {
    /// Load theme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "dracula" => Self::dracula(),
            "nord" => Self::nord(),
            "gruvbox" => Self::gruvbox(),
            _ => Self::auto(), // "auto" or unknown
        }
    }

    /// Border color for a control, depending on its focus mark
    pub fn control_border(&self, focused: bool) -> Color {
        if focused {
            self.border_focused
        } else {
            self.border
        }
    }

    /// Auto theme - uses terminal's ANSI palette
    pub fn auto() -> Self {
        Self {
            name: "auto".to_string(),
            title: Color::Cyan,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            status_bar: Color::Green,
            control_label: Color::Gray,
            control_value: Color::White,
            control_editing: Color::Yellow,
            favorite: Color::Magenta,
            hint_text: Color::White,
            hint_border: Color::Yellow,
            bullish: Color::Green,
            bearish: Color::Red,
            axis: Color::DarkGray,
        }
    }

    /// Dracula theme - https://draculatheme.com
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            title: Color::Rgb(0x8b, 0xe9, 0xfd),          // cyan
            border: Color::Rgb(0x62, 0x72, 0xa4),         // comment
            border_focused: Color::Rgb(0xf1, 0xfa, 0x8c), // yellow
            status_bar: Color::Rgb(0x50, 0xfa, 0x7b),     // green
            control_label: Color::Rgb(0x62, 0x72, 0xa4),  // comment
            control_value: Color::Rgb(0xf8, 0xf8, 0xf2),  // foreground
            control_editing: Color::Rgb(0xff, 0xb8, 0x6c), // orange
            favorite: Color::Rgb(0xff, 0x79, 0xc6),       // pink
            hint_text: Color::Rgb(0xf8, 0xf8, 0xf2),      // foreground
            hint_border: Color::Rgb(0xf1, 0xfa, 0x8c),    // yellow
            bullish: Color::Rgb(0x50, 0xfa, 0x7b),        // green
            bearish: Color::Rgb(0xff, 0x55, 0x55),        // red
            axis: Color::Rgb(0x62, 0x72, 0xa4),           // comment
        }
    }

    /// Nord theme - https://nordtheme.com
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            title: Color::Rgb(0x88, 0xc0, 0xd0),          // nord8 frost
            border: Color::Rgb(0x4c, 0x56, 0x6a),         // nord3
            border_focused: Color::Rgb(0xeb, 0xcb, 0x8b), // nord13 yellow
            status_bar: Color::Rgb(0xa3, 0xbe, 0x8c),     // nord14 green
            control_label: Color::Rgb(0x4c, 0x56, 0x6a),  // nord3
            control_value: Color::Rgb(0xec, 0xef, 0xf4),  // nord6 snow
            control_editing: Color::Rgb(0xd0, 0x87, 0x70), // nord12 orange
            favorite: Color::Rgb(0xb4, 0x8e, 0xad),       // nord15 purple
            hint_text: Color::Rgb(0xec, 0xef, 0xf4),      // nord6 snow
            hint_border: Color::Rgb(0xeb, 0xcb, 0x8b),    // nord13 yellow
            bullish: Color::Rgb(0xa3, 0xbe, 0x8c),        // nord14 green
            bearish: Color::Rgb(0xbf, 0x61, 0x6a),        // nord11 red
            axis: Color::Rgb(0x4c, 0x56, 0x6a),           // nord3
        }
    }

    /// Gruvbox dark theme
    pub fn gruvbox() -> Self {
        Self {
            name: "gruvbox".to_string(),
            title: Color::Rgb(0x83, 0xa5, 0x98),          // blue
            border: Color::Rgb(0x66, 0x5c, 0x54),         // bg3
            border_focused: Color::Rgb(0xfa, 0xbd, 0x2f), // yellow
            status_bar: Color::Rgb(0xb8, 0xbb, 0x26),     // green
            control_label: Color::Rgb(0x92, 0x83, 0x74),  // gray
            control_value: Color::Rgb(0xeb, 0xdb, 0xb2),  // fg
            control_editing: Color::Rgb(0xfe, 0x80, 0x19), // orange
            favorite: Color::Rgb(0xd3, 0x86, 0x9b),       // purple
            hint_text: Color::Rgb(0xeb, 0xdb, 0xb2),      // fg
            hint_border: Color::Rgb(0xfa, 0xbd, 0x2f),    // yellow
            bullish: Color::Rgb(0xb8, 0xbb, 0x26),        // green
            bearish: Color::Rgb(0xfb, 0x49, 0x34),        // red
            axis: Color::Rgb(0x66, 0x5c, 0x54),           // bg3
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::auto()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name_known_themes() {
        assert_eq!(Theme::by_name("dracula").name, "dracula");
        assert_eq!(Theme::by_name("NORD").name, "nord");
        assert_eq!(Theme::by_name("gruvbox").name, "gruvbox");
    }

    #[test]
    fn test_by_name_falls_back_to_auto() {
        assert_eq!(Theme::by_name("auto").name, "auto");
        assert_eq!(Theme::by_name("no-such-theme").name, "auto");
    }

    #[test]
    fn test_focused_border_differs() {
        let theme = Theme::auto();
        assert_ne!(theme.control_border(true), theme.control_border(false));
    }
}
