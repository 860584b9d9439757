use ratatui::style::Color;

use crate::model::{ThemeKind, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::light()
    }
}

impl Theme {
    pub fn light() -> Self {
        Theme {
            kind: ThemeKind::Light,
            background: Color::Rgb(0xF5, 0xF5, 0xF7),
            text: Color::Rgb(0x33, 0x33, 0x3D),
            text_bright: Color::Rgb(0x00, 0x00, 0x00),
            highlight: Color::Rgb(0x26, 0x6D, 0xD3),
            dim: Color::Rgb(0x8A, 0x8A, 0x99),
            red: Color::Rgb(0xC6, 0x28, 0x28),
            yellow: Color::Rgb(0xB2, 0x6B, 0x00),
            green: Color::Rgb(0x2E, 0x7D, 0x32),
            selection_bg: Color::Rgb(0xD6, 0xE4, 0xF7),
            border: Color::Rgb(0xB0, 0xB0, 0xBE),
        }
    }

    pub fn dark() -> Self {
        Theme {
            kind: ThemeKind::Dark,
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            border: Color::Rgb(0x7D, 0x78, 0xBF),
        }
    }

    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Theme::light(),
            ThemeKind::Dark => Theme::dark(),
        }
    }

    /// Build the palette for `kind` with the config's color overrides applied
    pub fn from_config(kind: ThemeKind, ui: &UiConfig) -> Self {
        let mut theme = Theme::for_kind(kind);

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "border" => theme.border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Color for a task's text
    pub fn task_color(&self, done: bool) -> Color {
        if done { self.dim } else { self.text }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}
