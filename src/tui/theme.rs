use ratatui::style::Color;

use crate::model::UiConfig;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    pub accent: Color,
    pub dim: Color,
    pub error: Color,
    pub done: Color,
    pub partial: Color,
    pub selection_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x14, 0x1C),
            text: Color::Rgb(0xC8, 0xCC, 0xD4),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            accent: Color::Rgb(0x5F, 0xAF, 0xFF),
            dim: Color::Rgb(0x6C, 0x72, 0x80),
            error: Color::Rgb(0xFF, 0x55, 0x55),
            done: Color::Rgb(0x55, 0xD6, 0x8A),
            partial: Color::Rgb(0xF0, 0xC6, 0x4A),
            selection_bg: Color::Rgb(0x24, 0x2C, 0x3C),
        }
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

impl Theme {
    /// Create a theme from `[ui.colors]`, falling back to defaults.
    /// Unknown keys and malformed values are ignored.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "accent" => theme.accent = color,
                    "dim" => theme.dim = color,
                    "error" => theme.error = color,
                    "done" => theme.done = color,
                    "partial" => theme.partial = color,
                    "selection_bg" => theme.selection_bg = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Color for a `done / total` completion figure
    pub fn completion_color(&self, done: u32, total: u32) -> Color {
        if total > 0 && done >= total {
            self.done
        } else if done > 0 {
            self.partial
        } else {
            self.text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#FF4444"),
            Some(Color::Rgb(0xFF, 0x44, 0x44))
        );
        assert_eq!(parse_hex_color("FF4444"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None);
    }

    #[test]
    fn test_from_config_overrides() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("accent".into(), "not a color".into());
        ui.colors.insert("nonsense".into(), "#112233".into());

        let theme = Theme::from_config(&ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.accent, Theme::default().accent);
        assert_eq!(theme.text, Color::Rgb(0xC8, 0xCC, 0xD4));
    }

    #[test]
    fn test_completion_color() {
        let theme = Theme::default();
        assert_eq!(theme.completion_color(0, 0), theme.text);
        assert_eq!(theme.completion_color(0, 5), theme.text);
        assert_eq!(theme.completion_color(2, 5), theme.partial);
        assert_eq!(theme.completion_color(5, 5), theme.done);
    }
}
