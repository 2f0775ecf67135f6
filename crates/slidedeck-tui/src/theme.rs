use ratatui::style::Color;
use slidedeck_core::password::ColorToken;

use crate::themes::parse_hex_color;

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
    pub muted: Color,

    // Semantic colors
    pub accent: Color,
    pub selection: Color,
    pub success: Color,
    pub error: Color,
    pub warning: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::gruvbox_dark()
    }
}

impl Theme {
    /// Terminal color for a password meter token
    ///
    /// `transparent` maps to the empty-bar background.
    pub fn token_color(&self, token: ColorToken) -> Color {
        match token {
            ColorToken::Transparent => self.bg2,
            ColorToken::Hex(hex) => parse_hex_color(hex).unwrap_or(self.accent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_color() {
        let theme = Theme::default();
        assert_eq!(theme.token_color(ColorToken::Transparent), theme.bg2);
        assert_eq!(
            theme.token_color(ColorToken::Hex("#00bcd4")),
            Color::Rgb(0x00, 0xbc, 0xd4)
        );
    }
}
