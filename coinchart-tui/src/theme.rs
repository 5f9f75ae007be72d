//! Neon-on-charcoal colour tokens for the price chart.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: electric cyan (borders, focus)
//! - **Positive**: neon green (price up over the window)
//! - **Negative**: hot pink (price down over the window)
//! - **Muted**: steel blue (axes, hints)

use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::neon()
    }
}

impl Theme {
    pub fn neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Line colour for a window that opened at `first` and closed at `last`.
    pub fn trend_color(&self, first: f64, last: f64) -> Color {
        if last >= first {
            self.positive
        } else {
            self.negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neon() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn trend_color_follows_direction() {
        let theme = Theme::default();
        assert_eq!(theme.trend_color(100.0, 120.0), theme.positive);
        assert_eq!(theme.trend_color(100.0, 100.0), theme.positive);
        assert_eq!(theme.trend_color(100.0, 80.0), theme.negative);
    }
}
