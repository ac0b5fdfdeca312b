//! Theme definitions for colors, symbols, and badges.

use owo_colors::{OwoColorize, Style};

/// Symbol pair for ASCII and Unicode variants.
#[derive(Debug, Clone)]
pub struct SymbolPair {
    pub ascii: &'static str,
    pub unicode: &'static str,
}

impl SymbolPair {
    pub const fn new(ascii: &'static str, unicode: &'static str) -> Self {
        Self { ascii, unicode }
    }

    /// Get the appropriate symbol based on unicode flag.
    pub fn get(&self, unicode: bool) -> &'static str {
        if unicode {
            self.unicode
        } else {
            self.ascii
        }
    }
}

/// Bullet in front of each set line.
pub const BULLET: SymbolPair = SymbolPair::new("-", "\u{2022}");
/// Bar segment in progress charts.
pub const BAR: SymbolPair = SymbolPair::new("#", "\u{2588}");
/// Marker for days with workouts in the calendar.
pub const MARK: SymbolPair = SymbolPair::new("*", "\u{25CF}");

/// Badge types for status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Badge {
    Ok,
    Err,
}

impl Badge {
    /// Get badge with symbol for display.
    pub fn display(&self, unicode: bool) -> &'static str {
        match (self, unicode) {
            (Self::Ok, true) => "[\u{2713}]",
            (Self::Ok, false) => "[OK]",
            (Self::Err, true) => "[\u{2717}]",
            (Self::Err, false) => "[ERR]",
        }
    }

    pub fn style(&self) -> Style {
        match self {
            Self::Ok => styles::success(),
            Self::Err => styles::error(),
        }
    }
}

/// Named styles used across the renderers.
pub mod styles {
    use owo_colors::Style;

    pub fn bold() -> Style {
        Style::new().bold()
    }

    pub fn dim() -> Style {
        Style::new().dimmed()
    }

    pub fn success() -> Style {
        Style::new().green().bold()
    }

    pub fn error() -> Style {
        Style::new().red().bold()
    }

    pub fn info() -> Style {
        Style::new().cyan()
    }

    pub fn accent() -> Style {
        Style::new().cyan().bold()
    }
}

/// Apply `style` when color is enabled; otherwise return the text unchanged.
pub fn styled(text: &str, style: Style, color: bool) -> String {
    if color {
        text.style(style).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_display() {
        assert_eq!(Badge::Ok.display(false), "[OK]");
        assert_eq!(Badge::Err.display(false), "[ERR]");
        assert_eq!(Badge::Ok.display(true), "[\u{2713}]");
    }

    #[test]
    fn test_symbol_pair() {
        assert_eq!(BULLET.get(false), "-");
        assert_eq!(BULLET.get(true), "\u{2022}");
    }

    #[test]
    fn test_styled_without_color_is_plain() {
        assert_eq!(styled("Chest", styles::bold(), false), "Chest");
        assert_ne!(styled("Chest", styles::bold(), true), "Chest");
    }
}
