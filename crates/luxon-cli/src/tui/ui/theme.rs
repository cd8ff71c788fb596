//! Color palette and styling for the dashboard.
//!
//! Category colors come from the classifier so the dashboard, the text
//! output and the JSON `color` field always agree.

use luxon_core::{HIGH_COLOR, Rgb};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Convert a classifier color to a terminal color.
pub const fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

/// Color of the `ON` half of the logo and the test mode badge.
pub const LOGO_ACCENT: Color = rgb(HIGH_COLOR);

/// Application theme with all UI colors.
#[derive(Debug, Clone, Copy)]
pub struct AppTheme {
    pub primary: Color,
    pub warning: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub border_active: Color,
    pub border_inactive: Color,

    pub bg_track: Color,
    pub bg_header: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: LOGO_ACCENT,
            warning: Color::Rgb(251, 191, 36), // amber-400

            text_primary: Color::Rgb(248, 250, 252),   // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),     // slate-500

            border_active: LOGO_ACCENT,
            border_inactive: Color::Rgb(71, 85, 105), // slate-600

            bg_track: Color::Rgb(51, 65, 85),  // slate-700
            bg_header: Color::Rgb(30, 41, 59), // slate-800
        }
    }

    /// Style for active/focused borders.
    #[inline]
    #[must_use]
    pub fn border_active_style(&self) -> Style {
        Style::default().fg(self.border_active)
    }

    /// Style for inactive borders.
    #[inline]
    #[must_use]
    pub fn border_inactive_style(&self) -> Style {
        Style::default().fg(self.border_inactive)
    }

    /// Style for titles.
    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for header/app bar.
    #[inline]
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

#[cfg(test)]
mod tests {
    use super::*;
    use luxon_core::LOW_COLOR;

    #[test]
    fn test_rgb_conversion() {
        assert_eq!(rgb(LOW_COLOR), Color::Rgb(0xC5, 0x6A, 0x67));
        assert_eq!(LOGO_ACCENT, Color::Rgb(0xD4, 0xAF, 0x63));
    }
}
