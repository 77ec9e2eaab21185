//! Color palette and accessibility hooks for dashboard rendering.

#![allow(missing_docs)]

use std::env;

use crossterm::style::Color;

/// Color output mode for compatibility with `NO_COLOR` and terminal policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Enabled,
    Disabled,
}

/// Render-facing theme shared by all panes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub color: ColorMode,
}

/// Fixed palette the bars cycle through by position within a group.
pub const BAR_PALETTE: [Color; 5] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
];

/// Foreground for labels, separators, and chrome.
pub const FOREGROUND: Color = Color::White;

/// Muted foreground for hints and secondary text.
pub const MUTED: Color = Color::DarkGrey;

/// Help overlay colors mirror the canonical yellow box with black text.
pub const HELP_BG: Color = Color::Yellow;
pub const HELP_FG: Color = Color::Black;

impl Theme {
    /// Theme honoring an explicit no-color request.
    #[must_use]
    pub const fn from_no_color_flag(no_color: bool) -> Self {
        Self {
            color: if no_color {
                ColorMode::Disabled
            } else {
                ColorMode::Enabled
            },
        }
    }

    /// Theme honoring the `NO_COLOR` convention.
    #[must_use]
    pub fn from_environment() -> Self {
        Self::from_no_color_flag(env::var_os("NO_COLOR").is_some())
    }

    #[must_use]
    pub const fn no_color(self) -> bool {
        matches!(self.color, ColorMode::Disabled)
    }

    /// Bar color for a palette slot, `White` when color is disabled.
    #[must_use]
    pub const fn bar_color(self, color_index: usize) -> Color {
        if self.no_color() {
            FOREGROUND
        } else {
            BAR_PALETTE[color_index % BAR_PALETTE.len()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_by_index() {
        let theme = Theme::from_no_color_flag(false);
        assert_eq!(theme.bar_color(0), BAR_PALETTE[0]);
        assert_eq!(theme.bar_color(5), BAR_PALETTE[0]);
        assert_eq!(theme.bar_color(7), BAR_PALETTE[2]);
    }

    #[test]
    fn no_color_collapses_to_foreground() {
        let theme = Theme::from_no_color_flag(true);
        assert!(theme.no_color());
        assert_eq!(theme.bar_color(0), FOREGROUND);
        assert_eq!(theme.bar_color(3), FOREGROUND);
    }
}
