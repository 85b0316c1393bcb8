//! TUI theme and styles
//!
//! Maroon-and-gold palette matching the course branding.

use ratatui::style::{Color, Modifier, Style};

/// Application color theme
pub struct Theme;

impl Theme {
    /// Primary accent color (maroon)
    pub const PRIMARY: Color = Color::Rgb(123, 20, 50);

    /// Secondary accent color (gold)
    pub const SECONDARY: Color = Color::Rgb(255, 198, 39);

    /// Success color
    pub const SUCCESS: Color = Color::Green;

    /// Error color
    pub const ERROR: Color = Color::Red;

    /// Muted text color
    pub const MUTED: Color = Color::DarkGray;

    /// Header style
    pub fn header() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Card/section title style
    pub fn title() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Status bar style
    pub fn status_bar() -> Style {
        Style::default().bg(Color::DarkGray)
    }

    /// Selected item style
    pub fn selected() -> Style {
        Style::default().bg(Self::PRIMARY).fg(Color::White)
    }

    /// Focused form field style
    pub fn focused_field() -> Style {
        Style::default()
            .fg(Self::SECONDARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Normal text style
    pub fn normal() -> Style {
        Style::default()
    }

    /// Muted text style
    pub fn muted() -> Style {
        Style::default().fg(Self::MUTED)
    }

    /// Inline error banner style
    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    /// Success/confirmation style
    pub fn success() -> Style {
        Style::default().fg(Self::SUCCESS)
    }
}
