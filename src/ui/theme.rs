//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── header ─────────────────────────────────────────────────
    pub fn header_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    /// Alternate rendering mode gets its own chrome so it is easy to spot.
    pub fn header_amp_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::LightMagenta)
    }

    /// Divider under a header sitting in the page flow.
    pub fn header_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    /// Divider under a pinned header; stands in for the drop shadow.
    pub fn header_pinned_border_style() -> Style {
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    // ── page ───────────────────────────────────────────────────
    pub fn content_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn offline_style() -> Style {
        Style::default()
            .bg(Color::Rgb(0xf3, 0x4c, 0x4c))
            .fg(Color::White)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
