//! Header chrome: presentation states, the bar itself, the offline banner.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::core::header::HeaderFlags;

use super::theme::Theme;

// ───────────────────────────────────────── presentation ──────

/// Visual states the bar is drawn with, derived fresh every frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderPresentation {
    /// Configured as permanently pinned.
    pub fixed: bool,
    /// Out of page flow, pinned to the viewport top.
    pub hidden: bool,
    /// Pinned but slid fully out of view.
    pub unstuck: bool,
    /// Slide changes ease instead of snapping.
    pub animate: bool,
    /// Alternate rendering mode chrome.
    pub amp: bool,
}

impl HeaderPresentation {
    pub fn derive(flags: HeaderFlags, fixed: bool, amp: bool, scroll_y: u32) -> Self {
        Self {
            fixed,
            hidden: flags.hidden,
            unstuck: flags.unstuck(),
            animate: flags.animate && scroll_y > 0,
            amp,
        }
    }

    /// Drawn relative to the viewport rather than the page.
    pub fn pinned(&self) -> bool {
        self.fixed || self.hidden
    }
}

// ───────────────────────────────────────── bar ───────────────

/// The header bar.  Fills every cell of its area.
pub struct AppBar<'a> {
    pub title: &'a str,
    pub hint: &'a str,
    pub presentation: HeaderPresentation,
}

impl Widget for AppBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let style = if self.presentation.amp {
            Theme::header_amp_style()
        } else {
            Theme::header_style()
        };
        buf.set_style(area, style);

        let title = Line::from(vec![
            Span::styled(format!(" {} ", self.title), Theme::title_style()),
            Span::styled(self.hint, style),
        ]);

        if area.height < 3 {
            buf.set_line(area.x, area.y, &title, area.width);
            return;
        }

        let border = if self.presentation.pinned() {
            Theme::header_pinned_border_style()
        } else {
            Theme::header_border_style()
        };
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(border)
            .style(style);
        let inner = block.inner(area);
        block.render(area, buf);

        // Vertically centre the toolbar in what remains.
        let y = inner.y + inner.height.saturating_sub(1) / 2;
        buf.set_line(inner.x, y, &title, inner.width);
    }
}

// ───────────────────────────────────────── offline ───────────

/// One-row warning shown above the header while offline.
pub struct OfflineBanner<'a> {
    pub message: &'a str,
}

impl Widget for OfflineBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(Theme::offline_style())
            .render(area, buf);
    }
}
