//! Page body: supplied text rendered verbatim, or nothing at all.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::Widget,
};

use super::theme::Theme;

/// Pre-supplied page content.  Lines are kept exactly as given.
#[derive(Debug, Clone, Default)]
pub struct ContentSlot {
    lines: Vec<String>,
}

impl ContentSlot {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Widget showing the slot starting at line `first`.
    pub fn view(&self, first: usize) -> ContentView<'_> {
        ContentView { slot: self, first }
    }
}

pub struct ContentView<'a> {
    slot: &'a ContentSlot,
    first: usize,
}

impl Widget for ContentView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.slot.is_empty() {
            return;
        }
        let visible = self.slot.lines.iter().skip(self.first).take(area.height as usize);
        for (i, text) in visible.enumerate() {
            let line = Line::styled(text.as_str(), Theme::content_style());
            buf.set_line(area.x, area.y + i as u16, &line, area.width);
        }
    }
}
