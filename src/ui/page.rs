//! The scrolled page: offline banner, header slot, content, pinned header.
//!
//! Page flow, top to bottom: banner row (only while offline), the header
//! slot (always reserved, `header_height` px tall), then the content lines.
//! Offsets are virtual pixels; one terminal row is `row_px` of them.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use super::app_bar::{AppBar, HeaderPresentation, OfflineBanner};
use super::content_slot::ContentSlot;

// ───────────────────────────────────────── geometry ──────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    pub row_px: u32,
    pub banner_rows: u16,
    pub header_rows: u16,
    pub content_rows: usize,
}

impl PageGeometry {
    pub fn new(row_px: u32, header_height: u32, offline: bool, content_rows: usize) -> Self {
        let row_px = row_px.max(1);
        Self {
            row_px,
            banner_rows: u16::from(offline),
            header_rows: u16::try_from(header_height.div_ceil(row_px)).unwrap_or(u16::MAX),
            content_rows,
        }
    }

    pub fn total_rows(&self) -> usize {
        usize::from(self.banner_rows) + usize::from(self.header_rows) + self.content_rows
    }

    /// Largest offset that still fills a viewport of `viewport_rows`.
    pub fn max_scroll_y(&self, viewport_rows: u16) -> u32 {
        let rows = self.total_rows().saturating_sub(usize::from(viewport_rows));
        u32::try_from(rows)
            .unwrap_or(u32::MAX)
            .saturating_mul(self.row_px)
    }

    /// First page row visible at `scroll_y`.
    pub fn top_row(&self, scroll_y: u32) -> i64 {
        i64::from(scroll_y / self.row_px)
    }
}

// ───────────────────────────────────────── widget ────────────

/// Whole-page widget: created fresh each frame.
pub struct PageView<'a> {
    pub geometry: PageGeometry,
    pub scroll_y: u32,
    pub presentation: HeaderPresentation,
    /// Rows the pinned header is currently slid above the viewport.
    pub slide_rows: u16,
    pub content: &'a ContentSlot,
    pub offline_warning: Option<&'a str>,
    pub title: &'a str,
    pub hint: &'a str,
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let geo = self.geometry;
        let top = geo.top_row(self.scroll_y);
        let height = i64::from(area.height);

        if let Some(message) = self.offline_warning.filter(|_| geo.banner_rows > 0) {
            let y = -top;
            if (0..height).contains(&y) {
                let row = Rect::new(area.x, area.y + y as u16, area.width, 1);
                OfflineBanner { message }.render(row, buf);
            }
        }

        let content_top = i64::from(geo.banner_rows) + i64::from(geo.header_rows) - top;
        if content_top < height {
            let y = content_top.max(0);
            let first = usize::try_from(-content_top.min(0)).unwrap_or(0);
            let rect = Rect::new(area.x, area.y + y as u16, area.width, (height - y) as u16);
            self.content.view(first).render(rect, buf);
        }

        if geo.header_rows == 0 {
            return;
        }
        let mut bar = Buffer::empty(Rect::new(0, 0, area.width, geo.header_rows));
        AppBar {
            title: self.title,
            hint: self.hint,
            presentation: self.presentation,
        }
        .render(bar.area, &mut bar);

        let bar_top = if self.presentation.pinned() {
            -i64::from(self.slide_rows)
        } else {
            i64::from(geo.banner_rows) - top
        };
        blit(&bar, buf, area, bar_top);
    }
}

/// Copy `src` into `area` of `dst` with `src`'s first row landing `top` rows
/// below `area.y`.  Rows outside `area` are clipped.
fn blit(src: &Buffer, dst: &mut Buffer, area: Rect, top: i64) {
    for sy in 0..src.area.height {
        let y = top + i64::from(sy);
        if y < 0 || y >= i64::from(area.height) {
            continue;
        }
        let dy = area.y + y as u16;
        for sx in 0..src.area.width.min(area.width) {
            dst[(area.x + sx, dy)] = src[(src.area.x + sx, src.area.y + sy)].clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::header::HeaderFlags;

    use super::*;

    const W: u16 = 40;

    fn content() -> ContentSlot {
        let text: Vec<String> = (0..50).map(|i| format!("line {i}")).collect();
        ContentSlot::new(&text.join("\n"))
    }

    fn draw(
        scroll_y: u32,
        flags: HeaderFlags,
        slide_rows: u16,
        offline: bool,
        content: &ContentSlot,
    ) -> Buffer {
        let geometry = PageGeometry::new(16, 64, offline, content.line_count());
        let area = Rect::new(0, 0, W, 10);
        let mut buf = Buffer::empty(area);
        PageView {
            geometry,
            scroll_y,
            presentation: HeaderPresentation::derive(flags, false, false, scroll_y),
            slide_rows,
            content,
            offline_warning: Some("offline!"),
            title: "Shop",
            hint: "",
        }
        .render(area, &mut buf);
        buf
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..W).map(|x| buf[(x, y)].symbol()).collect::<String>().trim().to_string()
    }

    #[test]
    fn geometry_rows_and_range() {
        let geo = PageGeometry::new(16, 64, true, 20);
        assert_eq!(geo.header_rows, 4);
        assert_eq!(geo.total_rows(), 25);
        assert_eq!(geo.max_scroll_y(10), 15 * 16);
        assert_eq!(geo.max_scroll_y(40), 0);
        assert_eq!(PageGeometry::new(16, 65, false, 0).header_rows, 5);
    }

    #[test]
    fn header_in_flow_at_top() {
        let content = content();
        let buf = draw(0, HeaderFlags::default(), 0, false, &content);
        assert!(row(&buf, 1).contains("Shop"));
        assert_eq!(row(&buf, 4), "line 0");
    }

    #[test]
    fn header_scrolls_with_page_before_hiding() {
        let content = content();
        // Two rows scrolled: the bar's title row is gone, its divider remains.
        let buf = draw(32, HeaderFlags::default(), 0, false, &content);
        assert!(!row(&buf, 0).contains("Shop"));
        assert_eq!(row(&buf, 2), "line 0");
    }

    #[test]
    fn unstuck_header_is_off_screen() {
        let content = content();
        let flags = HeaderFlags {
            stuck: false,
            hidden: true,
            animate: false,
        };
        let buf = draw(160, flags, 4, false, &content);
        assert_eq!(row(&buf, 0), "line 6");
    }

    #[test]
    fn stuck_header_overlays_viewport_top() {
        let content = content();
        let flags = HeaderFlags {
            stuck: true,
            hidden: true,
            animate: false,
        };
        let buf = draw(160, flags, 0, false, &content);
        assert!(row(&buf, 1).contains("Shop"));
        assert_eq!(row(&buf, 4), "line 10");
    }

    #[test]
    fn offline_banner_sits_above_header() {
        let content = content();
        let buf = draw(0, HeaderFlags::default(), 0, true, &content);
        assert_eq!(row(&buf, 0), "offline!");
        assert!(row(&buf, 2).contains("Shop"));
        assert_eq!(row(&buf, 5), "line 0");
    }
}
