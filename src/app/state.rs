//! Central application state.
//!
//! The viewport and the mounted header live side by side here; the header
//! only ever hears about the viewport through its subscription.

use crate::config::AppConfig;
use crate::core::sticky::{HeaderSignal, StickyHeader};
use crate::core::viewport::{PageViewport, Viewport};
use crate::ui::app_bar::HeaderPresentation;
use crate::ui::content_slot::ContentSlot;
use crate::ui::page::PageGeometry;
use crate::ui::slide::HeaderSlide;

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// The scrolled page.
    pub viewport: PageViewport,
    /// Mounted header component.
    pub header: StickyHeader,
    /// Pinned-header slide animation.
    pub slide: HeaderSlide,
    pub content: ContentSlot,
    /// Shown in the header bar.
    pub title: String,
    /// Network lost; shows the warning banner.
    pub offline: bool,
    /// Alternate rendering mode.
    pub amp: bool,
    /// Height of the page viewport from the last frame.
    pub viewport_rows: u16,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AppConfig, content: ContentSlot, title: String) -> Self {
        let mut viewport = PageViewport::new(0);
        let header = StickyHeader::mount(config.header_options(), &mut viewport);
        Self {
            config,
            viewport,
            header,
            slide: HeaderSlide::default(),
            content,
            title,
            offline: false,
            amp: false,
            viewport_rows: 0,
            should_quit: false,
            status_message: None,
        }
    }

    pub fn page_geometry(&self) -> PageGeometry {
        PageGeometry::new(
            self.config.row_px,
            self.config.header_height,
            self.offline,
            self.content.line_count(),
        )
    }

    /// Recompute the scrollable range for a viewport `rows` tall.
    pub fn relayout(&mut self, rows: u16) {
        self.viewport_rows = rows;
        let max = self.page_geometry().max_scroll_y(rows);
        self.viewport.set_max_scroll_y(max);
    }

    pub fn presentation(&self) -> HeaderPresentation {
        HeaderPresentation::derive(
            self.header.flags(),
            self.header.options().fixed,
            self.amp,
            self.viewport.scroll_y(),
        )
    }

    /// Feed one header signal plus anything queued behind it.
    pub fn apply_header_signal(&mut self, signal: HeaderSignal) {
        self.header.handle(signal);
        while let Some(next) = self.header.try_recv_scroll() {
            self.header.handle(next);
        }
        let p = self.presentation();
        self.slide.set_target(p.unstuck, p.animate);
    }

    /// Flip the always-fixed option.  Remounts the header.
    pub fn toggle_fixed(&mut self) {
        self.config.fixed = !self.config.fixed;
        self.header.remount(self.config.header_options(), &mut self.viewport);
        self.slide.set_target(false, false);
        self.status_message = Some(format!(
            "Header {}",
            if self.config.fixed { "fixed" } else { "follows scroll" }
        ));
    }

    pub fn toggle_offline(&mut self) {
        self.offline = !self.offline;
        let rows = self.viewport_rows;
        self.relayout(rows);
        self.status_message = Some(if self.offline { "Offline" } else { "Back online" }.into());
    }
}
