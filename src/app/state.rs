//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::Instant;

use crate::config::AppConfig;
use crate::core::viewport::Viewport;
use crate::ui::smooth_scroll::SmoothScroll;

use super::page::Page;

/// Top-level application state.
pub struct AppState {
    /// Content, layout and every reveal container.
    pub page: Page,
    /// Eased page scroll.
    pub scroll: SmoothScroll,
    /// Rows available to the page (terminal height minus the status bar).
    pub viewport_height: u16,
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, viewport_height: u16) -> Self {
        let mut scroll = SmoothScroll::new(config.scroll_speed);
        scroll.set_limit(page.height(), viewport_height);
        Self {
            page,
            scroll,
            viewport_height,
            config,
            should_quit: false,
            status_message: None,
        }
    }

    /// The page rows currently on screen.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll.row(), self.viewport_height)
    }

    /// Terminal resized: re-layout and re-clamp scrolling.
    pub fn resize(&mut self, width: u16, page_height: u16) {
        self.viewport_height = page_height;
        self.page.relayout(width);
        self.scroll.set_limit(self.page.height(), page_height);
    }

    /// Advance one frame: ease the scroll, then let every container observe
    /// the new viewport and fire due reveals.
    pub fn on_frame(&mut self, now: Instant) -> usize {
        self.scroll.tick();
        self.page.update(self.viewport(), now)
    }

    /// Whether another frame would change anything on screen.
    pub fn needs_redraw(&self, now: Instant) -> bool {
        self.scroll.is_animating() || self.page.is_animating(now)
    }

    pub fn status_line(&self) -> String {
        let (done, total) = self.page.reveal_progress();
        match self.page.watching() {
            0 => format!("revealed {done}/{total}"),
            waiting => format!("revealed {done}/{total} ({waiting} waiting)"),
        }
    }
}
