//! The scrolling page.  Every block is drawn into an off-screen buffer in page
//! coordinates, then the rows under the viewport are copied to the frame.

use std::time::Instant;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::Widget,
};

use crate::app::page::{Page, SECTION_DESCRIPTION, SECTION_TITLE};
use crate::core::reveal::Presentation;
use crate::core::tween::VisualState;

use super::cards::{BenefitCard, CategoryCard, SectionTitle};
use super::layout::PageRect;
use super::theme::Theme;

pub struct PageWidget<'a> {
    page: &'a Page,
    scroll: i32,
    now: Instant,
    host: &'a str,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, now: Instant) -> Self {
        Self {
            page,
            scroll: 0,
            now,
            host: "GitOps/NOW",
        }
    }

    /// First page row shown at the top of the area.
    pub fn scroll(mut self, scroll: i32) -> Self {
        self.scroll = scroll;
        self
    }

    pub fn host(mut self, host: &'a str) -> Self {
        self.host = host;
        self
    }

    /// Draw the whole page, top to bottom.
    fn render_page(&self) -> Buffer {
        let layout = self.page.layout();
        let height = layout.height.clamp(0, u16::MAX as i32) as u16;
        let bounds = Rect::new(0, 0, layout.width, height);
        let mut page = Buffer::empty(bounds);
        page.set_style(bounds, Theme::page_style());

        if let Some(title) = self.page.title().presentation(0, self.now) {
            if let Some(area) = placed(layout.title, title.visual, bounds) {
                SectionTitle {
                    title: SECTION_TITLE,
                    description: SECTION_DESCRIPTION,
                    opacity: title.visual.opacity,
                }
                .render(area, &mut page);
            }
        }

        for ((benefit, reveal), rect) in self
            .page
            .catalog()
            .benefits
            .iter()
            .zip(self.page.benefits())
            .zip(&layout.benefit_cards)
        {
            let Some(shown) = reveal.presentation(0, self.now) else {
                continue;
            };
            if let Some(area) = placed(*rect, shown.visual, bounds) {
                BenefitCard {
                    benefit,
                    opacity: shown.visual.opacity,
                }
                .render(area, &mut page);
            }
        }

        for ((group, reveal), rect) in self
            .page
            .catalog()
            .groups
            .iter()
            .zip(self.page.categories())
            .zip(&layout.category_cards)
        {
            let Some(card) = reveal.card.presentation(0, self.now) else {
                continue;
            };
            let Some(area) = placed(*rect, card.visual, bounds) else {
                continue;
            };
            let rows: Vec<Presentation> = (0..reveal.rows.len())
                .filter_map(|i| reveal.rows.presentation(i, self.now))
                .collect();
            CategoryCard {
                group,
                opacity: card.visual.opacity,
                rows,
                host: self.host,
            }
            .render(area, &mut page);
        }

        page
    }
}

/// Screen rect for a block after applying its tween offsets, or `None` when
/// there is nothing to draw.
fn placed(rect: PageRect, visual: VisualState, bounds: Rect) -> Option<Rect> {
    if visual.opacity <= 0.0 || rect.height == 0 {
        return None;
    }
    let x = (rect.x as i32 + visual.offset_x as i32).max(0);
    let y = (rect.top + visual.offset_y as i32).max(0);
    if x > u16::MAX as i32 || y > u16::MAX as i32 {
        return None;
    }
    let area = Rect::new(x as u16, y as u16, rect.width, rect.height).intersection(bounds);
    (!area.is_empty()).then_some(area)
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::page_style());
        let page = self.render_page();

        for dy in 0..area.height {
            let row = self.scroll + dy as i32;
            if row < 0 || row >= page.area.height as i32 {
                continue;
            }
            for dx in 0..area.width.min(page.area.width) {
                let Some(src) = page.cell((dx, row as u16)) else {
                    continue;
                };
                if let Some(dst) = buf.cell_mut((area.x + dx, area.y + dy)) {
                    *dst = src.clone();
                }
            }
        }
    }
}
