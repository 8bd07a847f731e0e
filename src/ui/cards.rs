//! Card widgets.  Each one draws a single catalog record at a given opacity;
//! positioning and offsets are the page widget's job.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Widget},
};

use crate::core::catalog::{Benefit, CategoryGroup};
use crate::core::reveal::Presentation;
use crate::core::tree_list::{format_tree_list, terminal_path};

use super::icons::{self, FEATURE_GLYPH};
use super::layout::wrap;
use super::theme::Theme;

/// Card interior: inside the border with one column of padding each side.
fn padded(block: &Block, area: Rect) -> Rect {
    let inner = block.inner(area);
    Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(2),
        ..inner
    }
}

fn card_block(opacity: f32) -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style(opacity))
}

/// Writes successive lines into `area`, dropping anything past its bottom.
struct Rows<'b> {
    buf: &'b mut Buffer,
    area: Rect,
    y: u16,
}

impl<'b> Rows<'b> {
    fn new(buf: &'b mut Buffer, area: Rect) -> Self {
        Self { buf, area, y: area.y }
    }

    fn push(&mut self, line: &Line) {
        self.push_at(0, line);
    }

    fn push_at(&mut self, indent: u16, line: &Line) {
        if self.y < self.area.bottom() && indent < self.area.width {
            let target = Rect::new(self.area.x + indent, self.y, self.area.width - indent, 1);
            // Rendering (rather than `set_line`) honours the line's alignment.
            line.clone().render(target, self.buf);
        }
        self.y = self.y.saturating_add(1);
    }

    fn skip(&mut self) {
        self.y = self.y.saturating_add(1);
    }
}

// ───────────────────────────────────────── title ─────────────

/// Centered section heading with its tagline.
pub struct SectionTitle<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub opacity: f32,
}

impl Widget for SectionTitle<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut rows = Rows::new(buf, area);
        let heading = Line::from(vec![
            Span::styled("🚀 ", Theme::accent_style(self.opacity)),
            Span::styled(self.title, Theme::heading_style(self.opacity)),
        ])
        .alignment(Alignment::Center);
        rows.push(&heading);
        rows.skip();
        for text in wrap(self.description, area.width) {
            let line = Line::styled(text, Theme::body_style(self.opacity)).alignment(Alignment::Center);
            rows.push(&line);
        }
    }
}

// ───────────────────────────────────────── benefit ───────────

/// A benefit card: icon, title, description, feature rows.
pub struct BenefitCard<'a> {
    pub benefit: &'a Benefit,
    pub opacity: f32,
}

impl Widget for BenefitCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let o = self.opacity;
        let block = card_block(o);
        let inner = padded(&block, area);
        block.render(area, buf);
        if inner.width == 0 {
            return;
        }

        let mut rows = Rows::new(buf, inner);
        rows.push(&Line::styled(
            icons::glyph_or_placeholder(&self.benefit.icon),
            Theme::accent_style(o),
        ));
        rows.push(&Line::styled(self.benefit.title.as_str(), Theme::heading_style(o)));
        rows.skip();
        for text in wrap(&self.benefit.description, inner.width) {
            rows.push(&Line::styled(text, Theme::body_style(o)));
        }
        rows.skip();
        for feature in &self.benefit.features {
            rows.push(&Line::from(vec![
                Span::styled(FEATURE_GLYPH, Theme::accent_style(o)),
                Span::raw(" "),
                Span::styled(feature.as_str(), Theme::muted_style(o)),
            ]));
        }
    }
}

// ───────────────────────────────────────── category ──────────

/// A category card with its tree-formatted item listing.  Each row carries
/// its own presentation so rows can stagger in after the card.
pub struct CategoryCard<'a> {
    pub group: &'a CategoryGroup,
    pub opacity: f32,
    pub rows: Vec<Presentation>,
    /// Host segment of the pseudo prompt (`root@<host>/...`).
    pub host: &'a str,
}

impl Widget for CategoryCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let o = self.opacity;
        let block = card_block(o);
        let inner = padded(&block, area);
        block.render(area, buf);
        if inner.width == 0 {
            return;
        }

        let mut rows = Rows::new(buf, inner);
        rows.push(&Line::from(vec![
            Span::styled(icons::glyph_or_placeholder(&self.group.icon), Theme::accent_style(o)),
            Span::raw(" "),
            Span::styled(self.group.title.as_str(), Theme::heading_style(o)),
        ]));
        rows.push(&Line::styled(
            "─".repeat(inner.width as usize),
            Theme::separator_style(o),
        ));
        for text in wrap(&self.group.description, inner.width) {
            rows.push(&Line::styled(text, Theme::body_style(o)));
        }
        rows.skip();
        rows.push(&Line::from(vec![
            Span::styled(format!("root@{}/", self.host), Theme::muted_style(o)),
            Span::styled(terminal_path(&self.group.title), Theme::prompt_style(o)),
            Span::styled("/", Theme::muted_style(o)),
        ]));

        for (i, entry) in format_tree_list(&self.group.items).into_iter().enumerate() {
            let Some(row) = self.rows.get(i).filter(|p| !p.is_invisible()) else {
                rows.skip();
                continue;
            };
            let ro = o * row.visual.opacity;
            // Rows slide in from the left; clamp so they never leave the card.
            let indent = 1i16.saturating_add(row.visual.offset_x).max(0) as u16;
            rows.push_at(
                indent,
                &Line::from(vec![
                    Span::styled(entry.prefix, Theme::muted_style(ro)),
                    Span::raw(" "),
                    Span::styled(entry.text, Theme::heading_style(ro)),
                ]),
            );
        }
    }
}
