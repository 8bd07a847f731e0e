//! Layout helpers — split the terminal area into regions and place every page
//! block in page-row coordinates.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::catalog::{Benefit, Catalog, CategoryGroup};
use crate::core::viewport::Region;

/// Primary screen layout with the scrolling page and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

// ───────────────────────────────────────── page geometry ─────

const SIDE_MARGIN: u16 = 2;
const COLUMN_GAP: u16 = 2;
const SECTION_GAP: i32 = 2;

/// A rectangle on the page.  `top` is a page row, not a screen row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageRect {
    pub x: u16,
    pub top: i32,
    pub width: u16,
    pub height: u16,
}

impl PageRect {
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    pub fn region(&self) -> Region {
        Region::new(self.top, self.height)
    }

    /// Smallest rect covering both.
    fn union(&self, other: &PageRect) -> PageRect {
        let x = self.x.min(other.x);
        let top = self.top.min(other.top);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = self.bottom().max(other.bottom());
        PageRect {
            x,
            top,
            width: right - x,
            height: (bottom - top) as u16,
        }
    }
}

/// Where every block of the page sits for a given terminal width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub width: u16,
    pub title: PageRect,
    pub benefit_grid: PageRect,
    pub benefit_cards: Vec<PageRect>,
    pub category_cards: Vec<PageRect>,
    /// The tree-listing rows inside each category card.
    pub category_lists: Vec<PageRect>,
    pub height: i32,
}

/// Inner width of a bordered card with one column of padding per side.
pub fn card_inner_width(card_width: u16) -> u16 {
    card_width.saturating_sub(4).max(1)
}

impl PageLayout {
    pub fn compute(catalog: &Catalog, title_description: &str, width: u16) -> Self {
        let content_w = width.saturating_sub(SIDE_MARGIN * 2).max(1);
        let mut layout = PageLayout {
            width,
            ..Default::default()
        };

        let title_lines = wrap(title_description, content_w).len() as u16;
        layout.title = PageRect {
            x: SIDE_MARGIN,
            top: 1,
            width: content_w,
            height: 2 + title_lines,
        };
        let mut cursor = layout.title.bottom() + SECTION_GAP;

        let cols = match content_w {
            w if w >= 120 => 4,
            w if w >= 60 => 2,
            _ => 1,
        };
        let (cards, bottom) = place_grid(
            &catalog.benefits,
            cols,
            content_w,
            cursor,
            benefit_card_height,
        );
        layout.benefit_grid = match (cards.first(), cards.last()) {
            (Some(first), Some(last)) => first.union(last),
            _ => PageRect {
                x: SIDE_MARGIN,
                top: cursor,
                width: content_w,
                height: 0,
            },
        };
        layout.benefit_cards = cards;
        cursor = bottom + SECTION_GAP;

        let cols = if content_w >= 100 { 2 } else { 1 };
        let (cards, bottom) = place_grid(
            &catalog.groups,
            cols,
            content_w,
            cursor,
            category_card_height,
        );
        layout.category_lists = cards
            .iter()
            .zip(&catalog.groups)
            .map(|(card, group)| {
                let desc = wrap(&group.description, card_inner_width(card.width)).len() as i32;
                PageRect {
                    x: card.x + 2,
                    top: card.top + 1 + 4 + desc,
                    width: card_inner_width(card.width),
                    height: group.items.len() as u16,
                }
            })
            .collect();
        layout.category_cards = cards;
        layout.height = bottom + 1;
        layout
    }
}

/// Lay `records` out left-to-right, top-to-bottom in `cols` columns.  Each grid
/// row is as tall as its tallest card.  Returns the rects and the bottom row.
fn place_grid<T>(
    records: &[T],
    cols: u16,
    content_w: u16,
    top: i32,
    height_of: fn(&T, u16) -> u16,
) -> (Vec<PageRect>, i32) {
    let card_w = content_w.saturating_sub(COLUMN_GAP * (cols - 1)) / cols;
    let mut rects = Vec::with_capacity(records.len());
    let mut row_top = top;
    let mut bottom = top;

    for chunk in records.chunks(cols as usize) {
        let row_h = chunk.iter().map(|r| height_of(r, card_w)).max().unwrap_or(0);
        for (col, _) in chunk.iter().enumerate() {
            rects.push(PageRect {
                x: SIDE_MARGIN + col as u16 * (card_w + COLUMN_GAP),
                top: row_top,
                width: card_w,
                height: row_h,
            });
        }
        bottom = row_top + row_h as i32;
        row_top = bottom + 1;
    }
    (rects, bottom)
}

fn benefit_card_height(benefit: &Benefit, card_w: u16) -> u16 {
    let desc = wrap(&benefit.description, card_inner_width(card_w)).len() as u16;
    // border, icon, title, gap, description, gap, features, border
    2 + 3 + desc + 1 + benefit.features.len() as u16
}

fn category_card_height(group: &CategoryGroup, card_w: u16) -> u16 {
    let desc = wrap(&group.description, card_inner_width(card_w)).len() as u16;
    // border, title, separator, description, gap, prompt, items, border
    2 + 2 + desc + 2 + group.items.len() as u16
}

/// Greedy word wrap.  Words wider than `width` are split.
pub fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        if word.is_empty() {
            continue;
        }
        let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
        if needed > width {
            lines.push(std::mem::take(&mut line));
            line_len = 0;
        }
        if line_len > 0 {
            line.push(' ');
            line_len += 1;
        }
        line.extend(word.iter());
        line_len += word.len();
    }
    if line_len > 0 {
        lines.push(line);
    }
    lines
}
