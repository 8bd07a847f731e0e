//! Colour palette and text styles used across the UI.
//!
//! Every colour is RGB so it can be faded toward the page background, which is
//! how opacity is drawn on a terminal.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const BACKGROUND: Color = Color::Rgb(15, 23, 42);
    pub const CARD: Color = Color::Rgb(30, 41, 59);
    pub const GOLD: Color = Color::Rgb(250, 189, 0);
    pub const GOLD_DIM: Color = Color::Rgb(180, 138, 20);
    pub const BORDER: Color = Color::Rgb(71, 85, 105);
    pub const TEXT: Color = Color::Rgb(241, 245, 249);
    pub const BODY: Color = Color::Rgb(203, 213, 225);
    pub const MUTED: Color = Color::Rgb(148, 163, 184);

    /// Blend `color` toward the page background.  `opacity` 1.0 leaves it
    /// unchanged, 0.0 returns the background.
    pub fn fade(color: Color, opacity: f32) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        match (color, Self::BACKGROUND) {
            (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
                let mix = |c: u8, base: u8| (base as f32 + (c as f32 - base as f32) * t).round() as u8;
                Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
            }
            (other, _) => {
                if t >= 0.5 {
                    other
                } else {
                    Self::BACKGROUND
                }
            }
        }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn page_style() -> Style {
        Style::default().bg(Self::BACKGROUND)
    }

    pub fn heading_style(opacity: f32) -> Style {
        Style::default()
            .fg(Self::fade(Self::TEXT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn accent_style(opacity: f32) -> Style {
        Style::default().fg(Self::fade(Self::GOLD, opacity))
    }

    pub fn body_style(opacity: f32) -> Style {
        Style::default().fg(Self::fade(Self::BODY, opacity))
    }

    pub fn muted_style(opacity: f32) -> Style {
        Style::default().fg(Self::fade(Self::MUTED, opacity))
    }

    // ── cards ──────────────────────────────────────────────────
    pub fn card_border_style(opacity: f32) -> Style {
        Style::default().fg(Self::fade(Self::BORDER, opacity))
    }

    pub fn separator_style(opacity: f32) -> Style {
        Style::default().fg(Self::fade(Self::GOLD_DIM, opacity * 0.5))
    }

    pub fn prompt_style(opacity: f32) -> Style {
        Style::default()
            .fg(Self::fade(Self::GOLD, opacity))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Self::CARD).fg(Self::TEXT)
    }

    pub fn status_count_style() -> Style {
        Style::default().bg(Self::CARD).fg(Self::GOLD)
    }
}
