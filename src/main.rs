//! A terminal landing page whose cards and tree listings reveal with
//! staggered, scroll-triggered animation.
//!
//! Run the binary to open the interactive page.
//! Run with `--print` to write every category listing to stdout and exit.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    text::{Line, Span},
    widgets::Paragraph,
    Terminal,
};
use tracing::info;

use crate::app::{
    event::{spawn_input_reader, AppEvent},
    handler,
    page::Page,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::{catalog::Catalog, tree_list};
use crate::ui::{layout::AppLayout, page::PageWidget, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-revealed terminal landing page")]
struct Cli {
    /// Disable staggering and tweens; everything appears at once.
    #[arg(long)]
    reduced_motion: bool,

    /// Ignore the viewport and reveal every container immediately.
    #[arg(long = "no-observer")]
    no_observer: bool,

    /// Frame interval in milliseconds (overrides the config file).
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Print every category listing as a plain tree and exit.
    #[arg(long)]
    print: bool,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if self.reduced_motion {
            config.reduced_motion = true;
        }
        if self.no_observer {
            config.observe_viewport = false;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms.clamp(8, 250);
        }
    }
}

// ───────────────────────────────────────── print mode ───────

/// Plain-text rendition of every category group.
fn print_listings(catalog: &Catalog, host: &str, out: &mut impl Write) -> io::Result<()> {
    for group in &catalog.groups {
        writeln!(out, "root@{host}/{}/", tree_list::terminal_path(&group.title))?;
        for line in tree_list::format_tree_list(&group.items) {
            writeln!(out, "{} {}", line.prefix, line.text)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);

    if cli.write_config {
        let path = config.save()?;
        println!("{}", path.display());
        return Ok(());
    }

    let catalog = Catalog::builtin();

    // ── print mode ────────────────────────────────────────────
    if cli.print {
        print_listings(&catalog, &config.prompt_host, &mut io::stdout().lock())?;
        return Ok(());
    }

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let layout = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, size.width, size.height));
    let page = Page::new(catalog, config.reveal_settings(), layout.page_area.width);
    let mut state = AppState::new(page, config, layout.page_area.height);
    info!(width = size.width, height = size.height, "starting");

    // ── async channels ────────────────────────────────────────
    let mut events = spawn_input_reader(Duration::from_millis(50));
    let mut frames = tokio::time::interval(state.config.tick_rate());
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut dirty = true;

    // ── event loop ────────────────────────────────────────────
    loop {
        if dirty {
            let now = Instant::now();
            terminal.draw(|frame| {
                let layout = AppLayout::from_area(frame.area());

                let page = PageWidget::new(&state.page, now)
                    .scroll(state.scroll.row())
                    .host(&state.config.prompt_host);
                frame.render_widget(page, layout.page_area);

                let hint = state.status_message.as_deref().unwrap_or(handler::HINT);
                let status = Paragraph::new(Line::from(vec![
                    Span::styled(format!(" {} ", state.status_line()), Theme::status_count_style()),
                    Span::raw(" "),
                    Span::raw(hint.to_string()),
                ]))
                .style(Theme::status_bar_style());
                frame.render_widget(status, layout.status_area);
            })?;
            dirty = false;
        }

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(&mut state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                    AppEvent::Resize(w, h) => {
                        let layout = AppLayout::from_area(ratatui::layout::Rect::new(0, 0, w, h));
                        state.resize(layout.page_area.width, layout.page_area.height);
                    }
                }
                dirty = true;
            }

            _ = frames.tick() => {
                let now = Instant::now();
                let revealed = state.on_frame(now);
                // Keep drawing while anything is moving; idle frames are free.
                dirty |= revealed > 0 || state.needs_redraw(now);
            }
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    drop(events);
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    let (done, total) = state.page.reveal_progress();
    info!(done, total, "exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_listing_uses_tree_prefixes() {
        let catalog = Catalog::from_records(
            Vec::new(),
            vec![crate::core::catalog::CategoryGroup::new(
                crate::core::catalog::IconRef::new("cloud"),
                "Cloud Native",
                "",
                vec!["Multi-Cloud".into(), "Auto-Scaling".into()],
            )],
        );
        let mut out = Vec::new();
        print_listings(&catalog, "host", &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "root@host/CLOUD-NATIVE/\n├── Multi-Cloud\n└── Auto-Scaling\n\n"
        );
    }

    #[test]
    fn cli_flags_override_config() {
        let cli = Cli::parse_from(["reveal-deck", "--reduced-motion", "--no-observer", "--tick-ms", "1"]);
        let mut config = AppConfig::default();
        cli.apply(&mut config);
        assert!(config.reduced_motion);
        assert!(!config.observe_viewport);
        assert_eq!(config.tick_ms, 8);
    }
}
