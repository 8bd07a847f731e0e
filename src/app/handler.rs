//! Input handling — maps key/mouse events to state mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use tracing::debug;

use super::state::AppState;

/// Rows moved per wheel notch.
const WHEEL_STEP: i32 = 3;

/// User actions on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Replay,
    Quit,
}

impl Action {
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(Action::Quit),
                KeyCode::Char('d') => Some(Action::PageDown),
                KeyCode::Char('u') => Some(Action::PageUp),
                _ => None,
            };
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
            KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
            KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
            KeyCode::Char('r') => Some(Action::Replay),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Status-bar hint describing the bindings above.
pub const HINT: &str = "↑↓/jk: scroll | PgUp/PgDn: page | g/G: top/end | r: replay | q: quit";

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if let Some(action) = Action::from_key(key) {
        apply(state, action);
    }
}

pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => state.scroll.scroll_by(-WHEEL_STEP),
        MouseEventKind::ScrollDown => state.scroll.scroll_by(WHEEL_STEP),
        _ => {}
    }
}

pub fn apply(state: &mut AppState, action: Action) {
    let page = (state.viewport_height as i32 - 2).max(1);
    match action {
        Action::ScrollUp => state.scroll.scroll_by(-1),
        Action::ScrollDown => state.scroll.scroll_by(1),
        Action::PageUp => state.scroll.scroll_by(-page),
        Action::PageDown => state.scroll.scroll_by(page),
        Action::Top => state.scroll.scroll_to(0),
        Action::Bottom => state.scroll.scroll_to_end(),
        Action::Replay => {
            state.page.replay();
            state.status_message = Some(format!("replay #{}", state.page.generation()));
        }
        Action::Quit => state.should_quit = true,
    }
    debug!(?action, target = state.scroll.target(), "action");
}
