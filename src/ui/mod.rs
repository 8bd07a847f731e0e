//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes reveal presentations from the *core* and turns them into
//! cells on the terminal.  No timing decisions are made here.

pub mod cards;
pub mod icons;
pub mod layout;
pub mod page;
pub mod smooth_scroll;
pub mod theme;
