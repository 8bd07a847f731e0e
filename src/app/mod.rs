//! Application orchestration — page composition, state, events, and input handling.

pub mod event;
pub mod handler;
pub mod page;
pub mod state;
