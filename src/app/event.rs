//! Terminal event abstraction.
//!
//! Crossterm's blocking reader runs on a dedicated blocking task and forwards
//! input over a channel; frame ticks come from a separate interval in the main
//! loop, so animation cadence never depends on input arriving.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;
use tracing::warn;

/// High-level input events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a blocking task that reads terminal input and sends it through the
/// returned channel.  The task ends once the receiver is dropped.
pub fn spawn_input_reader(poll_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            // Poll with a timeout so a dropped receiver is noticed promptly.
            match event::poll(poll_interval) {
                Ok(true) => {}
                Ok(false) => continue,
                Err(e) => {
                    warn!("terminal poll failed: {e}");
                    break;
                }
            }
            let app_event = match event::read() {
                Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(e) => {
                    warn!("terminal read failed: {e}");
                    break;
                }
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
