//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a blocking reader that
//! forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// Frame tick; drives the header slide.
    Tick,
}

/// Spawns a reader that polls the terminal and sends events through the
/// returned channel, with a `Tick` whenever `tick_rate` passes quietly.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let app_event = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(CtEvent::Key(k)) if k.kind != KeyEventKind::Release => AppEvent::Key(k),
                Ok(CtEvent::Mouse(m)) => AppEvent::Mouse(m),
                Ok(CtEvent::Resize(w, h)) => AppEvent::Resize(w, h),
                Ok(_) => continue,
                Err(err) => {
                    tracing::warn!(%err, "terminal read failed");
                    continue;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!(%err, "terminal poll failed");
                break;
            }
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
