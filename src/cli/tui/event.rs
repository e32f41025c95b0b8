//! Event handling for the TUI
//!
//! Keyboard input, idle ticks, and roll ticks all arrive on one channel, so
//! the app handles them strictly one at a time on the UI thread.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

use crate::decider::RollId;

/// Terminal events
#[derive(Debug)]
pub enum Event {
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize event
    Resize,
    /// Idle tick for periodic redraws
    Tick,
    /// A roll wants its next frame
    Roll(RollId),
}

/// Handles terminal events in a separate thread
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
    tx: mpsc::Sender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the given idle tick rate in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();
        let tx_clone = tx.clone();

        thread::spawn(move || {
            loop {
                // Poll for events with timeout
                if event::poll(tick_rate).unwrap_or(false) {
                    if let Ok(evt) = event::read() {
                        let forwarded = match evt {
                            // Only send key press events, not release
                            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                                tx_clone.send(Event::Key(key))
                            }
                            CrosstermEvent::Resize(_, _) => tx_clone.send(Event::Resize),
                            _ => Ok(()),
                        };
                        if forwarded.is_err() {
                            break;
                        }
                    }
                } else if tx_clone.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    /// A sender that posts onto this handler's queue
    pub fn sender(&self) -> mpsc::Sender<Event> {
        self.tx.clone()
    }

    /// Receive the next event (blocking)
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
