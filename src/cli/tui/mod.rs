//! Interactive TUI for the dinner decider
//!
//! Shows the restaurant list, the category filters, and the roll result,
//! and animates rolls in place using ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};

use anyhow::{anyhow, Result};

use super::Output;
use app::App;
use event::EventHandler;

/// Idle redraw interval in milliseconds
const IDLE_TICK_MS: u64 = 250;

/// Launch the TUI
pub fn run(output: &Output) -> Result<()> {
    output.verbose_ctx("tui", "Initializing TUI application");

    // Roll ticks share the input queue
    let event_handler = EventHandler::new(IDLE_TICK_MS);

    // Open the project before touching the terminal so errors print normally
    let mut app = App::new(event_handler.sender())?;
    output.verbose_ctx(
        "tui",
        &format!(
            "Loaded {} restaurants",
            app.decider().restaurants().len()
        ),
    );

    let mut terminal = ui::init_terminal()?;

    // Run the main loop with panic safety
    // This ensures terminal is restored even if the app panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    // Always restore terminal, even on panic
    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("TUI panicked: {}", s))
            } else {
                Err(anyhow!("TUI panicked with unknown error"))
            }
        }
    }
}
