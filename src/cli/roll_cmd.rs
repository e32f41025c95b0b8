//! `dinner roll`: the animated pick, right in the terminal

use std::io::{self, Write};
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::output::Output;
use crate::decider::{
    Decider, RollEngine, RollSettings, RollUpdate, TickNotifier, TriggerOutcome, DECIDING,
    NO_CANDIDATES,
};
use crate::storage::Project;

pub fn run(output: &Output, quiet: bool, quick: bool, seed: Option<u64>) -> Result<()> {
    let project = Project::open_current()?;
    let restaurants = project.restaurant_store().read_all()?;
    let filters = project.config().project.filters.active.clone();

    let settings = if quick {
        RollSettings::quick()
    } else {
        project.config().roll_settings()?
    };
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let (tx, rx) = mpsc::channel();
    let notifier: TickNotifier = Arc::new(move |id| tx.send(id).is_ok());
    let mut decider = Decider::new(restaurants, filters, RollEngine::new(rng, settings, notifier));

    let pool_size = decider.eligible_count();
    output.verbose_ctx(
        "roll",
        &format!(
            "{} eligible of {}, {} ticks every {}ms",
            pool_size,
            decider.restaurants().len(),
            settings.ticks,
            settings.interval.as_millis()
        ),
    );

    match decider.trigger() {
        TriggerOutcome::Started(id) => output.verbose_ctx("roll", &format!("Started {}", id)),
        TriggerOutcome::NoCandidates | TriggerOutcome::AlreadyRolling => {
            if output.is_json() {
                output.data(&serde_json::json!({
                    "result": null,
                    "message": NO_CANDIDATES,
                    "pool_size": 0,
                }));
            } else {
                println!("{}", NO_CANDIDATES);
            }
            return Ok(());
        }
    }

    // Frames are redrawn in place, so only animate on a real terminal
    let animate = output.is_interactive() && !quiet;
    let mut stdout = io::stdout();
    if animate {
        redraw(&mut stdout, DECIDING)?;
    }

    let chosen = loop {
        let id = rx.recv().context("Roll timer stopped unexpectedly")?;
        match decider.on_tick(id) {
            Some(RollUpdate::Shuffled(name)) => {
                if animate {
                    redraw(&mut stdout, &name)?;
                }
            }
            Some(RollUpdate::Committed(restaurant)) => break restaurant,
            None => {}
        }
    };

    if animate {
        redraw(&mut stdout, "")?;
    }

    if output.is_json() {
        output.data(&serde_json::json!({
            "result": {
                "id": chosen.id.to_string(),
                "name": chosen.name,
                "category": chosen.category,
            },
            "pool_size": pool_size,
        }));
    } else if quiet {
        println!("{}", chosen.name);
    } else {
        println!("Tonight: {} ({})", chosen.name, chosen.category);
    }

    Ok(())
}

/// Replaces the current terminal line with `text`
fn redraw(stdout: &mut io::Stdout, text: &str) -> io::Result<()> {
    queue!(
        stdout,
        cursor::MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(text)
    )?;
    stdout.flush()
}
