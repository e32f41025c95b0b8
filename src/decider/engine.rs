//! Random selection engine
//!
//! Runs one animated roll at a time over a snapshot of the eligible pool:
//!
//! ```text
//! Idle ──start(pool)──▶ Rolling ──last tick──▶ Idle (committed result)
//!   │
//!   └──start([])──▶ Idle (no-candidates message)
//! ```
//!
//! While rolling, a [`Ticker`] posts [`RollId`]s to the host through a
//! [`TickNotifier`]. The host hands each one back to [`RollEngine::on_tick`]
//! on its own thread. Every tick shows a uniformly drawn name; the last tick
//! cancels the ticker and commits an independent final draw.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use super::ticker::Ticker;
use crate::domain::Restaurant;

/// Placeholder shown while the roll is starting
pub const DECIDING: &str = "Deciding...";

/// Shown instead of a result when nothing is eligible
pub const NO_CANDIDATES: &str = "No restaurants to choose from. Add one or turn on more categories!";

/// Animation tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSettings {
    /// Number of animated ticks before committing
    pub ticks: u32,
    /// Time between ticks
    pub interval: Duration,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            ticks: 16,
            interval: Duration::from_millis(80),
        }
    }
}

impl RollSettings {
    /// Shorter, snappier animation
    pub fn quick() -> Self {
        Self {
            ticks: 11,
            interval: Duration::from_millis(40),
        }
    }

    /// Total animation time
    pub fn duration(&self) -> Duration {
        self.interval * self.ticks
    }
}

/// Identifies one roll, so ticks from a finished roll can be told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RollId(u64);

impl fmt::Display for RollId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "roll-{}", self.0)
    }
}

/// Delivers a tick to the host's event queue. Returns false if the host is gone.
pub type TickNotifier = Arc<dyn Fn(RollId) -> bool + Send + Sync>;

/// Result of asking for a roll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A roll is now animating
    Started(RollId),
    /// The pool was empty; the fixed message is displayed
    NoCandidates,
    /// A roll was already in progress; nothing changed
    AlreadyRolling,
}

/// What a processed tick changed
#[derive(Debug, Clone, PartialEq)]
pub enum RollUpdate {
    /// An intermediate name is on display
    Shuffled(String),
    /// The roll finished with this restaurant
    Committed(Restaurant),
}

struct InFlight {
    id: RollId,
    pool: Vec<Restaurant>,
    ticks_done: u32,
    ticker: Ticker,
}

/// The roll state machine
pub struct RollEngine<R> {
    rng: R,
    settings: RollSettings,
    notifier: TickNotifier,
    next_id: u64,
    displayed: Option<String>,
    committed: Option<Restaurant>,
    inflight: Option<InFlight>,
}

impl<R: Rng> RollEngine<R> {
    pub fn new(rng: R, settings: RollSettings, notifier: TickNotifier) -> Self {
        Self {
            rng,
            settings,
            notifier,
            next_id: 0,
            displayed: None,
            committed: None,
            inflight: None,
        }
    }

    pub fn settings(&self) -> RollSettings {
        self.settings
    }

    pub fn is_rolling(&self) -> bool {
        self.inflight.is_some()
    }

    /// Text currently on display, if any
    pub fn displayed(&self) -> Option<&str> {
        self.displayed.as_deref()
    }

    /// The restaurant chosen by the last completed roll, until cleared
    pub fn committed(&self) -> Option<&Restaurant> {
        self.committed.as_ref()
    }

    /// Id of the roll in progress
    pub fn current_roll(&self) -> Option<RollId> {
        self.inflight.as_ref().map(|f| f.id)
    }

    /// Starts a roll over `pool`. The pool is owned by the roll from here on.
    pub fn start(&mut self, pool: Vec<Restaurant>) -> TriggerOutcome {
        if self.is_rolling() {
            return TriggerOutcome::AlreadyRolling;
        }

        self.committed = None;

        if pool.is_empty() {
            self.displayed = Some(NO_CANDIDATES.to_string());
            return TriggerOutcome::NoCandidates;
        }

        let id = RollId(self.next_id);
        self.next_id += 1;

        let notify = Arc::clone(&self.notifier);
        let ticker = Ticker::start(self.settings.interval, move || notify(id));

        self.displayed = Some(DECIDING.to_string());
        self.inflight = Some(InFlight {
            id,
            pool,
            ticks_done: 0,
            ticker,
        });

        TriggerOutcome::Started(id)
    }

    /// Processes one tick. Ticks for any roll other than the current one are
    /// ignored and return `None`.
    pub fn on_tick(&mut self, id: RollId) -> Option<RollUpdate> {
        let inflight = self.inflight.as_mut().filter(|f| f.id == id)?;

        let index = self.rng.gen_range(0..inflight.pool.len());
        let name = inflight.pool[index].name.clone();
        inflight.ticks_done += 1;
        self.displayed = Some(name.clone());

        if inflight.ticks_done < self.settings.ticks {
            return Some(RollUpdate::Shuffled(name));
        }

        let mut finished = self.inflight.take()?;
        finished.ticker.cancel();

        // Independent of the last animated draw
        let final_index = self.rng.gen_range(0..finished.pool.len());
        let chosen = finished.pool.swap_remove(final_index);

        self.displayed = Some(chosen.name.clone());
        self.committed = Some(chosen.clone());
        Some(RollUpdate::Committed(chosen))
    }

    /// Aborts a roll in progress. Returns true if there was one.
    ///
    /// The ticker is stopped before this returns and the display is cleared.
    pub fn cancel(&mut self) -> bool {
        match self.inflight.take() {
            Some(mut inflight) => {
                inflight.ticker.cancel();
                self.displayed = None;
                true
            }
            None => false,
        }
    }

    /// Clears a finished result. Does nothing while rolling.
    pub fn clear_result(&mut self) {
        if !self.is_rolling() {
            self.displayed = None;
            self.committed = None;
        }
    }
}
