//! Cancellable repeating timer
//!
//! A [`Ticker`] calls a closure on a fixed interval from a background
//! thread. The closure normally just posts an event to the host's queue, so
//! all real work stays on the host thread.
//!
//! Cancellation is explicit ([`Ticker::cancel`]) or implicit on drop. Once
//! `cancel` returns, the closure will not be called again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to a running repeating timer
#[derive(Debug)]
pub struct Ticker {
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts calling `on_tick` every `interval`.
    ///
    /// The timer stops by itself when `on_tick` returns false (for example
    /// when the receiving end of a channel is gone).
    pub fn start<F>(interval: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> bool + Send + 'static,
    {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);

        let handle = thread::spawn(move || {
            let mut next = Instant::now() + interval;
            loop {
                let now = Instant::now();
                if now < next {
                    // May wake early (spurious or unpark from cancel)
                    thread::park_timeout(next - now);
                }

                if flag.load(Ordering::Acquire) {
                    break;
                }
                if Instant::now() < next {
                    continue;
                }

                if !on_tick() {
                    break;
                }
                next += interval;
            }
        });

        Self {
            cancelled,
            handle: Some(handle),
        }
    }

    /// Stops the timer and waits for the timer thread to exit.
    ///
    /// Safe to call more than once.
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            handle.thread().unpark();
            let _ = handle.join();
        }
    }

    /// Returns true once the timer has been cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
