//! Pause gate shared by a family of loggers
//!
//! While paused, log calls are queued instead of processed. Resuming replays
//! them on the caller's thread in the order they were made; calls arriving
//! from other threads during replay queue behind them.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// A deferred log call
pub type QueuedCall = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct PauseState {
    paused: bool,
    /// A `resume` is replaying the queue
    draining: bool,
    queue: VecDeque<QueuedCall>,
}

/// Pause flag plus the queue of calls made while it was set.
///
/// Loggers built with default options share [`PauseController::global`], so
/// pausing one pauses all of them. Inject a dedicated controller through
/// `LoggerOptions::pause` to isolate a family of loggers (tests mostly).
pub struct PauseController {
    state: Mutex<PauseState>,
}

static GLOBAL: OnceLock<Arc<PauseController>> = OnceLock::new();

impl PauseController {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PauseState::default()),
        }
    }

    /// Process-wide controller used by default
    pub fn global() -> Arc<PauseController> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(PauseController::new())))
    }

    pub fn pause(&self) {
        self.state.lock().paused = true;
    }

    /// Clear the flag and replay queued calls in FIFO order.
    ///
    /// New calls keep queueing until the queue is empty, so nothing overtakes a
    /// call made earlier. A replayed call that pauses again stops the replay and
    /// the rest stays queued. A nested or concurrent `resume` only clears the
    /// flag and leaves the replay to the caller already draining.
    ///
    /// Returns the number of calls replayed by this invocation.
    pub fn resume(&self) -> usize {
        {
            let mut state = self.state.lock();
            state.paused = false;
            if state.draining {
                return 0;
            }
            state.draining = true;
        }

        let mut count = 0;
        loop {
            let next = {
                let mut state = self.state.lock();
                let next = if state.paused {
                    None
                } else {
                    state.queue.pop_front()
                };
                if next.is_none() {
                    state.draining = false;
                }
                next
            };

            match next {
                Some(call) => {
                    call();
                    count += 1;
                }
                None => break,
            }
        }
        count
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    /// Number of calls waiting for `resume`
    pub fn queued(&self) -> usize {
        self.state.lock().queue.len()
    }

    /// Queue the call built by `make` if paused.
    ///
    /// `make` only runs when the call is actually deferred. Returns whether it was.
    pub fn defer_if_paused<F>(&self, make: F) -> bool
    where
        F: FnOnce() -> QueuedCall,
    {
        let mut state = self.state.lock();
        if !state.paused && !state.draining {
            return false;
        }
        state.queue.push_back(make());
        true
    }
}

impl Default for PauseController {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PauseController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("PauseController")
            .field("paused", &state.paused)
            .field("draining", &state.draining)
            .field("queued", &state.queue.len())
            .finish()
    }
}
