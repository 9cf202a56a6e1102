//! Clock capability: current time and cancellable deferred callbacks.
//!
//! [`SystemClock`] is the production implementation; it runs a single
//! scheduler thread per clock. [`ManualClock`] lets tests drive time explicitly
//! and fires due callbacks synchronously from [`ManualClock::advance`].

use chrono::{DateTime, Utc};
use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::cmp::Ordering as CmpOrdering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::thread;
use std::time::{Duration, Instant};

/// Callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a scheduled callback
#[derive(Debug, Clone)]
pub struct TimerHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Prevent the callback from running. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Port for obtaining the current time and scheduling deferred work.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;

    /// Run `callback` once after `delay`, unless cancelled first
    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;

    fn cancel(&self, handle: &TimerHandle) {
        handle.cancel();
    }
}

struct Scheduled {
    deadline: Instant,
    handle: TimerHandle,
    callback: TimerCallback,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.handle.id == other.handle.id
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    // Reversed so the BinaryHeap pops the earliest deadline first
    fn cmp(&self, other: &Self) -> CmpOrdering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.handle.id.cmp(&self.handle.id))
    }
}

fn run_callback(callback: TimerCallback, id: u64) {
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(callback));
    if let Err(panic_info) = result {
        let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[LOGGER CRITICAL] Timer #{} callback panicked: {}", id, panic_msg);
    }
}

/// Wall-clock time with a background scheduler thread.
///
/// The thread is started lazily on the first `schedule_after` call and exits
/// when the clock is dropped; timers still pending at that point never fire.
pub struct SystemClock {
    sender: OnceLock<Sender<Scheduled>>,
    next_id: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            sender: OnceLock::new(),
            next_id: AtomicU64::new(1),
        }
    }

    fn scheduler(&self) -> &Sender<Scheduled> {
        self.sender.get_or_init(|| {
            let (sender, receiver) = unbounded::<Scheduled>();
            let spawned = thread::Builder::new()
                .name("log-facade-timer".to_string())
                .spawn(move || {
                    let mut queue: BinaryHeap<Scheduled> = BinaryHeap::new();
                    loop {
                        let received = match queue.peek() {
                            Some(next) => {
                                let wait = next.deadline.saturating_duration_since(Instant::now());
                                receiver.recv_timeout(wait)
                            }
                            None => receiver.recv().map_err(|_| RecvTimeoutError::Disconnected),
                        };

                        match received {
                            Ok(scheduled) => queue.push(scheduled),
                            Err(RecvTimeoutError::Timeout) => {}
                            Err(RecvTimeoutError::Disconnected) => break,
                        }

                        let now = Instant::now();
                        while queue.peek().is_some_and(|next| next.deadline <= now) {
                            if let Some(due) = queue.pop() {
                                if !due.handle.is_cancelled() {
                                    run_callback(due.callback, due.handle.id);
                                }
                            }
                        }
                    }
                });
            if let Err(e) = spawned {
                eprintln!("[LOGGER ERROR] Failed to start timer thread: {}", e);
            }
            sender
        })
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SystemClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClock")
            .field("started", &self.sender.get().is_some())
            .finish()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let scheduled = Scheduled {
            deadline: Instant::now() + delay,
            handle: handle.clone(),
            callback,
        };
        if self.scheduler().send(scheduled).is_err() {
            eprintln!(
                "[LOGGER ERROR] Timer thread unavailable, deferred callback #{} dropped",
                handle.id
            );
        }
        handle
    }
}

struct ManualTimer {
    deadline: DateTime<Utc>,
    handle: TimerHandle,
    callback: TimerCallback,
}

struct ManualState {
    now: DateTime<Utc>,
    timers: Vec<ManualTimer>,
    next_id: u64,
}

/// Clock for tests.
///
/// Time only moves when told to. All clones share the same time and timer list.
///
/// # Example
///
/// ```
/// use rust_log_facade::{Clock, ManualClock};
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let clock = ManualClock::new();
/// let fired = Arc::new(AtomicBool::new(false));
/// let flag = Arc::clone(&fired);
/// clock.schedule_after(Duration::from_secs(1), Box::new(move || flag.store(true, Ordering::SeqCst)));
///
/// clock.advance(Duration::from_millis(999));
/// assert!(!fired.load(Ordering::SeqCst));
/// clock.advance(Duration::from_millis(1));
/// assert!(fired.load(Ordering::SeqCst));
/// ```
#[derive(Clone)]
pub struct ManualClock {
    state: Arc<Mutex<ManualState>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ManualState {
                now: start,
                timers: Vec::new(),
                next_id: 1,
            })),
        }
    }

    /// Move time forward, firing every timer that comes due, in deadline order.
    ///
    /// Callbacks run on the calling thread with the clock set to their deadline
    /// and may schedule further timers.
    pub fn advance(&self, by: Duration) {
        let target = {
            let state = self.state.lock();
            state.now + to_chrono(by)
        };

        loop {
            let due = {
                let mut state = self.state.lock();
                state.timers.retain(|t| !t.handle.is_cancelled());
                let next = state
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by(|(_, a), (_, b)| {
                        a.deadline
                            .cmp(&b.deadline)
                            .then_with(|| a.handle.id.cmp(&b.handle.id))
                    })
                    .map(|(index, _)| index);
                match next {
                    Some(index) => {
                        let timer = state.timers.remove(index);
                        if timer.deadline > state.now {
                            state.now = timer.deadline;
                        }
                        Some(timer)
                    }
                    None => {
                        state.now = target;
                        None
                    }
                }
            };

            match due {
                Some(timer) => run_callback(timer.callback, timer.handle.id),
                None => break,
            }
        }
    }

    /// Jump to a specific time without firing timers
    pub fn set(&self, now: DateTime<Utc>) {
        self.state.lock().now = now;
    }

    /// Number of armed, uncancelled timers
    pub fn pending_timers(&self) -> usize {
        self.state
            .lock()
            .timers
            .iter()
            .filter(|t| !t.handle.is_cancelled())
            .count()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ManualClock")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .finish()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.state.lock().now
    }

    fn schedule_after(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let mut state = self.state.lock();
        let handle = TimerHandle::new(state.next_id);
        state.next_id += 1;
        let deadline = state.now + to_chrono(delay);
        state.timers.push(ManualTimer {
            deadline,
            handle: handle.clone(),
            callback,
        });
        handle
    }
}

fn to_chrono(duration: Duration) -> chrono::Duration {
    chrono::Duration::from_std(duration).unwrap_or_else(|_| chrono::Duration::days(36_500))
}
