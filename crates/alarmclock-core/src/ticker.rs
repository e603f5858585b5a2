//! Periodic scheduling primitive.
//!
//! Components never own a timer thread. They ask a [`Scheduler`] for a
//! recurring ticker and keep the returned [`TickerHandle`]; the shell's event
//! loop asks the scheduler which tickers are due and routes each firing back
//! to the component named by its [`TickTarget`].
//!
//! ```ignore
//! let mut scheduler = ManualScheduler::new();
//! let handle = scheduler.schedule(Duration::from_secs(1), TickTarget::Stopwatch);
//! scheduler.advance(Duration::from_secs(1));
//! while let Some(firing) = scheduler.pop_due() {
//!     // dispatch firing.target
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which component a ticker belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickTarget {
    Clock,
    Alarm,
    Stopwatch,
}

/// Opaque handle for a live ticker. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickerHandle(u64);

impl fmt::Display for TickerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticker#{}", self.0)
    }
}

/// A ticker that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Firing {
    pub handle: TickerHandle,
    pub target: TickTarget,
}

/// Recurring callback registry supplied by the UI shell.
pub trait Scheduler {
    /// Register a ticker that fires every `interval` until cancelled.
    fn schedule(&mut self, interval: Duration, target: TickTarget) -> TickerHandle;

    /// Stop a ticker. Cancelling an unknown or already cancelled handle is a no-op.
    fn cancel(&mut self, handle: TickerHandle);

    fn is_active(&self, handle: TickerHandle) -> bool;
}

#[derive(Debug, Clone)]
struct Entry {
    target: TickTarget,
    interval: Duration,
    next_due: Duration,
}

/// Deterministic single-threaded scheduler.
///
/// Time only moves when [`advance`](ManualScheduler::advance) is called, so
/// the same type drives both the CLI event loop (advanced by a real interval)
/// and tests (advanced by hand).
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    tickers: BTreeMap<TickerHandle, Entry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed since the scheduler was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of live tickers.
    pub fn active_count(&self) -> usize {
        self.tickers.len()
    }

    pub fn active_for(&self, target: TickTarget) -> usize {
        self.tickers.values().filter(|e| e.target == target).count()
    }

    /// Move the scheduler clock forward. Firings become available via
    /// [`pop_due`](ManualScheduler::pop_due).
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Take the earliest due firing, rescheduling its ticker.
    ///
    /// Ties break by handle, i.e. by scheduling order. A ticker cancelled
    /// while an earlier firing is being handled never comes due again.
    pub fn pop_due(&mut self) -> Option<Firing> {
        let (&handle, _) = self
            .tickers
            .iter()
            .filter(|(_, e)| e.next_due <= self.now)
            .min_by_key(|(h, e)| (e.next_due, **h))?;
        let entry = self.tickers.get_mut(&handle)?;
        entry.next_due = entry.next_due.saturating_add(entry.interval);
        Some(Firing {
            handle,
            target: entry.target,
        })
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, interval: Duration, target: TickTarget) -> TickerHandle {
        // A zero interval would make pop_due spin forever.
        let interval = interval.max(Duration::from_millis(1));
        self.next_id += 1;
        let handle = TickerHandle(self.next_id);
        self.tickers.insert(
            handle,
            Entry {
                target,
                interval,
                next_due: self.now.saturating_add(interval),
            },
        );
        tracing::debug!(%handle, ?target, ?interval, "ticker scheduled");
        handle
    }

    fn cancel(&mut self, handle: TickerHandle) {
        if self.tickers.remove(&handle).is_some() {
            tracing::debug!(%handle, "ticker cancelled");
        }
    }

    fn is_active(&self, handle: TickerHandle) -> bool {
        self.tickers.contains_key(&handle)
    }
}
