//! Stopwatch counting whole seconds.
//!
//! The count only moves when the held ticker fires. `reset` zeroes the count
//! but leaves a running stopwatch running.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ticker::{Scheduler, TickTarget, TickerHandle};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopwatchState {
    pub elapsed_seconds: u64,
    pub running: bool,
}

#[derive(Debug, Default)]
pub struct StopwatchComponent {
    elapsed_seconds: u64,
    ticker: Option<TickerHandle>,
}

impl StopwatchComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn state(&self) -> StopwatchState {
        StopwatchState {
            elapsed_seconds: self.elapsed_seconds,
            running: self.is_running(),
        }
    }

    /// Current display, `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Start ticking. Already running: no second ticker is created.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.ticker.is_some() {
            return;
        }
        self.ticker = Some(scheduler.schedule(Duration::from_secs(1), TickTarget::Stopwatch));
        tracing::debug!(elapsed = self.elapsed_seconds, "stopwatch started");
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.ticker.take() {
            scheduler.cancel(handle);
            tracing::debug!(elapsed = self.elapsed_seconds, "stopwatch stopped");
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_seconds = 0;
        tracing::debug!(running = self.is_running(), "stopwatch reset");
    }

    /// One second passed. Ignored while stopped.
    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        }
    }
}

/// `HH:MM:SS` with unbounded hours (no wrap at 24).
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}
