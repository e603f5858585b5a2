//! Live clock.
//!
//! The clock keeps no state between ticks: every tick takes a fresh
//! [`WallClockSample`] from its [`WallClock`] source and renders it.

use std::cell::Cell;
use std::fmt::{self, Write as _};
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use chrono::{Datelike, Local, Month, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ticker::{Scheduler, TickTarget, TickerHandle};

pub const DEFAULT_TIME_FORMAT: &str = "%I:%M:%S %p";
pub const DEFAULT_DATE_FORMAT: &str = "%A, %b %d, %Y";

/// Half of the 12-hour clock. Serialized uppercase, read case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Meridiem {
    AM,
    PM,
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Meridiem::AM => f.write_str("AM"),
            Meridiem::PM => f.write_str("PM"),
        }
    }
}

impl FromStr for Meridiem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::AM),
            "PM" => Ok(Meridiem::PM),
            _ => Err(format!("expected AM or PM, got '{s}'")),
        }
    }
}

impl TryFrom<String> for Meridiem {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A read of the wall clock, split the way the widget displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClockSample {
    at: NaiveDateTime,
}

impl WallClockSample {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }

    /// Hour on the 12-hour clock, 1..=12.
    pub fn hour(&self) -> u32 {
        self.at.hour12().1
    }

    pub fn minute(&self) -> u32 {
        self.at.minute()
    }

    pub fn second(&self) -> u32 {
        self.at.second()
    }

    pub fn meridiem(&self) -> Meridiem {
        if self.at.hour12().0 {
            Meridiem::PM
        } else {
            Meridiem::AM
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.at.weekday()
    }

    pub fn month(&self) -> Month {
        // month() is always 1..=12
        Month::try_from(self.at.month() as u8).unwrap_or(Month::January)
    }

    pub fn day(&self) -> u32 {
        self.at.day()
    }

    pub fn year(&self) -> i32 {
        self.at.year()
    }

    pub fn naive(&self) -> NaiveDateTime {
        self.at
    }

    /// Render with the given patterns as `(time, date)`.
    pub fn format(&self, patterns: &ClockFormat) -> (String, String) {
        (
            render(self.at, &patterns.time, DEFAULT_TIME_FORMAT),
            render(self.at, &patterns.date, DEFAULT_DATE_FORMAT),
        )
    }
}

fn render(at: NaiveDateTime, pattern: &str, fallback: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", at.format(pattern)).is_err() {
        out.clear();
        let _ = write!(out, "{}", at.format(fallback));
    }
    out
}

/// strftime patterns for the time and date lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFormat {
    time: String,
    date: String,
}

impl ClockFormat {
    /// Validate both patterns up front; chrono only reports bad patterns
    /// while rendering.
    pub fn new(time: &str, date: &str) -> Result<Self, ConfigError> {
        validate_pattern("clock.time_format", time)?;
        validate_pattern("clock.date_format", date)?;
        Ok(Self {
            time: time.to_string(),
            date: date.to_string(),
        })
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

impl Default for ClockFormat {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME_FORMAT.to_string(),
            date: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

/// Render the pattern once against a date-only value. This rejects both
/// malformed specifiers and ones that need an offset (`%z`, `%Z`).
pub(crate) fn validate_pattern(key: &str, pattern: &str) -> Result<(), ConfigError> {
    let mut scratch = String::new();
    if write!(scratch, "{}", NaiveDateTime::default().format(pattern)).is_err() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("'{pattern}' is not a valid strftime pattern"),
        });
    }
    Ok(())
}

/// Source of wall-clock time.
pub trait WallClock {
    fn now(&self) -> NaiveDateTime;
}

/// Local time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct FixedClock {
    at: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self {
            at: Rc::new(Cell::new(at)),
        }
    }

    pub fn set(&self, at: NaiveDateTime) {
        self.at.set(at);
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.at.set(self.at.get() + by);
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at.get()
    }
}

/// Clock tab: samples the source once per second and renders it.
#[derive(Debug)]
pub struct ClockComponent<C> {
    source: C,
    patterns: ClockFormat,
    ticker: Option<TickerHandle>,
}

impl<C: WallClock> ClockComponent<C> {
    pub fn new(source: C, patterns: ClockFormat) -> Self {
        Self {
            source,
            patterns,
            ticker: None,
        }
    }

    pub fn sample_now(&self) -> WallClockSample {
        WallClockSample::new(self.source.now())
    }

    pub fn format(&self, sample: &WallClockSample) -> (String, String) {
        sample.format(&self.patterns)
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_some()
    }

    /// Begin ticking once per second, replacing any ticker already held.
    pub fn start<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(old) = self.ticker.take() {
            scheduler.cancel(old);
        }
        self.ticker = Some(scheduler.schedule(Duration::from_secs(1), TickTarget::Clock));
    }

    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(handle) = self.ticker.take() {
            scheduler.cancel(handle);
        }
    }

    /// One clock tick: the `(time, date)` pair to display.
    pub fn tick(&self) -> (String, String) {
        self.format(&self.sample_now())
    }
}
