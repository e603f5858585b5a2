//! Single-shot alarm.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --arm--> Armed --tick(match)--> Fired
//!               Armed --arm--> Armed (target replaced)
//!               Fired --arm--> Armed
//! ```
//!
//! The match is on `hour:minute` plus meridiem, so an armed alarm fires on
//! the first check that lands anywhere inside its target minute. Firing
//! cancels the check ticker; the alarm then stays `Fired` until re-armed.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock::{Meridiem, WallClockSample};
use crate::error::{InvalidTimeError, TimeField};
use crate::ticker::{Scheduler, TickTarget, TickerHandle};

/// Target time-of-day on the 12-hour clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTarget")]
pub struct AlarmTarget {
    hour: u8,
    minute: u8,
    meridiem: Meridiem,
}

impl AlarmTarget {
    /// Build a target from already-numeric fields.
    pub fn new(hour: i64, minute: i64, meridiem: Meridiem) -> Result<Self, InvalidTimeError> {
        let hour = in_range(TimeField::Hour, hour, 1, 12)?;
        let minute = in_range(TimeField::Minute, minute, 0, 59)?;
        Ok(Self {
            hour,
            minute,
            meridiem,
        })
    }

    /// Build a target from the free-text fields of the alarm form.
    pub fn parse(hour: &str, minute: &str, meridiem: Meridiem) -> Result<Self, InvalidTimeError> {
        let hour = parse_field(TimeField::Hour, hour)?;
        let minute = parse_field(TimeField::Minute, minute)?;
        Self::new(hour, minute, meridiem)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn meridiem(&self) -> Meridiem {
        self.meridiem
    }

    /// Seconds are ignored.
    pub fn matches(&self, sample: &WallClockSample) -> bool {
        u32::from(self.hour) == sample.hour()
            && u32::from(self.minute) == sample.minute()
            && self.meridiem == sample.meridiem()
    }
}

/// Wire shape of [`AlarmTarget`] before the range check.
#[derive(Deserialize)]
struct RawTarget {
    hour: i64,
    minute: i64,
    meridiem: Meridiem,
}

impl TryFrom<RawTarget> for AlarmTarget {
    type Error = InvalidTimeError;

    fn try_from(raw: RawTarget) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute, raw.meridiem)
    }
}

impl fmt::Display for AlarmTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

fn parse_field(field: TimeField, input: &str) -> Result<i64, InvalidTimeError> {
    input
        .parse::<i64>()
        .map_err(|_| InvalidTimeError::NotANumber {
            field,
            input: input.to_string(),
        })
}

fn in_range(field: TimeField, value: i64, min: u8, max: u8) -> Result<u8, InvalidTimeError> {
    if value < i64::from(min) || value > i64::from(max) {
        return Err(InvalidTimeError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(value as u8)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "target", rename_all = "lowercase")]
pub enum AlarmState {
    #[default]
    Idle,
    Armed(AlarmTarget),
    Fired(AlarmTarget),
}

/// Result of one alarm check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmEvent {
    Fired(AlarmTarget),
    NoOp,
}

/// Alarm tab: at most one armed target and one check ticker.
#[derive(Debug, Default)]
pub struct AlarmComponent {
    state: AlarmState,
    ticker: Option<TickerHandle>,
}

impl AlarmComponent {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> AlarmState {
        self.state
    }

    pub fn target(&self) -> Option<AlarmTarget> {
        match self.state {
            AlarmState::Idle => None,
            AlarmState::Armed(t) | AlarmState::Fired(t) => Some(t),
        }
    }

    pub fn is_checking(&self) -> bool {
        self.ticker.is_some()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Arm from the alarm form. On error nothing changes, including any
    /// alarm that is already armed.
    pub fn arm<S: Scheduler + ?Sized>(
        &mut self,
        hour: &str,
        minute: &str,
        meridiem: Meridiem,
        scheduler: &mut S,
    ) -> Result<AlarmTarget, InvalidTimeError> {
        let target = AlarmTarget::parse(hour, minute, meridiem).inspect_err(|err| {
            tracing::info!(%err, "alarm form rejected");
        })?;
        self.arm_target(target, scheduler);
        Ok(target)
    }

    /// Arm with a validated target, replacing whatever was armed before.
    pub fn arm_target<S: Scheduler + ?Sized>(&mut self, target: AlarmTarget, scheduler: &mut S) {
        if let Some(old) = self.ticker.take() {
            scheduler.cancel(old);
        }
        if let AlarmState::Armed(previous) = self.state {
            tracing::info!(%previous, %target, "alarm replaced");
        } else {
            tracing::info!(%target, "alarm armed");
        }
        self.state = AlarmState::Armed(target);
        self.ticker = Some(scheduler.schedule(Duration::from_secs(1), TickTarget::Alarm));
    }

    /// Check the armed target against a clock sample.
    pub fn tick<S: Scheduler + ?Sized>(
        &mut self,
        sample: &WallClockSample,
        scheduler: &mut S,
    ) -> AlarmEvent {
        let AlarmState::Armed(target) = self.state else {
            return AlarmEvent::NoOp;
        };
        if !target.matches(sample) {
            return AlarmEvent::NoOp;
        }
        if let Some(handle) = self.ticker.take() {
            scheduler.cancel(handle);
        }
        self.state = AlarmState::Fired(target);
        tracing::info!(%target, "alarm fired");
        AlarmEvent::Fired(target)
    }
}
