//! # Alarm Clock Core Library
//!
//! This library provides the time-tracking logic behind the Alarm Clock
//! widget: a live clock, a single-shot alarm and a stopwatch. The CLI binary
//! is one UI shell over it; any shell that can run a periodic callback on a
//! single thread can drive the same components.
//!
//! ## Architecture
//!
//! - **Components**: small state machines that never spawn timers themselves.
//!   Each holds at most one [`TickerHandle`] obtained from a [`Scheduler`].
//! - **Scheduler**: the shell's periodic callback registry. [`ManualScheduler`]
//!   is a deterministic implementation the shell advances from its event loop.
//! - **Widget**: routes commands and ticker firings to the components and
//!   reports [`Event`]s back to the shell.
//!
//! ## Key Components
//!
//! - [`ClockComponent`]: formatted time and date, once per second
//! - [`AlarmComponent`]: arm / check / fire
//! - [`StopwatchComponent`]: start / stop / reset
//! - [`Config`]: Application configuration management

pub mod alarm;
pub mod clock;
pub mod config;
pub mod error;
pub mod events;
pub mod stopwatch;
pub mod ticker;
pub mod widget;

pub use alarm::{AlarmComponent, AlarmEvent, AlarmState, AlarmTarget};
pub use clock::{ClockComponent, ClockFormat, FixedClock, Meridiem, SystemClock, WallClock, WallClockSample};
pub use config::Config;
pub use error::{ConfigError, CoreError, InvalidTimeError, TimeField};
pub use events::{Command, Event, Notice, NoticeLevel};
pub use stopwatch::{format_elapsed, StopwatchComponent, StopwatchState};
pub use ticker::{Firing, ManualScheduler, Scheduler, TickTarget, TickerHandle};
pub use widget::Widget;
