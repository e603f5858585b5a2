//! The three tabs wired to one scheduler.
//!
//! `Widget` holds no state of its own beyond the components and the
//! scheduler. User input arrives as [`Command`]s, ticker firings arrive as
//! [`TickTarget`]s, and both come back out as [`Event`]s for the shell to
//! render.
//!
//! ## Usage
//!
//! ```ignore
//! let mut widget = Widget::new(SystemClock, ClockFormat::default(), ManualScheduler::new());
//! render(widget.start());
//! // In the event loop, once per second:
//! render(widget.advance(Duration::from_secs(1)));
//! ```

use std::time::Duration;

use crate::alarm::{AlarmComponent, AlarmEvent};
use crate::clock::{ClockComponent, ClockFormat, WallClock};
use crate::config::Config;
use crate::error::ConfigError;
use crate::events::{Command, Event, Notice};
use crate::stopwatch::StopwatchComponent;
use crate::ticker::{ManualScheduler, Scheduler, TickTarget};

pub struct Widget<S, C> {
    clock: ClockComponent<C>,
    alarm: AlarmComponent,
    stopwatch: StopwatchComponent,
    scheduler: S,
}

impl<S: Scheduler, C: WallClock> Widget<S, C> {
    pub fn new(source: C, patterns: ClockFormat, scheduler: S) -> Self {
        Self {
            clock: ClockComponent::new(source, patterns),
            alarm: AlarmComponent::new(),
            stopwatch: StopwatchComponent::new(),
            scheduler,
        }
    }

    pub fn from_config(config: &Config, source: C, scheduler: S) -> Result<Self, ConfigError> {
        Ok(Self::new(source, config.clock_format()?, scheduler))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn clock(&self) -> &ClockComponent<C> {
        &self.clock
    }

    pub fn alarm(&self) -> &AlarmComponent {
        &self.alarm
    }

    pub fn stopwatch(&self) -> &StopwatchComponent {
        &self.stopwatch
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start the live clock and return the first frame of every tab.
    pub fn start(&mut self) -> Vec<Event> {
        self.clock.start(&mut self.scheduler);
        vec![self.clock_event(), self.stopwatch_event()]
    }

    pub fn handle(&mut self, command: Command) -> Vec<Event> {
        match command {
            Command::SetAlarm {
                hour,
                minute,
                meridiem,
            } => match self.alarm.arm(&hour, &minute, meridiem, &mut self.scheduler) {
                Ok(target) => vec![Event::AlarmArmed { target }],
                Err(err) => vec![Event::InvalidTime {
                    notice: Notice::invalid_time(),
                    reason: err.to_string(),
                }],
            },
            Command::StartStopwatch => {
                self.stopwatch.start(&mut self.scheduler);
                vec![self.stopwatch_event()]
            }
            Command::StopStopwatch => {
                self.stopwatch.stop(&mut self.scheduler);
                vec![self.stopwatch_event()]
            }
            Command::ResetStopwatch => {
                self.stopwatch.reset();
                vec![self.stopwatch_event()]
            }
        }
    }

    /// Route one ticker firing to its component.
    pub fn dispatch(&mut self, target: TickTarget) -> Vec<Event> {
        match target {
            TickTarget::Clock => vec![self.clock_event()],
            TickTarget::Alarm => {
                let sample = self.clock.sample_now();
                match self.alarm.tick(&sample, &mut self.scheduler) {
                    AlarmEvent::Fired(target) => vec![Event::AlarmFired {
                        target,
                        notice: Notice::alarm_fired(),
                        at: sample.naive(),
                    }],
                    AlarmEvent::NoOp => Vec::new(),
                }
            }
            TickTarget::Stopwatch => {
                self.stopwatch.tick();
                vec![self.stopwatch_event()]
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn clock_event(&self) -> Event {
        let (time, date) = self.clock.tick();
        Event::ClockUpdated { time, date }
    }

    fn stopwatch_event(&self) -> Event {
        Event::StopwatchUpdated {
            display: self.stopwatch.display(),
            elapsed_secs: self.stopwatch.elapsed_seconds(),
            running: self.stopwatch.is_running(),
        }
    }
}

impl<C: WallClock> Widget<ManualScheduler, C> {
    /// Let `by` pass and dispatch every firing that came due, in order.
    pub fn advance(&mut self, by: Duration) -> Vec<Event> {
        self.scheduler.advance(by);
        let mut events = Vec::new();
        while let Some(firing) = self.scheduler.pop_due() {
            events.extend(self.dispatch(firing.target));
        }
        events
    }
}
