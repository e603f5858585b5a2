use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::alarm::AlarmTarget;
use crate::clock::Meridiem;

/// Every state change the shell needs to render produces an Event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    ClockUpdated {
        time: String,
        date: String,
    },
    AlarmArmed {
        target: AlarmTarget,
    },
    /// The alarm form was rejected; nothing changed.
    InvalidTime {
        notice: Notice,
        reason: String,
    },
    AlarmFired {
        target: AlarmTarget,
        notice: Notice,
        at: NaiveDateTime,
    },
    StopwatchUpdated {
        display: String,
        elapsed_secs: u64,
        running: bool,
    },
}

/// User input forwarded by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Raw alarm form: hour and minute are free text.
    SetAlarm {
        hour: String,
        minute: String,
        meridiem: Meridiem,
    },
    StartStopwatch,
    StopStopwatch,
    ResetStopwatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Modal warning the user dismisses.
    Warning,
    /// Transient popup that hides itself.
    Alert,
}

/// Dialog or popup the shell should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn invalid_time() -> Self {
        Self {
            title: "Invalid Time".into(),
            message: "Please enter a valid time.".into(),
            level: NoticeLevel::Warning,
        }
    }

    pub fn alarm_fired() -> Self {
        Self {
            title: "Alarm".into(),
            message: "Time's up!".into(),
            level: NoticeLevel::Alert,
        }
    }
}
