//! Terminal rendering of widget events.

use std::io::Write;

use alarmclock_core::{Config, Event, Notice, NoticeLevel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One JSON object per event.
    Json,
    /// One plain line per event.
    Lines,
    /// A single status line rewritten in place; notices on their own lines.
    Live,
}

pub struct Renderer<W> {
    out: W,
    mode: RenderMode,
    notifications: bool,
    bell: bool,
    clock: String,
    stopwatch: String,
    alarm: String,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: RenderMode, config: &Config) -> Self {
        Self {
            out,
            mode,
            notifications: config.notifications.enabled,
            bell: config.notifications.bell,
            clock: String::new(),
            stopwatch: "00:00:00".into(),
            alarm: "off".into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn render_all(&mut self, events: &[Event]) -> std::io::Result<()> {
        for event in events {
            self.render(event)?;
        }
        if self.mode == RenderMode::Live && !events.is_empty() {
            self.status_line()?;
        }
        self.out.flush()
    }

    fn render(&mut self, event: &Event) -> std::io::Result<()> {
        if self.mode == RenderMode::Json {
            let json = serde_json::to_string(event).map_err(std::io::Error::other)?;
            return writeln!(self.out, "{json}");
        }

        match event {
            Event::ClockUpdated { time, date } => {
                self.clock = format!("{time}  {date}");
                if self.mode == RenderMode::Lines {
                    writeln!(self.out, "{}", self.clock)?;
                }
            }
            Event::StopwatchUpdated { display, running, .. } => {
                self.stopwatch = if *running {
                    display.clone()
                } else {
                    format!("{display} (stopped)")
                };
                if self.mode == RenderMode::Lines {
                    writeln!(self.out, "{display}")?;
                }
            }
            Event::AlarmArmed { target } => {
                self.alarm = target.to_string();
                self.line(&format!("Alarm set for {target}"))?;
            }
            Event::InvalidTime { notice, reason } => {
                self.notice(notice, Some(reason))?;
            }
            Event::AlarmFired { target, notice, .. } => {
                self.alarm = format!("{target} (fired)");
                if self.notifications {
                    self.notice(notice, None)?;
                } else {
                    tracing::info!(%target, "alarm fired with notifications disabled");
                }
            }
        }
        Ok(())
    }

    fn notice(&mut self, notice: &Notice, detail: Option<&str>) -> std::io::Result<()> {
        let mut text = format!("{}: {}", notice.title, notice.message);
        if let Some(detail) = detail {
            text.push_str(&format!(" ({detail})"));
        }
        if notice.level == NoticeLevel::Alert && self.bell {
            text.push('\u{7}');
        }
        self.line(&text)
    }

    /// Print a line of its own, clearing the live status line first.
    fn line(&mut self, text: &str) -> std::io::Result<()> {
        if self.mode == RenderMode::Live {
            write!(self.out, "\r\x1b[2K")?;
        }
        writeln!(self.out, "{text}")
    }

    fn status_line(&mut self) -> std::io::Result<()> {
        write!(
            self.out,
            "\r\x1b[2K{}  |  stopwatch {}  |  alarm {}",
            self.clock, self.stopwatch, self.alarm
        )
    }
}
