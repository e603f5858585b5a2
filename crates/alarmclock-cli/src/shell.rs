//! Terminal UI shell.
//!
//! Owns the single-threaded event loop: a one-second interval advances the
//! widget's scheduler and stdin lines become widget commands. Both arms of
//! the `select!` run on the same thread, so every widget call is serialized.

use std::io::Write;
use std::time::Duration;

use alarmclock_core::{Command, Event, ManualScheduler, Meridiem, WallClock, Widget};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use crate::render::Renderer;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(Command),
    Quit,
    Empty,
    Unknown(String),
}

pub const HELP: &str =
    "commands: alarm <HH> <MM> [AM|PM], start, stop, reset, quit";

/// Parse a line typed into the shell.
///
/// `alarm 7 30 pm` and `alarm 7:30 pm` are equivalent. Hour and minute are
/// passed through as text; the alarm decides whether they are valid.
pub fn parse_input(line: &str, default_meridiem: Meridiem) -> Input {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, rest)) = words.split_first() else {
        return Input::Empty;
    };

    match head.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Input::Quit,
        "start" => Input::Command(Command::StartStopwatch),
        "stop" => Input::Command(Command::StopStopwatch),
        "reset" => Input::Command(Command::ResetStopwatch),
        "alarm" => parse_alarm(rest, default_meridiem),
        other => Input::Unknown(format!("unknown command '{other}'")),
    }
}

fn parse_alarm(args: &[&str], default_meridiem: Meridiem) -> Input {
    let (hour, minute, rest) = match args {
        [time, rest @ ..] if time.contains(':') => {
            let (hour, minute) = time.split_once(':').unwrap_or((*time, ""));
            (hour, minute, rest)
        }
        [hour, minute, rest @ ..] => (*hour, *minute, rest),
        _ => return Input::Unknown("usage: alarm <HH> <MM> [AM|PM]".into()),
    };

    let meridiem = match rest {
        [] => default_meridiem,
        [m] => match m.parse::<Meridiem>() {
            Ok(m) => m,
            Err(e) => return Input::Unknown(e),
        },
        _ => return Input::Unknown("usage: alarm <HH> <MM> [AM|PM]".into()),
    };

    Input::Command(Command::SetAlarm {
        hour: hour.to_string(),
        minute: minute.to_string(),
        meridiem,
    })
}

/// Options for one run of the event loop.
pub struct LoopOptions<F> {
    /// Read commands from stdin. EOF ends the loop.
    pub read_input: bool,
    pub default_meridiem: Meridiem,
    /// Stop after rendering the first event this returns true for.
    pub until: F,
}

/// Run the event loop on a current-thread runtime until quit, EOF, or
/// `options.until` matches.
pub fn run<C, W, F>(
    widget: &mut Widget<ManualScheduler, C>,
    renderer: &mut Renderer<W>,
    options: LoopOptions<F>,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: WallClock,
    W: Write,
    F: Fn(&Event) -> bool,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(event_loop(widget, renderer, options));
    // A pending stdin read would otherwise keep the runtime alive.
    runtime.shutdown_background();
    result
}

async fn event_loop<C, W, F>(
    widget: &mut Widget<ManualScheduler, C>,
    renderer: &mut Renderer<W>,
    options: LoopOptions<F>,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: WallClock,
    W: Write,
    F: Fn(&Event) -> bool,
{
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately. Elapsed time is measured between
    // tick deadlines so the scheduler advances in whole seconds.
    let mut last = interval.tick().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            now = interval.tick() => {
                let elapsed = now.saturating_duration_since(last);
                last = now;
                let events = widget.advance(elapsed);
                if emit(renderer, &events, &options.until)? {
                    return Ok(());
                }
            }
            line = lines.next_line(), if options.read_input => {
                let Some(line) = line? else {
                    tracing::debug!("stdin closed");
                    return Ok(());
                };
                match parse_input(&line, options.default_meridiem) {
                    Input::Quit => return Ok(()),
                    Input::Empty => {}
                    Input::Unknown(message) => {
                        eprintln!("{message}");
                        eprintln!("{HELP}");
                    }
                    Input::Command(command) => {
                        tracing::debug!(?command, "command");
                        let events = widget.handle(command);
                        if emit(renderer, &events, &options.until)? {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

fn emit<W: Write, F: Fn(&Event) -> bool>(
    renderer: &mut Renderer<W>,
    events: &[Event],
    until: &F,
) -> std::io::Result<bool> {
    renderer.render_all(events)?;
    Ok(events.iter().any(until))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderMode;
    use alarmclock_core::{ClockFormat, Config, FixedClock};
    use chrono::NaiveDate;
    use std::cell::Cell;

    fn alarm(hour: &str, minute: &str, meridiem: Meridiem) -> Input {
        Input::Command(Command::SetAlarm {
            hour: hour.into(),
            minute: minute.into(),
            meridiem,
        })
    }

    #[test]
    fn parses_stopwatch_buttons() {
        assert_eq!(
            parse_input("start", Meridiem::AM),
            Input::Command(Command::StartStopwatch)
        );
        assert_eq!(
            parse_input("  STOP ", Meridiem::AM),
            Input::Command(Command::StopStopwatch)
        );
        assert_eq!(
            parse_input("reset", Meridiem::AM),
            Input::Command(Command::ResetStopwatch)
        );
        assert_eq!(parse_input("q", Meridiem::AM), Input::Quit);
        assert_eq!(parse_input("   ", Meridiem::AM), Input::Empty);
    }

    #[test]
    fn parses_alarm_forms() {
        assert_eq!(parse_input("alarm 7 30 pm", Meridiem::AM), alarm("7", "30", Meridiem::PM));
        assert_eq!(parse_input("alarm 7:30 PM", Meridiem::AM), alarm("7", "30", Meridiem::PM));
        assert_eq!(parse_input("alarm 07 05", Meridiem::PM), alarm("07", "05", Meridiem::PM));
        // free text is left for the alarm to reject
        assert_eq!(parse_input("alarm x y", Meridiem::AM), alarm("x", "y", Meridiem::AM));
    }

    #[test]
    fn rejects_malformed_alarm_lines() {
        assert!(matches!(parse_input("alarm", Meridiem::AM), Input::Unknown(_)));
        assert!(matches!(parse_input("alarm 7", Meridiem::AM), Input::Unknown(_)));
        assert!(matches!(parse_input("alarm 7 30 noon", Meridiem::AM), Input::Unknown(_)));
        assert!(matches!(parse_input("snooze", Meridiem::AM), Input::Unknown(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn clock_frames_follow_the_interval() {
        let clock = FixedClock::new(
            NaiveDate::from_ymd_opt(2025, 1, 7)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        let mut widget = Widget::new(clock, ClockFormat::default(), ManualScheduler::new());
        widget.start();
        let mut renderer = Renderer::new(Vec::new(), RenderMode::Lines, &Config::default());

        let frames = Cell::new(0);
        let started = tokio::time::Instant::now();
        event_loop(
            &mut widget,
            &mut renderer,
            LoopOptions {
                read_input: false,
                default_meridiem: Meridiem::AM,
                until: |event: &Event| {
                    if matches!(event, Event::ClockUpdated { .. }) {
                        frames.set(frames.get() + 1);
                    }
                    frames.get() == 3
                },
            },
        )
        .await
        .unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(3));
        assert_eq!(widget.scheduler().now(), Duration::from_secs(3));
        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert_eq!(out.lines().count(), 3);
    }
}
