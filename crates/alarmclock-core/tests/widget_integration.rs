//! Integration tests driving the widget through its scheduler.

use std::time::Duration;

use alarmclock_core::{
    AlarmState, ClockFormat, Command, Config, Event, FixedClock, ManualScheduler, Meridiem,
    NoticeLevel, TickTarget, Widget,
};
use chrono::{NaiveDate, NaiveDateTime};

const SECOND: Duration = Duration::from_secs(1);

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 7)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Move the wall clock and the scheduler together, one second at a time.
fn run_for(
    widget: &mut Widget<ManualScheduler, FixedClock>,
    clock: &FixedClock,
    seconds: u32,
) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..seconds {
        clock.advance(chrono::Duration::seconds(1));
        events.extend(widget.advance(SECOND));
    }
    events
}

fn fired(events: &[Event]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, Event::AlarmFired { .. }))
        .count()
}

#[test]
fn test_alarm_scenario_morning() {
    let clock = FixedClock::new(at(7, 29, 50));
    let mut widget = Widget::new(clock.clone(), ClockFormat::default(), ManualScheduler::new());
    widget.start();

    let events = widget.handle(Command::SetAlarm {
        hour: "07".into(),
        minute: "30".into(),
        meridiem: Meridiem::AM,
    });
    assert!(matches!(&events[..], [Event::AlarmArmed { .. }]));

    let events = run_for(&mut widget, &clock, 9);
    assert_eq!(fired(&events), 0);

    // 07:29:59 -> 07:30:00 fires; the rest of the minute stays quiet
    let events = run_for(&mut widget, &clock, 70);
    assert_eq!(fired(&events), 1);
    assert!(matches!(widget.alarm().state(), AlarmState::Fired(_)));

    let notice = events.iter().find_map(|e| match e {
        Event::AlarmFired { notice, at, .. } => Some((notice.clone(), *at)),
        _ => None,
    });
    let (notice, fired_at) = notice.unwrap();
    assert_eq!(notice.title, "Alarm");
    assert_eq!(notice.level, NoticeLevel::Alert);
    assert_eq!(fired_at, at(7, 30, 0));
}

#[test]
fn test_alarm_armed_mid_minute_fires_immediately() {
    let clock = FixedClock::new(at(7, 30, 15));
    let mut widget = Widget::new(clock.clone(), ClockFormat::default(), ManualScheduler::new());
    widget.handle(Command::SetAlarm {
        hour: "7".into(),
        minute: "30".into(),
        meridiem: Meridiem::AM,
    });
    assert_eq!(fired(&run_for(&mut widget, &clock, 1)), 1);
}

#[test]
fn test_rearm_replaces_first_target() {
    let clock = FixedClock::new(at(7, 29, 0));
    let mut widget = Widget::new(clock.clone(), ClockFormat::default(), ManualScheduler::new());
    for (hour, minute) in [("7", "30"), ("7", "32")] {
        widget.handle(Command::SetAlarm {
            hour: hour.into(),
            minute: minute.into(),
            meridiem: Meridiem::AM,
        });
    }
    assert_eq!(widget.scheduler().active_for(TickTarget::Alarm), 1);

    // through 07:31:59: the replaced 07:30 target must not fire
    let events = run_for(&mut widget, &clock, 179);
    assert_eq!(fired(&events), 0);

    let events = run_for(&mut widget, &clock, 1);
    assert_eq!(fired(&events), 1);
}

#[test]
fn test_invalid_alarm_keeps_previous() {
    let clock = FixedClock::new(at(7, 0, 0));
    let mut widget = Widget::new(clock.clone(), ClockFormat::default(), ManualScheduler::new());
    widget.handle(Command::SetAlarm {
        hour: "7".into(),
        minute: "01".into(),
        meridiem: Meridiem::AM,
    });
    let events = widget.handle(Command::SetAlarm {
        hour: "7".into(),
        minute: "half past".into(),
        meridiem: Meridiem::AM,
    });
    match &events[..] {
        [Event::InvalidTime { notice, reason }] => {
            assert_eq!(notice.title, "Invalid Time");
            assert_eq!(notice.message, "Please enter a valid time.");
            assert!(reason.contains("minute"));
        }
        other => panic!("Expected InvalidTime, got {other:?}"),
    }
    assert_eq!(fired(&run_for(&mut widget, &clock, 60)), 1);
}

#[test]
fn test_stopwatch_hour_rollover() {
    let clock = FixedClock::new(at(12, 0, 0));
    let mut widget = Widget::new(clock.clone(), ClockFormat::default(), ManualScheduler::new());
    widget.handle(Command::StartStopwatch);

    widget.advance(Duration::from_secs(3599));
    assert_eq!(widget.stopwatch().display(), "00:59:59");

    let events = widget.advance(SECOND);
    assert_eq!(
        events,
        vec![Event::StopwatchUpdated {
            display: "01:00:00".into(),
            elapsed_secs: 3600,
            running: true,
        }]
    );
}

#[test]
fn test_widget_from_config_uses_patterns() {
    let mut config = Config::default();
    config.set("clock.time_format", "%H:%M").unwrap();
    config.set("clock.date_format", "%Y-%m-%d").unwrap();

    let clock = FixedClock::new(at(19, 45, 0));
    let mut widget = Widget::from_config(&config, clock, ManualScheduler::new()).unwrap();
    let events = widget.start();
    assert_eq!(
        events[0],
        Event::ClockUpdated {
            time: "19:45".into(),
            date: "2025-01-07".into(),
        }
    );
}

#[test]
fn test_events_serialize_with_type_tag() {
    let event = Event::StopwatchUpdated {
        display: "00:00:03".into(),
        elapsed_secs: 3,
        running: true,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["type"], "stopwatch_updated");
    assert_eq!(json["display"], "00:00:03");
}
