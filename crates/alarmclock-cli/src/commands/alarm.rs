use clap::Subcommand;
use alarmclock_core::{Command, Config, Event, ManualScheduler, Meridiem, SystemClock, Widget};

use crate::render::{RenderMode, Renderer};
use crate::shell::{self, LoopOptions};

#[derive(Subcommand)]
pub enum AlarmAction {
    /// Arm the alarm and wait until it goes off
    Set {
        /// Hour on the 12-hour clock (1-12)
        hour: String,
        /// Minute (0-59)
        minute: String,
        /// AM or PM (defaults to alarm.default_meridiem)
        #[arg(long, short)]
        meridiem: Option<Meridiem>,
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: AlarmAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AlarmAction::Set {
            hour,
            minute,
            meridiem,
            json,
        } => {
            let config = Config::load_or_default();
            let mut widget = Widget::from_config(&config, SystemClock, ManualScheduler::new())?;
            let mode = if json {
                RenderMode::Json
            } else {
                RenderMode::Lines
            };
            let mut renderer = Renderer::new(std::io::stdout(), mode, &config);

            let events = widget.handle(Command::SetAlarm {
                hour,
                minute,
                meridiem: meridiem.unwrap_or(config.alarm.default_meridiem),
            });
            renderer.render_all(&events)?;
            if let Some(Event::InvalidTime { reason, .. }) = events.first() {
                return Err(reason.clone().into());
            }

            shell::run(
                &mut widget,
                &mut renderer,
                LoopOptions {
                    read_input: false,
                    default_meridiem: config.alarm.default_meridiem,
                    until: |e: &Event| matches!(e, Event::AlarmFired { .. }),
                },
            )
        }
    }
}
