use clap::Subcommand;
use alarmclock_core::{format_elapsed, Config, Event, ManualScheduler, SystemClock, Widget};

use crate::render::{RenderMode, Renderer};
use crate::shell::{self, LoopOptions};

#[derive(Subcommand)]
pub enum StopwatchAction {
    /// Interactive stopwatch: type start, stop, reset or quit
    Run {
        /// Print events as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print an elapsed second count as HH:MM:SS
    Format {
        seconds: u64,
    },
}

pub fn run(action: StopwatchAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StopwatchAction::Run { json } => {
            let config = Config::load_or_default();
            let mut widget = Widget::from_config(&config, SystemClock, ManualScheduler::new())?;
            let mode = if json {
                RenderMode::Json
            } else {
                RenderMode::Lines
            };
            let mut renderer = Renderer::new(std::io::stdout(), mode, &config);
            eprintln!("commands: start, stop, reset, quit");

            shell::run(
                &mut widget,
                &mut renderer,
                LoopOptions {
                    read_input: true,
                    default_meridiem: config.alarm.default_meridiem,
                    until: |_: &Event| false,
                },
            )
        }
        StopwatchAction::Format { seconds } => {
            println!("{}", format_elapsed(seconds));
            Ok(())
        }
    }
}
