use clap::Args;
use alarmclock_core::{Config, Event, ManualScheduler, SystemClock, Widget};

use crate::render::{RenderMode, Renderer};
use crate::shell::{self, LoopOptions};

#[derive(Args)]
pub struct ClockArgs {
    /// Keep printing the time every second
    #[arg(long)]
    watch: bool,
    /// Print events as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ClockArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut widget = Widget::from_config(&config, SystemClock, ManualScheduler::new())?;
    let mode = if args.json {
        RenderMode::Json
    } else {
        RenderMode::Lines
    };
    let mut renderer = Renderer::new(std::io::stdout(), mode, &config);

    let first: Vec<Event> = widget
        .start()
        .into_iter()
        .filter(|e| matches!(e, Event::ClockUpdated { .. }))
        .collect();
    renderer.render_all(&first)?;

    if !args.watch {
        return Ok(());
    }

    shell::run(
        &mut widget,
        &mut renderer,
        LoopOptions {
            read_input: false,
            default_meridiem: config.alarm.default_meridiem,
            until: |_: &Event| false,
        },
    )
}
