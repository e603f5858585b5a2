use clap::Args;
use alarmclock_core::{Config, Event, ManualScheduler, SystemClock, Widget};

use crate::render::{RenderMode, Renderer};
use crate::shell::{self, LoopOptions, HELP};

#[derive(Args)]
pub struct RunArgs {
    /// Print events as JSON instead of a live status line
    #[arg(long)]
    json: bool,
}

/// All three tabs at once: live clock, alarm and stopwatch.
pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut widget = Widget::from_config(&config, SystemClock, ManualScheduler::new())?;
    let mode = if args.json {
        RenderMode::Json
    } else {
        RenderMode::Live
    };
    let mut renderer = Renderer::new(std::io::stdout(), mode, &config);

    eprintln!("{HELP}");
    renderer.render_all(&widget.start())?;

    let result = shell::run(
        &mut widget,
        &mut renderer,
        LoopOptions {
            read_input: true,
            default_meridiem: config.alarm.default_meridiem,
            until: |_: &Event| false,
        },
    );
    if mode == RenderMode::Live {
        println!();
    }
    result
}
