use clap::Parser;
use std::error::Error;
use std::io;

use matrix_cam::camera::WebcamProvider;
use matrix_cam::cli::{self, Args, Command};
use matrix_cam::config::Config;
use matrix_cam::event_loop::{self, App, LoopExit};
use matrix_cam::logging;
use matrix_cam::render::RainController;
use matrix_cam::settings::RunSettings;
use matrix_cam::shutdown::setup_ctrlc_handler;
use matrix_cam::terminal::{StatusBar, TerminalGuard, TerminalSurface};

fn main() {
    let args = Args::parse();

    let result: Result<(), Box<dyn Error>> = match &args.command {
        Some(Command::ListCameras) => cli::list_cameras().map_err(Into::into),
        Some(Command::Config { action }) => {
            cli::handle_config_action(action.clone(), args.config.as_deref()).map_err(Into::into)
        }
        None => run_rain(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_rain(args: &Args) -> Result<(), Box<dyn Error>> {
    // Merge settings: CLI args > config file > built-in defaults
    let config = Config::load(args.config.as_deref())?;
    let settings = RunSettings::resolve(args, &config);

    logging::init(settings.log_level, &settings.log_file)?;
    log::info!(
        "Starting matrix-cam (camera {}, mirror {}, {} fps display)",
        settings.constraints.device_index,
        settings.constraints.mirror,
        settings.display_fps
    );

    if let Err(e) = setup_ctrlc_handler() {
        log::warn!("Failed to install Ctrl+C handler: {}", e);
    }

    let runtime = tokio::runtime::Runtime::new()?;

    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut guard = TerminalGuard::enter()?;

    let surface = TerminalSurface::new(
        io::stdout(),
        cols,
        rows,
        settings.constraints.ideal_width,
        settings.constraints.ideal_height,
    );
    let controller = RainController::new(WebcamProvider::new(), surface, settings.constraints.clone());
    let mut app = App::new(controller, StatusBar::with_visibility(settings.status_bar));

    let result = runtime.block_on(event_loop::run(
        &mut app,
        settings.frame_interval(),
        settings.autostart,
    ));

    app.controller_mut().stop();
    guard.restore()?;

    let stats = app.controller().stats();
    log::info!(
        "Rendered {} ticks, skipped {}",
        stats.ticks_rendered,
        stats.ticks_skipped
    );

    match result? {
        LoopExit::Quit => log::info!("Quit by user"),
        LoopExit::Interrupted => log::info!("Interrupted"),
    }
    Ok(())
}
