//! Main application entry point.

use clap::Parser;
use griddraw_app::{App, Args};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Starting GridDraw");

    let args = Args::parse();
    match App::run(&args, std::io::stdout().lock()) {
        Ok(summary) => {
            log::info!(
                "Replayed {} events: {} shapes, {} selected",
                summary.events,
                summary.shapes,
                summary.selected
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
