//! GridDraw Application
//!
//! Headless driver that replays scripted surface events through the canvas
//! workspace, logs what a renderer would draw and prints document
//! notifications as JSON lines.

mod app;
mod script;
mod surface;

pub use app::{App, AppError, Args, Summary};
pub use script::{load_script, parse_script};
pub use surface::{JsonListener, LoggingSurface};
