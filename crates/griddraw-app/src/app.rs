//! Script runner.

use crate::script::load_script;
use crate::surface::{JsonListener, LoggingSurface};
use clap::Parser;
use griddraw_core::{CanvasConfig, ConfigError, Workspace};
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a script.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse script: {0}")]
    Script(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "griddraw", version, about = "Replay scripted canvas events")]
pub struct Args {
    /// JSON array of surface events
    pub script: PathBuf,
    /// Canvas configuration file
    pub config: Option<PathBuf>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub events: usize,
    pub shapes: usize,
    pub selected: usize,
}

pub struct App;

impl App {
    /// Replay the script named in `args`, writing notifications to `out`.
    pub fn run(args: &Args, out: impl Write) -> Result<Summary, AppError> {
        let config = match &args.config {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                CanvasConfig::load(path)?
            }
            None => CanvasConfig::default(),
        };
        let events = load_script(&args.script)?;
        log::info!("Loaded {} events from {}", events.len(), args.script.display());

        let mut workspace = Workspace::new(config);
        for event in events {
            workspace.push_event(event);
        }
        let mut surface = LoggingSurface::new();
        let mut listener = JsonListener::new(out);
        let handled = workspace.run_pending(&mut surface, &mut listener);

        let state = surface.state();
        log::info!(
            "Surface: {} markers, marquee {}, grid {}",
            state.marker_count(),
            if state.marquee.is_some() { "shown" } else { "hidden" },
            if state.grid_visible { "visible" } else { "hidden" }
        );
        Ok(Summary {
            events: handled,
            shapes: workspace.document().len(),
            selected: workspace.selection_tool().selection().len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["griddraw", "a.json"]).unwrap();
        assert_eq!(args.script, PathBuf::from("a.json"));
        assert_eq!(args.config, None);

        let args = Args::try_parse_from(["griddraw", "a.json", "c.json"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.json")));

        assert!(Args::try_parse_from(["griddraw"]).is_err());
        assert!(Args::try_parse_from(["griddraw", "a", "b", "c"]).is_err());
    }

    #[test]
    fn test_args_help_is_not_a_script() {
        let err = Args::try_parse_from(["griddraw", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Args::try_parse_from(["griddraw", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_run_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.json");
        fs::write(
            &script,
            r#"[
                {"type": "resized", "width": 200.0, "height": 200.0},
                {"type": "select_tool", "tool": "Line"},
                {"type": "pointer_down", "position": {"x": 15.0, "y": 15.0}},
                {"type": "pointer_moved", "position": {"x": 55.0, "y": 15.0}},
                {"type": "pointer_up", "position": {"x": 55.0, "y": 15.0}},
                {"type": "select_tool", "tool": "Select"},
                {"type": "pointer_moved", "position": {"x": 35.0, "y": 15.0}},
                {"type": "pointer_down", "position": {"x": 35.0, "y": 15.0}},
                {"type": "pointer_up", "position": {"x": 35.0, "y": 15.0}},
                {"type": "key_pressed", "key": "Down"}
            ]"#,
        )
        .unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"grid_spacing": 10.0}"#).unwrap();

        let args = Args {
            script,
            config: Some(config),
        };
        let mut out = Vec::new();
        let summary = App::run(&args, &mut out).unwrap();
        assert_eq!(
            summary,
            Summary {
                events: 10,
                shapes: 1,
                selected: 1
            }
        );

        let output = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(r#""event":"element_added""#));
        assert!(lines[1].contains(r#""event":"elements_translated""#));
    }

    #[test]
    fn test_missing_script() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args {
            script: dir.path().join("missing.json"),
            config: None,
        };
        let err = App::run(&args, Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn test_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.json");
        fs::write(&script, "[]").unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"grid_spacing": 0.0}"#).unwrap();

        let args = Args {
            script,
            config: Some(config),
        };
        let err = App::run(&args, Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::Invalid { .. })));
    }
}
