//! Event scripts: a JSON array of surface events.

use crate::app::AppError;
use griddraw_core::SurfaceEvent;
use std::path::Path;

pub fn parse_script(json: &str) -> Result<Vec<SurfaceEvent>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Read and parse an event script from disk.
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<SurfaceEvent>, AppError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| AppError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_script(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use griddraw_core::{Key, Modifiers, ToolKind};
    use kurbo::Point;
    use std::io::Write;

    #[test]
    fn test_parse_script() {
        let events = parse_script(
            r#"[
                {"type": "pointer_entered", "position": {"x": 5.0, "y": 5.0}},
                {"type": "pointer_exited"},
                {"type": "key_pressed", "key": "Left", "modifiers": {"ctrl": true}},
                {"type": "app_deactivated"},
                {"type": "select_tool", "tool": "Text"}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                SurfaceEvent::PointerEntered {
                    position: Point::new(5.0, 5.0)
                },
                SurfaceEvent::PointerExited,
                SurfaceEvent::KeyPressed {
                    key: Key::Left,
                    modifiers: Modifiers {
                        ctrl: true,
                        ..Modifiers::default()
                    },
                },
                SurfaceEvent::AppDeactivated,
                SurfaceEvent::SelectTool {
                    tool: ToolKind::Text
                },
            ]
        );
    }

    #[test]
    fn test_parse_error() {
        let err = parse_script(r#"[{"type": "teleport"}]"#).unwrap_err();
        assert!(matches!(err, AppError::Script(_)));
    }

    #[test]
    fn test_load_script_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"type": "app_activated"}}]"#).unwrap();
        let events = load_script(file.path()).unwrap();
        assert_eq!(events, vec![SurfaceEvent::AppActivated]);
    }
}
