//! Pointer and keyboard events delivered by the rendering surface.

use crate::geom::Vector;
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Escape,
    Delete,
    Backspace,
    Char(char),
}

impl Key {
    /// One-grid-unit step for arrow keys.
    pub fn arrow_delta(self) -> Option<Vector> {
        match self {
            Key::Left => Some(Vector::new(-1.0, 0.0)),
            Key::Right => Some(Vector::new(1.0, 0.0)),
            Key::Up => Some(Vector::new(0.0, -1.0)),
            Key::Down => Some(Vector::new(0.0, 1.0)),
            _ => None,
        }
    }

    pub fn is_delete(self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Pointer position in grid space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerPoint {
    /// Rounded to the nearest grid point. Used for placement and dragging.
    pub grid: Vector,
    /// Unrounded. Used for hit testing.
    pub fine: Vector,
}

impl PointerPoint {
    pub fn new(grid: Vector, fine: Vector) -> Self {
        Self { grid, fine }
    }

    /// A pointer resting exactly on a grid point.
    pub fn at(grid: Vector) -> Self {
        Self { grid, fine: grid }
    }
}

/// Raw events in surface coordinates, queued for the workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceEvent {
    PointerDown {
        position: Point,
        #[serde(default)]
        modifiers: Modifiers,
    },
    PointerUp {
        position: Point,
    },
    PointerMoved {
        position: Point,
    },
    PointerEntered {
        position: Point,
    },
    PointerExited,
    KeyPressed {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The drawing surface changed size, in pixels.
    Resized {
        width: f64,
        height: f64,
    },
    AppActivated,
    AppDeactivated,
    SelectTool {
        tool: ToolKind,
    },
}
