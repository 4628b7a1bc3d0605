//! GridDraw Core Library
//!
//! Platform-agnostic geometry, shapes and interaction logic for a grid-snapped
//! drawing canvas.

pub mod config;
pub mod coords;
pub mod document;
pub mod geom;
pub mod input;
pub mod render;
pub mod shapes;
pub mod tools;
pub mod workspace;

pub use config::{CanvasConfig, ConfigError};
pub use coords::{GRID_SPACING, GridMapper};
pub use document::{Document, DocumentEvent, DocumentListener, LogListener};
pub use geom::{Line, Rectangle, Segment, Vector};
pub use input::{Key, Modifiers, PointerPoint, SurfaceEvent};
pub use render::{
    CursorStyle, MarkerId, MarkerKind, MarkerStyle, RenderQueue, RenderRequest, RenderSurface,
    SurfaceState,
};
pub use shapes::{Shape, ShapeError, ShapeId, ShapeKind, ShapeTrait};
pub use tools::{SelectionTool, Tool, ToolContext, ToolKind};
pub use workspace::Workspace;
