//! Tool system for the canvas.
//!
//! The workspace forwards every event to the active tool together with a
//! [`ToolContext`]. Tools mutate the document and queue render requests; they
//! never hold references into either between events.

mod line;
mod selection;
mod text;

pub use line::LineTool;
pub use selection::{HandleRef, InteractionState, SelectionTool};
pub use text::TextTool;

use crate::config::CanvasConfig;
use crate::coords::GridMapper;
use crate::document::Document;
use crate::input::{Key, Modifiers, PointerPoint};
use crate::render::{CursorStyle, RenderQueue, RenderRequest};
use crate::shapes::{ShapeId, TextMetrics};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Line,
    Text,
}

/// Shared state every tool handler works against.
pub struct ToolContext {
    pub document: Document,
    pub render: RenderQueue,
    pub mapper: GridMapper,
    pub config: CanvasConfig,
    pub metrics: Box<dyn TextMetrics>,
}

impl ToolContext {
    pub fn new(config: CanvasConfig, metrics: Box<dyn TextMetrics>) -> Self {
        Self {
            document: Document::new(),
            render: RenderQueue::new(),
            mapper: config.mapper(),
            config,
            metrics,
        }
    }

    /// Context using the configuration's approximate text metrics.
    pub fn from_config(config: CanvasConfig) -> Self {
        let metrics = Box::new(config.metrics());
        Self::new(config, metrics)
    }
}

impl Default for ToolContext {
    fn default() -> Self {
        Self::from_config(CanvasConfig::default())
    }
}

/// Handlers for every event a tool can receive. Each runs to completion.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    /// Cursor shown while the pointer is over the canvas.
    fn cursor(&self) -> CursorStyle {
        CursorStyle::Arrow
    }

    fn tool_selected(&mut self, _cx: &mut ToolContext) {}

    fn tool_deselected(&mut self, _cx: &mut ToolContext) {}

    fn app_activated(&mut self, _cx: &mut ToolContext) {}

    fn app_deactivated(&mut self, _cx: &mut ToolContext) {}

    fn canvas_entered(&mut self, cx: &mut ToolContext, p: PointerPoint) {
        cx.render.push(RenderRequest::SetCursor(self.cursor()));
        self.pointer_moved(cx, p);
    }

    fn canvas_exited(&mut self, cx: &mut ToolContext) {
        cx.render.push(RenderRequest::SetCursor(CursorStyle::Arrow));
    }

    fn key_pressed(&mut self, _cx: &mut ToolContext, _key: Key, _modifiers: Modifiers) {}

    fn pointer_down(&mut self, cx: &mut ToolContext, p: PointerPoint, modifiers: Modifiers);

    fn pointer_up(&mut self, cx: &mut ToolContext, p: PointerPoint);

    fn pointer_moved(&mut self, cx: &mut ToolContext, p: PointerPoint);

    /// Handles of the given shapes changed outside the tool (content edits).
    fn shapes_changed(&mut self, _cx: &mut ToolContext, _ids: &[ShapeId]) {}

    /// The given shapes were removed from the document.
    fn shapes_deleted(&mut self, _cx: &mut ToolContext, _ids: &[ShapeId]) {}
}
