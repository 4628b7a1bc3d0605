//! Line placement tool.

use super::{Tool, ToolContext, ToolKind};
use crate::geom::Vector;
use crate::input::{Key, Modifiers, PointerPoint};
use crate::render::{CursorStyle, RenderRequest};
use crate::shapes::LineShape;
use kurbo::Line;

#[derive(Debug, Clone, Copy)]
struct Placement {
    start: Vector,
    end: Vector,
}

/// Press, drag and release to place a line between grid points.
#[derive(Debug, Default)]
pub struct LineTool {
    placing: Option<Placement>,
}

impl LineTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_placing(&self) -> bool {
        self.placing.is_some()
    }

    fn draw_guide(cx: &mut ToolContext, placement: Placement) {
        let line = Line::new(
            cx.mapper.grid_to_surface_point(placement.start),
            cx.mapper.grid_to_surface_point(placement.end),
        );
        cx.render.push(RenderRequest::DrawGuide { line });
    }

    fn cancel(&mut self, cx: &mut ToolContext) {
        if self.placing.take().is_some() {
            log::debug!("Line placement cancelled");
            cx.render.push(RenderRequest::RemoveGuide);
        }
    }
}

impl Tool for LineTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Line
    }

    fn cursor(&self) -> CursorStyle {
        CursorStyle::Crosshair
    }

    fn tool_deselected(&mut self, cx: &mut ToolContext) {
        self.cancel(cx);
    }

    fn app_deactivated(&mut self, cx: &mut ToolContext) {
        self.cancel(cx);
    }

    fn key_pressed(&mut self, cx: &mut ToolContext, key: Key, _modifiers: Modifiers) {
        if key == Key::Escape {
            self.cancel(cx);
        }
    }

    fn pointer_down(&mut self, cx: &mut ToolContext, p: PointerPoint, _modifiers: Modifiers) {
        assert!(self.placing.is_none(), "pointer down while placing a line");
        let placement = Placement {
            start: p.grid,
            end: p.grid,
        };
        self.placing = Some(placement);
        Self::draw_guide(cx, placement);
    }

    fn pointer_up(&mut self, cx: &mut ToolContext, _p: PointerPoint) {
        let Some(Placement { start, end }) = self.placing.take() else {
            return;
        };
        cx.render.push(RenderRequest::RemoveGuide);
        if start == end {
            log::debug!("Ignoring zero-length line at ({}, {})", start.x, start.y);
            return;
        }
        cx.document.add_shape(LineShape::new(start, end));
    }

    fn pointer_moved(&mut self, cx: &mut ToolContext, p: PointerPoint) {
        let Some(placement) = self.placing.as_mut() else {
            return;
        };
        if placement.end == p.grid {
            return;
        }
        placement.end = p.grid;
        let placement = *placement;
        Self::draw_guide(cx, placement);
    }
}
