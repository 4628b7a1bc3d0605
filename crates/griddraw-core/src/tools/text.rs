//! Text placement tool.

use super::{Tool, ToolContext, ToolKind};
use crate::input::{Modifiers, PointerPoint};
use crate::render::CursorStyle;
use crate::shapes::TextShape;

/// Click to drop a text shape centered on the grid point under the pointer.
#[derive(Debug, Default)]
pub struct TextTool;

impl TextTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn cursor(&self) -> CursorStyle {
        CursorStyle::Text
    }

    fn pointer_down(&mut self, cx: &mut ToolContext, p: PointerPoint, _modifiers: Modifiers) {
        let text = TextShape::new(
            p.grid,
            cx.config.default_text.as_str(),
            &*cx.metrics,
            &cx.mapper,
        );
        cx.document.add_shape(text);
    }

    fn pointer_up(&mut self, _cx: &mut ToolContext, _p: PointerPoint) {}

    fn pointer_moved(&mut self, _cx: &mut ToolContext, _p: PointerPoint) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Vector;

    #[test]
    fn test_click_places_default_text() {
        let mut tool = TextTool::new();
        let mut cx = ToolContext::default();
        tool.pointer_down(&mut cx, PointerPoint::at(Vector::new(7.0, 3.0)), Modifiers::default());
        tool.pointer_up(&mut cx, PointerPoint::at(Vector::new(7.0, 3.0)));

        assert_eq!(cx.document.len(), 1);
        let text = cx.document.shapes().next().and_then(|s| s.as_text()).unwrap();
        assert_eq!(text.content(), "Text");
        assert_eq!(text.anchor(), Vector::new(7.0, 3.0));
    }
}
