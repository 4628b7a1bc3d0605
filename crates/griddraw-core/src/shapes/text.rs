//! Text shape.

use super::{Inspector, ShapeError, ShapeId, ShapeTrait, TextMetrics};
use crate::coords::GridMapper;
use crate::geom::{Rectangle, Vector};
use uuid::Uuid;

/// A block of text centered on an anchor point.
///
/// The bounding box comes from the text metrics converted to grid units.
/// Its four corners are display-only handles.
#[derive(Debug, Clone)]
pub struct TextShape {
    id: ShapeId,
    /// Center of the text block.
    anchor: Vector,
    content: String,
    /// Half the box size in grid units.
    half_size: Vector,
    bounds: Rectangle,
    /// Corners `[nw, ne, se, sw]`.
    handles: [Vector; 4],
}

impl TextShape {
    /// Squared grid distance within which the pointer is on the text.
    /// Only containment counts.
    pub const SLOP: f64 = 0.0;

    /// Create a new text block.
    pub fn new(
        anchor: Vector,
        content: impl Into<String>,
        metrics: &dyn TextMetrics,
        mapper: &GridMapper,
    ) -> Self {
        let content = content.into();
        let half_size = measure(&content, metrics, mapper) / 2.0;
        let bounds = Rectangle::new(anchor - half_size, anchor + half_size);
        Self {
            id: Uuid::new_v4(),
            anchor,
            content,
            half_size,
            bounds,
            handles: bounds.corners(),
        }
    }

    pub fn anchor(&self) -> Vector {
        self.anchor
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// Box size in grid units.
    pub fn size(&self) -> Vector {
        self.half_size * 2.0
    }

    /// Re-center the block on a new anchor.
    pub fn move_to(&mut self, anchor: Vector) {
        self.anchor = anchor;
        self.rebuild();
    }

    /// Replace the content and re-measure.
    pub fn set_text(
        &mut self,
        content: impl Into<String>,
        metrics: &dyn TextMetrics,
        mapper: &GridMapper,
    ) {
        self.content = content.into();
        self.half_size = measure(&self.content, metrics, mapper) / 2.0;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        self.bounds = Rectangle::new(self.anchor - self.half_size, self.anchor + self.half_size);
        self.handles = self.bounds.corners();
    }
}

/// Full box size of `content` in grid units.
fn measure(content: &str, metrics: &dyn TextMetrics, mapper: &GridMapper) -> Vector {
    let width = content
        .lines()
        .map(|line| metrics.measure(line))
        .fold(0.0, f64::max);
    let line_count = content.lines().count().max(1);
    let height = line_count as f64 * metrics.line_height();
    Vector::new(
        mapper.surface_to_grid_delta(width),
        mapper.surface_to_grid_delta(height),
    )
}

impl ShapeTrait for TextShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn handles(&self) -> &[Vector] {
        &self.handles
    }

    fn is_handle_interactive(&self, _index: usize) -> bool {
        false
    }

    fn translate(&mut self, dv: Vector) {
        if dv == Vector::ZERO {
            return;
        }
        self.move_to(self.anchor + dv);
    }

    fn try_drag_handle(&mut self, index: usize, _point: Vector) -> Result<(), ShapeError> {
        if index >= self.handles.len() {
            return Err(ShapeError::HandleOutOfRange {
                index,
                count: self.handles.len(),
            });
        }
        Err(ShapeError::HandleNotInteractive { index })
    }

    fn nearest_point(&self, point: Vector) -> Vector {
        self.bounds.nearest_point(point)
    }

    fn overlaps_rect(&self, rect: &Rectangle) -> bool {
        self.bounds.overlaps_rect(rect)
    }

    fn slop(&self) -> f64 {
        Self::SLOP
    }

    fn inspector(&self) -> Option<Inspector> {
        Some(Inspector::TextEntry {
            position: self.anchor,
            text: self.content.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ApproximateMetrics;

    /// 10px per char, 20px per line: with spacing 10 that is 1 x 2 grid units.
    fn metrics() -> ApproximateMetrics {
        ApproximateMetrics {
            font_size: 10.0,
            char_width_factor: 1.0,
            line_height_factor: 2.0,
        }
    }

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    fn text(content: &str) -> TextShape {
        TextShape::new(v(10.0, 10.0), content, &metrics(), &GridMapper::default())
    }

    #[test]
    fn test_box_is_centered_on_anchor() {
        let t = text("abcd");
        assert_eq!(t.size(), v(4.0, 2.0));
        assert_eq!(t.bounds().nw(), v(8.0, 9.0));
        assert_eq!(t.bounds().se(), v(12.0, 11.0));
        assert_eq!(
            t.handles(),
            &[v(8.0, 9.0), v(12.0, 9.0), v(12.0, 11.0), v(8.0, 11.0)]
        );
    }

    #[test]
    fn test_multiline_uses_widest_line() {
        let t = text("ab\nabcdef\nx");
        assert_eq!(t.size(), v(6.0, 6.0));
    }

    #[test]
    fn test_empty_text_has_one_line() {
        let t = text("");
        assert_eq!(t.size(), v(0.0, 2.0));
    }

    #[test]
    fn test_translate_moves_box() {
        let mut t = text("abcd");
        t.translate(v(1.0, -2.0));
        assert_eq!(t.anchor(), v(11.0, 8.0));
        assert_eq!(t.handles()[0], v(9.0, 7.0));
    }

    #[test]
    fn test_set_text_recomputes_handles() {
        let mut t = text("ab");
        t.set_text("abcdef", &metrics(), &GridMapper::default());
        assert_eq!(t.content(), "abcdef");
        assert_eq!(t.handles()[0], v(7.0, 9.0));
        assert_eq!(t.handles()[2], v(13.0, 11.0));
    }

    #[test]
    fn test_handles_are_not_draggable() {
        let mut t = text("abcd");
        assert!(!t.is_handle_interactive(0));
        assert_eq!(
            t.try_drag_handle(2, v(0.0, 0.0)),
            Err(ShapeError::HandleNotInteractive { index: 2 })
        );
        assert_eq!(
            t.try_drag_handle(4, v(0.0, 0.0)),
            Err(ShapeError::HandleOutOfRange { index: 4, count: 4 })
        );
    }

    #[test]
    fn test_nearest_point_and_zero_slop() {
        let t = text("abcd");
        let inside = v(9.0, 10.5);
        assert_eq!(t.nearest_point(inside), inside);
        assert_eq!(t.nearest_point(v(20.0, 10.0)), v(12.0, 10.0));
        assert_eq!(t.slop(), 0.0);
    }

    #[test]
    fn test_overlaps_rect() {
        let t = text("abcd");
        assert!(t.overlaps_rect(&Rectangle::new(v(0.0, 0.0), v(8.0, 9.0))));
        assert!(!t.overlaps_rect(&Rectangle::new(v(0.0, 0.0), v(7.0, 7.0))));
    }
}
