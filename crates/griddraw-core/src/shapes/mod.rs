//! Shapes placed on the grid.

mod inspector;
mod line;
mod metrics;
mod text;

pub use inspector::Inspector;
pub use line::LineShape;
pub use metrics::{ApproximateMetrics, TextMetrics};
pub use text::TextShape;

use crate::geom::{Rectangle, Vector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Errors raised by handle manipulation.
#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("handle {index} out of range for a shape with {count} handles")]
    HandleOutOfRange { index: usize, count: usize },
    #[error("drag attempted on non-interactive handle {index}")]
    HandleNotInteractive { index: usize },
}

/// Capabilities shared by every shape variant.
pub trait ShapeTrait {
    fn id(&self) -> ShapeId;

    /// Control points, in a fixed per-variant order.
    fn handles(&self) -> &[Vector];

    /// Whether the handle at `index` can be dragged.
    fn is_handle_interactive(&self, index: usize) -> bool;

    /// Rigidly shift every handle and any derived geometry.
    fn translate(&mut self, dv: Vector);

    /// Keyboard nudge by a grid delta.
    fn nudge(&mut self, dv: Vector) {
        self.translate(dv);
    }

    /// Move one handle, rebuilding the derived geometry.
    fn try_drag_handle(&mut self, index: usize, point: Vector) -> Result<(), ShapeError>;

    /// Move one handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle does not exist or is not interactive. Callers
    /// reach this only after filtering hits by [`ShapeTrait::is_handle_interactive`].
    fn drag_handle(&mut self, index: usize, point: Vector) {
        if let Err(err) = self.try_drag_handle(index, point) {
            panic!("{err}");
        }
    }

    /// Closest point of the shape to `point`.
    fn nearest_point(&self, point: Vector) -> Vector;

    fn overlaps_rect(&self, rect: &Rectangle) -> bool;

    /// Largest squared grid distance at which the pointer counts as on the shape.
    fn slop(&self) -> f64;

    /// Declarative description of the shape's inspector panel, if any.
    fn inspector(&self) -> Option<Inspector> {
        None
    }
}

/// Kind of shape, used in notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Line,
    Text,
}

/// The closed set of shapes.
#[derive(Debug, Clone)]
pub enum Shape {
    Line(LineShape),
    Text(TextShape),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Line(_) => ShapeKind::Line,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn as_line(&self) -> Option<&LineShape> {
        match self {
            Shape::Line(s) => Some(s),
            Shape::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextShape> {
        match self {
            Shape::Text(s) => Some(s),
            Shape::Line(_) => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextShape> {
        match self {
            Shape::Text(s) => Some(s),
            Shape::Line(_) => None,
        }
    }

    /// Squared distance from `point` to the shape.
    pub fn distance_squared(&self, point: Vector) -> f64 {
        (self.nearest_point(point) - point).norm_squared()
    }

    /// Interactive handles as `(index, position)` pairs.
    pub fn interactive_handles(&self) -> impl Iterator<Item = (usize, Vector)> + '_ {
        self.handles()
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| self.is_handle_interactive(*i))
    }
}

impl ShapeTrait for Shape {
    fn id(&self) -> ShapeId {
        match self {
            Shape::Line(s) => s.id(),
            Shape::Text(s) => s.id(),
        }
    }

    fn handles(&self) -> &[Vector] {
        match self {
            Shape::Line(s) => s.handles(),
            Shape::Text(s) => s.handles(),
        }
    }

    fn is_handle_interactive(&self, index: usize) -> bool {
        match self {
            Shape::Line(s) => s.is_handle_interactive(index),
            Shape::Text(s) => s.is_handle_interactive(index),
        }
    }

    fn translate(&mut self, dv: Vector) {
        match self {
            Shape::Line(s) => s.translate(dv),
            Shape::Text(s) => s.translate(dv),
        }
    }

    fn nudge(&mut self, dv: Vector) {
        match self {
            Shape::Line(s) => s.nudge(dv),
            Shape::Text(s) => s.nudge(dv),
        }
    }

    fn try_drag_handle(&mut self, index: usize, point: Vector) -> Result<(), ShapeError> {
        match self {
            Shape::Line(s) => s.try_drag_handle(index, point),
            Shape::Text(s) => s.try_drag_handle(index, point),
        }
    }

    fn nearest_point(&self, point: Vector) -> Vector {
        match self {
            Shape::Line(s) => s.nearest_point(point),
            Shape::Text(s) => s.nearest_point(point),
        }
    }

    fn overlaps_rect(&self, rect: &Rectangle) -> bool {
        match self {
            Shape::Line(s) => s.overlaps_rect(rect),
            Shape::Text(s) => s.overlaps_rect(rect),
        }
    }

    fn slop(&self) -> f64 {
        match self {
            Shape::Line(s) => s.slop(),
            Shape::Text(s) => s.slop(),
        }
    }

    fn inspector(&self) -> Option<Inspector> {
        match self {
            Shape::Line(s) => s.inspector(),
            Shape::Text(s) => s.inspector(),
        }
    }
}

impl From<LineShape> for Shape {
    fn from(s: LineShape) -> Self {
        Shape::Line(s)
    }
}

impl From<TextShape> for Shape {
    fn from(s: TextShape) -> Self {
        Shape::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::GridMapper;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_enum_delegates() {
        let mut shape = Shape::from(LineShape::new(v(0.0, 0.0), v(4.0, 0.0)));
        assert_eq!(shape.kind(), ShapeKind::Line);
        assert_eq!(shape.handles(), &[v(0.0, 0.0), v(4.0, 0.0)]);
        shape.translate(v(1.0, 1.0));
        assert_eq!(shape.handles(), &[v(1.0, 1.0), v(5.0, 1.0)]);
        assert!((shape.distance_squared(v(3.0, 3.0)) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_interactive_handles_filter() {
        let line = Shape::from(LineShape::new(v(0.0, 0.0), v(4.0, 0.0)));
        assert_eq!(line.interactive_handles().count(), 2);

        let metrics = ApproximateMetrics::default();
        let text = Shape::from(TextShape::new(
            v(10.0, 10.0),
            "hi",
            &metrics,
            &GridMapper::default(),
        ));
        assert_eq!(text.handles().len(), 4);
        assert_eq!(text.interactive_handles().count(), 0);
        assert!(text.as_line().is_none());
    }

    #[test]
    fn test_shape_ids_are_unique() {
        let a = LineShape::new(v(0.0, 0.0), v(1.0, 0.0));
        let b = LineShape::new(v(0.0, 0.0), v(1.0, 0.0));
        assert_ne!(a.id(), b.id());
    }

    #[test]
    #[should_panic(expected = "non-interactive handle 1")]
    fn test_drag_on_text_handle_panics() {
        let metrics = ApproximateMetrics::default();
        let mut text = Shape::from(TextShape::new(
            v(10.0, 10.0),
            "hi",
            &metrics,
            &GridMapper::default(),
        ));
        text.drag_handle(1, v(0.0, 0.0));
    }
}
