//! Line shape.

use super::{Inspector, ShapeError, ShapeId, ShapeTrait};
use crate::geom::{Rectangle, Segment, Vector};
use uuid::Uuid;

/// A straight line between two draggable endpoint handles.
#[derive(Debug, Clone)]
pub struct LineShape {
    id: ShapeId,
    /// Endpoints `[p0, p1]`.
    handles: [Vector; 2],
    /// Segment rebuilt whenever an endpoint changes.
    segment: Segment,
}

impl LineShape {
    /// Squared grid distance within which the pointer is on the line.
    pub const SLOP: f64 = 4.0;

    /// Create a new line.
    pub fn new(p0: Vector, p1: Vector) -> Self {
        Self {
            id: Uuid::new_v4(),
            handles: [p0, p1],
            segment: Segment::new(p0, p1),
        }
    }

    pub fn p0(&self) -> Vector {
        self.handles[0]
    }

    pub fn p1(&self) -> Vector {
        self.handles[1]
    }

    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Replace both endpoints.
    pub fn set_endpoints(&mut self, p0: Vector, p1: Vector) {
        self.handles = [p0, p1];
        self.segment = Segment::new(p0, p1);
    }
}

impl ShapeTrait for LineShape {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn handles(&self) -> &[Vector] {
        &self.handles
    }

    fn is_handle_interactive(&self, index: usize) -> bool {
        index < self.handles.len()
    }

    fn translate(&mut self, dv: Vector) {
        if dv == Vector::ZERO {
            return;
        }
        self.set_endpoints(self.handles[0] + dv, self.handles[1] + dv);
    }

    fn try_drag_handle(&mut self, index: usize, point: Vector) -> Result<(), ShapeError> {
        let [mut p0, mut p1] = self.handles;
        match index {
            0 => p0 = point,
            1 => p1 = point,
            _ => {
                return Err(ShapeError::HandleOutOfRange {
                    index,
                    count: self.handles.len(),
                });
            }
        }
        self.set_endpoints(p0, p1);
        Ok(())
    }

    fn nearest_point(&self, point: Vector) -> Vector {
        self.segment.nearest_point(point)
    }

    fn overlaps_rect(&self, rect: &Rectangle) -> bool {
        rect.overlaps_segment(&self.segment)
    }

    fn slop(&self) -> f64 {
        Self::SLOP
    }

    fn inspector(&self) -> Option<Inspector> {
        Some(Inspector::Coordinates {
            points: self.handles.to_vec(),
        })
    }
}
