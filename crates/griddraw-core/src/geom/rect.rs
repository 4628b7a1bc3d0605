//! Axis-aligned rectangle with four boundary segments.

use super::{Line, Segment, Vector};
use std::ops::{Add, Sub};

/// An axis-aligned rectangle built from two opposite corners.
///
/// The corners are normalized to north-west, north-east, south-east and
/// south-west (y grows downward). The boundary segments are stored in the
/// fixed order top, right, bottom, left and always close on the corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    p0: Vector,
    p1: Vector,
    nw: Vector,
    ne: Vector,
    se: Vector,
    sw: Vector,
    segments: [Segment; 4],
}

impl Rectangle {
    pub fn new(p0: Vector, p1: Vector) -> Self {
        let (left, right) = (p0.x.min(p1.x), p0.x.max(p1.x));
        let (top, bottom) = (p0.y.min(p1.y), p0.y.max(p1.y));
        let nw = Vector::new(left, top);
        let ne = Vector::new(right, top);
        let se = Vector::new(right, bottom);
        let sw = Vector::new(left, bottom);
        Self {
            p0,
            p1,
            nw,
            ne,
            se,
            sw,
            segments: [
                Segment::new(nw, ne),
                Segment::new(ne, se),
                Segment::new(se, sw),
                Segment::new(sw, nw),
            ],
        }
    }

    pub fn zero() -> Self {
        Self::new(Vector::ZERO, Vector::ZERO)
    }

    /// A `w` by `h` rectangle centered on the origin.
    pub fn origin(w: f64, h: f64) -> Self {
        Self::new(Vector::new(-w / 2.0, -h / 2.0), Vector::new(w / 2.0, h / 2.0))
    }

    /// A square of side `l` centered on the origin.
    pub fn square(l: f64) -> Self {
        Self::origin(l, l)
    }

    /// A rectangle spanning from the origin to `v`.
    pub fn from_vec(v: Vector) -> Self {
        Self::new(Vector::ZERO, v)
    }

    /// First corner as given at construction.
    pub fn p0(&self) -> Vector {
        self.p0
    }

    /// Second corner as given at construction.
    pub fn p1(&self) -> Vector {
        self.p1
    }

    pub fn nw(&self) -> Vector {
        self.nw
    }

    pub fn ne(&self) -> Vector {
        self.ne
    }

    pub fn se(&self) -> Vector {
        self.se
    }

    pub fn sw(&self) -> Vector {
        self.sw
    }

    /// Corners in clockwise order starting at north-west.
    pub fn corners(&self) -> [Vector; 4] {
        [self.nw, self.ne, self.se, self.sw]
    }

    pub fn width(&self) -> f64 {
        self.ne.x - self.nw.x
    }

    pub fn height(&self) -> f64 {
        self.sw.y - self.nw.y
    }

    /// Boundary segments: top, right, bottom, left.
    pub fn segments(&self) -> &[Segment; 4] {
        &self.segments
    }

    pub fn top(&self) -> &Segment {
        &self.segments[0]
    }

    pub fn right(&self) -> &Segment {
        &self.segments[1]
    }

    pub fn bottom(&self) -> &Segment {
        &self.segments[2]
    }

    pub fn left(&self) -> &Segment {
        &self.segments[3]
    }

    pub fn translate(&self, dv: Vector) -> Self {
        Self::new(self.p0 + dv, self.p1 + dv)
    }

    /// Parameters along `line` where it crosses a boundary segment.
    ///
    /// One value per boundary hit, so a line through a corner reports the
    /// same parameter twice. Edges parallel to `line` contribute nothing.
    pub fn line_intersection_params(&self, line: &Line) -> Vec<f64> {
        self.segments
            .iter()
            .filter_map(|edge| line.intersection_params(edge.line()))
            .filter(|(_, u)| (0.0..=1.0).contains(u))
            .map(|(t, _)| t)
            .collect()
    }

    /// True when any part of `segment` touches the rectangle.
    pub fn overlaps_segment(&self, segment: &Segment) -> bool {
        if segment.is_degenerate() {
            return self.overlaps_point(segment.p0());
        }
        let ts = self.line_intersection_params(segment.line());
        if ts.is_empty() {
            return false;
        }
        let min = ts.iter().copied().fold(f64::INFINITY, f64::min);
        let max = ts.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        min <= 1.0 && max >= 0.0
    }

    /// Inclusive point containment.
    pub fn overlaps_point(&self, p: Vector) -> bool {
        self.nw.x <= p.x && p.x <= self.se.x && self.nw.y <= p.y && p.y <= self.se.y
    }

    /// Separating-axis test. Touching edges count as overlap.
    pub fn overlaps_rect(&self, other: &Rectangle) -> bool {
        !(self.ne.x < other.nw.x
            || other.ne.x < self.nw.x
            || self.sw.y < other.nw.y
            || other.sw.y < self.nw.y)
    }

    /// Nearest point on or in the rectangle.
    ///
    /// Outside points project onto the one edge facing them, picked by
    /// checking left, right, top, then bottom. In the diagonal corner regions
    /// this is not the exact closest boundary point.
    pub fn nearest_point(&self, p: Vector) -> Vector {
        if p.x < self.nw.x {
            self.left().nearest_point(p)
        } else if p.x > self.ne.x {
            self.right().nearest_point(p)
        } else if p.y < self.nw.y {
            self.top().nearest_point(p)
        } else if p.y > self.sw.y {
            self.bottom().nearest_point(p)
        } else {
            p
        }
    }
}

impl Add<Vector> for Rectangle {
    type Output = Rectangle;

    fn add(self, dv: Vector) -> Rectangle {
        self.translate(dv)
    }
}

impl Sub<Vector> for Rectangle {
    type Output = Rectangle;

    fn sub(self, dv: Vector) -> Rectangle {
        self.translate(-dv)
    }
}
