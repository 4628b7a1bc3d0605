//! Line segment: a [`Line`] restricted to `t in [0, 1]`.

use super::{Line, Vector};

/// A bounded segment between two endpoints.
///
/// A zero-length segment behaves as its single point everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    line: Line,
}

impl Segment {
    pub fn new(p0: Vector, p1: Vector) -> Self {
        Self {
            line: Line::new(p0, p1),
        }
    }

    /// The underlying infinite line.
    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn p0(&self) -> Vector {
        self.line.p0()
    }

    pub fn p1(&self) -> Vector {
        self.line.p1()
    }

    pub fn dt(&self) -> Vector {
        self.line.dt()
    }

    pub fn dt2(&self) -> f64 {
        self.line.dt2()
    }

    pub fn length(&self) -> f64 {
        self.dt2().sqrt()
    }

    pub fn is_degenerate(&self) -> bool {
        self.line.is_degenerate()
    }

    /// Evaluate the segment at `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f64) -> Vector {
        self.line.at(t.clamp(0.0, 1.0))
    }

    /// Clamped projection parameter of `p`. Zero for a degenerate segment.
    pub fn nearest_point_param(&self, p: Vector) -> f64 {
        self.line
            .nearest_point_param(p)
            .map_or(0.0, |t| t.clamp(0.0, 1.0))
    }

    pub fn nearest_point(&self, p: Vector) -> Vector {
        self.line.at(self.nearest_point_param(p))
    }

    /// Intersection parameters, accepted only when both lie in `[0, 1]`.
    pub fn intersection_params(&self, other: &Segment) -> Option<(f64, f64)> {
        let (t, u) = self.line.intersection_params(&other.line)?;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some((t, u))
        } else {
            None
        }
    }

    pub fn intersection(&self, other: &Segment) -> Option<Vector> {
        self.intersection_params(other).map(|(t, _)| self.line.at(t))
    }

    /// The maximal sub-segment shared by two collinear segments.
    ///
    /// Returns `None` when the segments are not on the same line or do not
    /// touch. The result runs in the direction of `self`.
    pub fn collinear_overlap(&self, other: &Segment) -> Option<Segment> {
        if self.is_degenerate() {
            let p = self.p0();
            return (other.nearest_point(p) == p).then_some(*self);
        }
        if !self.line.is_coincident(&other.line) {
            return None;
        }
        // Non-degenerate self, so both projections are defined.
        let t0 = self.line.nearest_point_param(other.p0())?;
        let t1 = self.line.nearest_point_param(other.p1())?;
        let lo = t0.min(t1).max(0.0);
        let hi = t0.max(t1).min(1.0);
        if lo > hi {
            return None;
        }
        Some(Segment::new(self.line.at(lo), self.line.at(hi)))
    }

    /// The shortest segment joining a point of `self` to a point of `other`.
    ///
    /// Crossing or overlapping segments yield a zero-length connector.
    pub fn shortest_connector(&self, other: &Segment) -> Segment {
        if let Some((t, u)) = self.intersection_params(other) {
            return Segment::new(self.line.at(t), other.line.at(u));
        }
        if let Some(overlap) = self.collinear_overlap(other) {
            return Segment::new(overlap.p0(), overlap.p0());
        }
        let candidates = [
            Segment::new(self.p0(), other.nearest_point(self.p0())),
            Segment::new(self.p1(), other.nearest_point(self.p1())),
            Segment::new(self.nearest_point(other.p0()), other.p0()),
            Segment::new(self.nearest_point(other.p1()), other.p1()),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.dt2().total_cmp(&b.dt2()))
            .unwrap_or(candidates[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f64, y: f64) -> Vector {
        Vector::new(x, y)
    }

    #[test]
    fn test_nearest_point_clamps() {
        let s = Segment::new(v(0.0, 0.0), v(10.0, 0.0));
        assert_eq!(s.nearest_point(v(15.0, 5.0)), v(10.0, 0.0));
        assert_eq!(s.nearest_point(v(-3.0, -1.0)), v(0.0, 0.0));
        assert_eq!(s.nearest_point(v(4.0, 7.0)), v(4.0, 0.0));
        assert!((s.nearest_point_param(v(15.0, 5.0)) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_at_clamps() {
        let s = Segment::new(v(0.0, 0.0), v(2.0, 2.0));
        assert_eq!(s.at(2.0), v(2.0, 2.0));
        assert_eq!(s.at(-1.0), v(0.0, 0.0));
        assert_eq!(s.at(0.5), v(1.0, 1.0));
    }

    #[test]
    fn test_degenerate_segment_is_a_point() {
        let s = Segment::new(v(3.0, 3.0), v(3.0, 3.0));
        assert!(s.is_degenerate());
        assert_eq!(s.nearest_point_param(v(9.0, 1.0)), 0.0);
        assert_eq!(s.nearest_point(v(9.0, 1.0)), v(3.0, 3.0));
    }

    #[test]
    fn test_intersection_requires_both_params_in_range() {
        let a = Segment::new(v(0.0, 0.0), v(4.0, 4.0));
        let b = Segment::new(v(0.0, 4.0), v(4.0, 0.0));
        assert_eq!(a.intersection(&b), Some(v(2.0, 2.0)));

        let short = Segment::new(v(0.0, 4.0), v(1.0, 3.0));
        assert_eq!(a.intersection_params(&short), None);
    }

    #[test]
    fn test_collinear_overlap() {
        let a = Segment::new(v(0.0, 0.0), v(10.0, 0.0));
        let b = Segment::new(v(12.0, 0.0), v(4.0, 0.0));
        let overlap = a.collinear_overlap(&b).unwrap();
        assert_eq!(overlap, Segment::new(v(4.0, 0.0), v(10.0, 0.0)));

        let disjoint = Segment::new(v(11.0, 0.0), v(15.0, 0.0));
        assert_eq!(a.collinear_overlap(&disjoint), None);

        let parallel = Segment::new(v(0.0, 1.0), v(10.0, 1.0));
        assert_eq!(a.collinear_overlap(&parallel), None);
    }

    #[test]
    fn test_shortest_connector_crossing() {
        let a = Segment::new(v(0.0, 0.0), v(4.0, 4.0));
        let b = Segment::new(v(0.0, 4.0), v(4.0, 0.0));
        let c = a.shortest_connector(&b);
        assert!(c.is_degenerate());
        assert_eq!(c.p0(), v(2.0, 2.0));
    }

    #[test]
    fn test_shortest_connector_disjoint() {
        let a = Segment::new(v(0.0, 0.0), v(4.0, 0.0));
        let b = Segment::new(v(2.0, 3.0), v(6.0, 8.0));
        let c = a.shortest_connector(&b);
        assert_eq!(c, Segment::new(v(2.0, 0.0), v(2.0, 3.0)));
    }

    #[test]
    fn test_shortest_connector_collinear() {
        let a = Segment::new(v(0.0, 0.0), v(4.0, 0.0));
        let overlapping = Segment::new(v(2.0, 0.0), v(9.0, 0.0));
        let c = a.shortest_connector(&overlapping);
        assert!(c.is_degenerate());
        assert_eq!(c.p0(), v(2.0, 0.0));

        let apart = Segment::new(v(7.0, 0.0), v(9.0, 0.0));
        let c = a.shortest_connector(&apart);
        assert!((c.length() - 3.0).abs() < f64::EPSILON);
        assert_eq!(c, Segment::new(v(4.0, 0.0), v(7.0, 0.0)));
    }
}
