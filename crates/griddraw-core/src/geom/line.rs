//! Infinite line in parametric form.

use super::Vector;

/// The line `{p0 + t * dt : t in R}` through two points.
///
/// `dt` and `dt2` are computed once at construction. Equality is undirected,
/// so the line through `(a, b)` equals the line through `(b, a)`.
#[derive(Debug, Clone, Copy)]
pub struct Line {
    p0: Vector,
    p1: Vector,
    dt: Vector,
    dt2: f64,
}

impl Line {
    pub fn new(p0: Vector, p1: Vector) -> Self {
        let dt = p1 - p0;
        Self {
            p0,
            p1,
            dt,
            dt2: dt.norm_squared(),
        }
    }

    pub fn p0(&self) -> Vector {
        self.p0
    }

    pub fn p1(&self) -> Vector {
        self.p1
    }

    /// Direction vector `p1 - p0`.
    pub fn dt(&self) -> Vector {
        self.dt
    }

    /// Squared length of the direction vector.
    pub fn dt2(&self) -> f64 {
        self.dt2
    }

    /// True when both defining points coincide.
    pub fn is_degenerate(&self) -> bool {
        self.dt2 == 0.0
    }

    /// Evaluate the line at parameter `t`.
    pub fn at(&self, t: f64) -> Vector {
        self.p0 + self.dt * t
    }

    /// Parameter of the orthogonal projection of `p` onto the line.
    ///
    /// Returns `None` for a degenerate line, where the projection is undefined.
    pub fn nearest_point_param(&self, p: Vector) -> Option<f64> {
        if self.is_degenerate() {
            return None;
        }
        Some((p - self.p0).dot(self.dt) / self.dt2)
    }

    /// The point on the line closest to `p`. A degenerate line is its single point.
    pub fn nearest_point(&self, p: Vector) -> Vector {
        match self.nearest_point_param(p) {
            Some(t) => self.at(t),
            None => self.p0,
        }
    }

    /// Solve `self.at(t) == other.at(u)` for `(t, u)`.
    ///
    /// Parallel and coincident lines both yield `None`.
    pub fn intersection_params(&self, other: &Line) -> Option<(f64, f64)> {
        let det = self.dt.x * other.dt.y - other.dt.x * self.dt.y;
        if det == 0.0 {
            return None;
        }
        let d = other.p0 - self.p0;
        let t = (other.dt.y * d.x - other.dt.x * d.y) / det;
        let u = (self.dt.y * d.x - self.dt.x * d.y) / det;
        Some((t, u))
    }

    /// The intersection point, if the lines cross at a single point.
    pub fn intersection(&self, other: &Line) -> Option<Vector> {
        self.intersection_params(other).map(|(t, _)| self.at(t))
    }

    /// True when `other` lies on the same infinite line.
    pub fn is_coincident(&self, other: &Line) -> bool {
        self.dt.is_collinear(other.dt) && self.dt.is_collinear(other.p0 - self.p0)
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        (self.p0 == other.p0 && self.p1 == other.p1)
            || (self.p0 == other.p1 && self.p1 == other.p0)
    }
}
