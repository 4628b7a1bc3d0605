//! Conversion between grid space and surface space.
//!
//! Grid points sit `spacing` pixels apart with a fixed padding of half a
//! spacing around the surface edges, so grid `(0, 0)` lands on surface
//! `(pad, pad)`.

use crate::geom::{Rectangle, Vector};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Default distance between grid points, in surface pixels.
pub const GRID_SPACING: f64 = 10.0;

/// Stateless mapper parameterized by grid spacing and padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMapper {
    spacing: f64,
    pad: f64,
}

impl Default for GridMapper {
    fn default() -> Self {
        Self::new(GRID_SPACING)
    }
}

impl GridMapper {
    /// Create a mapper; the padding is half the spacing, rounded down.
    pub fn new(spacing: f64) -> Self {
        Self {
            spacing,
            pad: (spacing / 2.0).floor(),
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn pad(&self) -> f64 {
        self.pad
    }

    /// Grid coordinate of the cell edge at or before `coord`.
    pub fn surface_to_grid_floor(&self, coord: f64) -> f64 {
        self.surface_to_grid_float(coord).floor()
    }

    /// Nearest grid coordinate; exact halves round to even.
    pub fn surface_to_grid_round(&self, coord: f64) -> f64 {
        self.surface_to_grid_float(coord).round_ties_even()
    }

    /// Unrounded grid coordinate.
    pub fn surface_to_grid_float(&self, coord: f64) -> f64 {
        (coord - self.pad) / self.spacing
    }

    pub fn grid_to_surface(&self, coord: f64) -> f64 {
        coord * self.spacing + self.pad
    }

    /// Convert a grid-space distance to surface pixels.
    pub fn grid_to_surface_delta(&self, delta: f64) -> f64 {
        delta * self.spacing
    }

    /// Convert a surface-pixel distance to grid units.
    pub fn surface_to_grid_delta(&self, delta: f64) -> f64 {
        delta / self.spacing
    }

    /// Round a surface extent down to a multiple of the spacing.
    pub fn surface_floor(&self, coord: f64) -> f64 {
        coord - coord.rem_euclid(self.spacing)
    }

    pub fn surface_point_to_grid_floor(&self, p: Point) -> Vector {
        Vector::new(self.surface_to_grid_floor(p.x), self.surface_to_grid_floor(p.y))
    }

    pub fn surface_point_to_grid_round(&self, p: Point) -> Vector {
        Vector::new(self.surface_to_grid_round(p.x), self.surface_to_grid_round(p.y))
    }

    pub fn surface_point_to_grid_float(&self, p: Point) -> Vector {
        Vector::new(self.surface_to_grid_float(p.x), self.surface_to_grid_float(p.y))
    }

    pub fn grid_to_surface_point(&self, v: Vector) -> Point {
        Point::new(self.grid_to_surface(v.x), self.grid_to_surface(v.y))
    }

    pub fn grid_to_surface_vec(&self, dv: Vector) -> Vec2 {
        Vec2::new(self.grid_to_surface_delta(dv.x), self.grid_to_surface_delta(dv.y))
    }

    pub fn surface_to_grid_vec(&self, dv: Vec2) -> Vector {
        Vector::new(self.surface_to_grid_delta(dv.x), self.surface_to_grid_delta(dv.y))
    }

    /// Largest grid point that fits on a surface of the given pixel size.
    pub fn grid_extent(&self, width: f64, height: f64) -> Vector {
        Vector::new(
            self.surface_to_grid_floor(width - 1.0),
            self.surface_to_grid_floor(height - 1.0),
        )
    }

    /// Surface-space bounds of a grid rectangle.
    pub fn grid_rect_to_surface(&self, rect: &Rectangle) -> Rect {
        let nw = self.grid_to_surface_point(rect.nw());
        let se = self.grid_to_surface_point(rect.se());
        Rect::new(nw.x, nw.y, se.x, se.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_padding() {
        let m = GridMapper::default();
        assert!((m.spacing() - 10.0).abs() < f64::EPSILON);
        assert!((m.pad() - 5.0).abs() < f64::EPSILON);
        assert!((GridMapper::new(7.0).pad() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_floor_and_round() {
        let m = GridMapper::default();
        assert_eq!(m.surface_to_grid_floor(5.0), 0.0);
        assert_eq!(m.surface_to_grid_floor(14.9), 0.0);
        assert_eq!(m.surface_to_grid_floor(15.0), 1.0);
        assert_eq!(m.surface_to_grid_floor(0.0), -1.0);
        assert_eq!(m.surface_to_grid_round(14.0), 1.0);
        assert_eq!(m.surface_to_grid_round(9.0), 0.0);
        // Exact halves round to even.
        assert_eq!(m.surface_to_grid_round(10.0), 0.0);
        assert_eq!(m.surface_to_grid_round(20.0), 2.0);
    }

    #[test]
    fn test_grid_to_surface_round_trip() {
        let m = GridMapper::default();
        for g in [0.0, 1.0, 7.0, 42.0] {
            let s = m.grid_to_surface(g);
            assert_eq!(m.surface_to_grid_floor(s), g);
            assert_eq!(m.surface_to_grid_round(s), g);
        }
        assert_eq!(m.grid_to_surface_point(Vector::new(2.0, 3.0)), Point::new(25.0, 35.0));
    }

    #[test]
    fn test_deltas_skip_padding() {
        let m = GridMapper::default();
        assert_eq!(m.grid_to_surface_delta(3.0), 30.0);
        assert_eq!(m.surface_to_grid_delta(25.0), 2.5);
        assert_eq!(m.grid_to_surface_vec(Vector::new(1.0, -2.0)), Vec2::new(10.0, -20.0));
        assert_eq!(m.surface_to_grid_vec(Vec2::new(10.0, -20.0)), Vector::new(1.0, -2.0));
    }

    #[test]
    fn test_float_conversion() {
        let m = GridMapper::default();
        let v = m.surface_point_to_grid_float(Point::new(17.0, 5.0));
        assert!((v.x - 1.2).abs() < 1e-12);
        assert_eq!(v.y, 0.0);
    }

    #[test]
    fn test_surface_floor_and_extent() {
        let m = GridMapper::default();
        assert_eq!(m.surface_floor(1287.0), 1280.0);
        assert_eq!(m.surface_floor(40.0), 40.0);
        assert_eq!(m.grid_extent(800.0, 600.0), Vector::new(79.0, 59.0));
    }

    #[test]
    fn test_grid_rect_to_surface() {
        let m = GridMapper::default();
        let r = Rectangle::new(Vector::new(3.0, 1.0), Vector::new(1.0, 2.0));
        assert_eq!(m.grid_rect_to_surface(&r), Rect::new(15.0, 15.0, 35.0, 25.0));
    }
}
