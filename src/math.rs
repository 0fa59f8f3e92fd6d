// Surface-local geometry shared by every module.

use serde::{Deserialize, Serialize};

/// A position or delta in surface coordinates. One shape serves both uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((other.x - self.x).powi(2) + (other.y - self.y).powi(2)).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

/// Client-space rectangle of the attached surface element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Maps a client-space point into surface-local space. Out-of-bounds and
/// negative results pass through unchanged; clipping is a rendering concern.
pub fn to_local(client: Point, bounds: &Bounds) -> Point {
    Point::new(client.x - bounds.x, client.y - bounds.y)
}

/// Clamps `value` into `[min, max]`.
pub fn within(value: f64, min: f64, max: f64) -> f64 {
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_bounds_origin() {
        let bounds = Bounds { x: 10.0, y: 20.0, width: 300.0, height: 150.0 };
        let p = to_local(Point::new(15.0, 26.0), &bounds);
        assert_eq!(p, Point::new(5.0, 6.0));
    }

    #[test]
    fn to_local_keeps_degenerate_coordinates() {
        let bounds = Bounds { x: 100.0, y: 100.0, width: 50.0, height: 50.0 };
        // Left/above the surface: negative local coordinates come back as-is.
        assert_eq!(to_local(Point::new(40.0, 60.0), &bounds), Point::new(-60.0, -40.0));
        // Far beyond the surface extent: no clipping either.
        assert_eq!(to_local(Point::new(900.0, 100.0), &bounds), Point::new(800.0, 0.0));
    }

    #[test]
    fn within_clamps_both_ends() {
        assert_eq!(within(-0.5, 0.0, 1.0), 0.0);
        assert_eq!(within(0.4, 0.0, 1.0), 0.4);
        assert_eq!(within(7.0, 0.0, 1.0), 1.0);
    }

    #[test]
    fn midpoint_and_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(0.0, 10.0);
        assert_eq!(a.midpoint(&b), Point::new(0.0, 5.0));
        assert_eq!(a.distance(&b), 10.0);
    }
}
