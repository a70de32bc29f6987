//! Planar geometry helpers.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Sub;

/// A point in the machine XY plane, in program units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point2) -> f64 {
        (*self - other).length()
    }

    /// Length of the vector from the origin to this point.
    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle of the vector from `center` to this point, in radians.
    pub fn angle_from(&self, center: Point2) -> f64 {
        (self.y - center.y).atan2(self.x - center.x)
    }
}

impl Sub for Point2 {
    type Output = Point2;

    fn sub(self, rhs: Point2) -> Point2 {
        Point2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Angle swept when travelling around `center` from `start` to `end`.
///
/// Always positive, in `(0, 2π]`. Coincident start and end points are a full
/// turn, so a closed circle reports `2π` rather than zero.
pub fn sweep_angle(start: Point2, end: Point2, center: Point2, clockwise: bool) -> f64 {
    let a0 = start.angle_from(center);
    let a1 = end.angle_from(center);
    let mut delta = if clockwise { a0 - a1 } else { a1 - a0 };
    while delta <= 1e-12 {
        delta += 2.0 * PI;
    }
    while delta > 2.0 * PI {
        delta -= 2.0 * PI;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_distance() {
        let d = Point2::new(0.0, 0.0).distance(Point2::new(3.0, 4.0));
        assert_relative_eq!(d, 5.0);
    }

    #[test]
    fn test_quarter_turns() {
        let c = Point2::ORIGIN;
        let s = Point2::new(1.0, 0.0);
        let e = Point2::new(0.0, 1.0);
        assert_relative_eq!(sweep_angle(s, e, c, false), FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(sweep_angle(s, e, c, true), 3.0 * FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn test_closed_circle_is_full_turn() {
        let c = Point2::new(5.0, 5.0);
        let s = Point2::new(6.0, 5.0);
        assert_relative_eq!(sweep_angle(s, s, c, true), 2.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(sweep_angle(s, s, c, false), 2.0 * PI, epsilon = 1e-12);
    }
}
