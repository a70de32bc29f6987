//! Arc Linearizer
//!
//! Breaks arcs into chords for moves the controller cannot take as arcs.

use crate::arcs::CircularMoveBuffer;
use torchpost_core::Point2;

/// Geometry service that turns an arc into line segment end points.
pub trait ArcLinearizer {
    /// Points after the arc start, ending on the arc end, with every chord
    /// staying within `tolerance` of the true arc.
    fn linearize(&self, arc: &CircularMoveBuffer, tolerance: f64) -> Vec<Point2>;
}

/// Uniform chords sized from the allowed chord error.
#[derive(Debug, Clone, Default)]
pub struct ChordalLinearizer {
    /// Upper bound on the number of chords per arc
    pub max_segments: Option<usize>,
}

impl ChordalLinearizer {
    pub fn new() -> Self {
        Self::default()
    }

    fn segment_count(&self, arc: &CircularMoveBuffer, tolerance: f64) -> usize {
        if arc.radius <= tolerance {
            return 1;
        }
        // chord sagitta r * (1 - cos(step / 2)) must stay within tolerance
        let step = 2.0 * (1.0 - tolerance / arc.radius).acos();
        let count = (arc.sweep / step).ceil().max(1.0) as usize;
        match self.max_segments {
            Some(max) => count.min(max.max(1)),
            None => count,
        }
    }
}

impl ArcLinearizer for ChordalLinearizer {
    fn linearize(&self, arc: &CircularMoveBuffer, tolerance: f64) -> Vec<Point2> {
        let count = self.segment_count(arc, tolerance);
        let start_angle = arc.start.angle_from(arc.center);
        let direction = if arc.clockwise { -1.0 } else { 1.0 };

        let mut points = Vec::with_capacity(count);
        for i in 1..count {
            let fraction = i as f64 / count as f64;
            let angle = start_angle + direction * arc.sweep * fraction;
            points.push(Point2::new(
                arc.center.x + arc.radius * angle.cos(),
                arc.center.y + arc.radius * angle.sin(),
            ));
        }
        let end = if arc.is_full_circle() { arc.start } else { arc.end };
        points.push(end);
        points
    }
}
