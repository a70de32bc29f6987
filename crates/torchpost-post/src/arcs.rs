//! Circular move aggregation
//!
//! Consecutive arcs around the same center are merged into a single move,
//! so a circle the planner split into pieces is cut as one closed circle.
//! The aggregator sees one event of lookahead: it only holds an arc back
//! while the next event is circular too, so nothing stays buffered once a
//! non-circular event arrives.

use std::f64::consts::PI;
use torchpost_core::geometry::sweep_angle;
use torchpost_core::{Plane, Point2};

/// Sweep shortfall below a full turn still treated as a closed circle.
pub const FULL_CIRCLE_EPSILON: f64 = 1e-4;

/// A circular move with its start point resolved from the current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub start: Point2,
    pub end: Point2,
    pub center: Point2,
    pub clockwise: bool,
    pub feed: f64,
    pub plane: Plane,
}

/// One or more merged arcs waiting to be written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularMoveBuffer {
    pub center: Point2,
    pub start: Point2,
    pub end: Point2,
    pub clockwise: bool,
    pub radius: f64,
    /// Accumulated swept angle, radians
    pub sweep: f64,
    pub feed: f64,
    pub plane: Plane,
}

impl CircularMoveBuffer {
    pub fn from_segment(segment: &ArcSegment) -> Self {
        Self {
            center: segment.center,
            start: segment.start,
            end: segment.end,
            clockwise: segment.clockwise,
            radius: segment.start.distance(segment.center),
            sweep: sweep_angle(segment.start, segment.end, segment.center, segment.clockwise),
            feed: segment.feed,
            plane: segment.plane,
        }
    }

    pub fn is_full_circle(&self) -> bool {
        self.sweep >= 2.0 * PI - FULL_CIRCLE_EPSILON
    }

    /// Center offset from the start point, as the controller expects it.
    pub fn center_offset(&self) -> Point2 {
        self.center - self.start
    }

    fn accepts(&self, segment: &ArcSegment, sweep: f64, tolerance: f64) -> bool {
        self.center.distance(segment.center) <= tolerance
            && self.clockwise == segment.clockwise
            && self.plane == segment.plane
            && (self.feed - segment.feed).abs() <= f64::EPSILON * self.feed.abs().max(1.0)
            && self.sweep + sweep <= 2.0 * PI + FULL_CIRCLE_EPSILON
    }
}

#[derive(Debug)]
pub struct CircularMoveAggregator {
    merge: bool,
    tolerance: f64,
    buffer: Option<CircularMoveBuffer>,
}

impl CircularMoveAggregator {
    /// `tolerance` is the maximum center distance for merging, in program units.
    pub fn new(merge: bool, tolerance: f64) -> Self {
        Self {
            merge,
            tolerance,
            buffer: None,
        }
    }

    /// Feed one arc. Returns the buffers that are complete, in output order.
    pub fn push(
        &mut self,
        segment: ArcSegment,
        next_is_circular: bool,
    ) -> Vec<CircularMoveBuffer> {
        let mut flushed = Vec::new();
        let sweep = sweep_angle(segment.start, segment.end, segment.center, segment.clockwise);

        if let Some(buffer) = self.buffer.as_mut() {
            if buffer.accepts(&segment, sweep, self.tolerance) {
                buffer.sweep += sweep;
                buffer.end = segment.end;
                tracing::trace!(sweep = buffer.sweep, "merged arc into open buffer");
                if buffer.is_full_circle() || !next_is_circular {
                    flushed.extend(self.buffer.take());
                }
                return flushed;
            }
            flushed.extend(self.buffer.take());
        }

        let buffer = CircularMoveBuffer::from_segment(&segment);
        if self.merge && next_is_circular {
            self.buffer = Some(buffer);
        } else {
            flushed.push(buffer);
        }
        flushed
    }

    /// Flush whatever is still open.
    pub fn finish(&mut self) -> Option<CircularMoveBuffer> {
        self.buffer.take()
    }

    pub fn is_open(&self) -> bool {
        self.buffer.is_some()
    }
}
