//! Block sequence numbers (N words).

use torchpost_settings::SEQUENCE_CEILING;

/// Monotonic line identifier that wraps back to its start past the ceiling.
#[derive(Debug, Clone)]
pub struct SequenceNumberer {
    current: u32,
    start: u32,
    increment: u32,
    ceiling: u32,
}

impl SequenceNumberer {
    pub fn new(start: u32, increment: u32) -> Self {
        Self::with_ceiling(start, increment, SEQUENCE_CEILING)
    }

    pub fn with_ceiling(start: u32, increment: u32, ceiling: u32) -> Self {
        Self {
            current: start,
            start,
            increment,
            ceiling,
        }
    }

    /// Number for the next block.
    pub fn next(&mut self) -> u32 {
        let value = self.current;
        let following = u64::from(self.current) + u64::from(self.increment);
        self.current = if following > u64::from(self.ceiling) {
            self.start
        } else {
            following as u32
        };
        value
    }

    pub fn peek(&self) -> u32 {
        self.current
    }
}
