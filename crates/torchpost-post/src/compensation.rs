//! Deferred cutter compensation.
//!
//! Turning compensation off takes effect immediately. Turning it on is held
//! back until the next linear move, which carries the activation word. A
//! pending request is illegal at a rapid or circular move.

use torchpost_core::CompensationSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationState {
    #[default]
    Off,
    PendingLeft,
    PendingRight,
}

#[derive(Debug, Default)]
pub struct CutterCompensation {
    state: CompensationState,
    active: Option<CompensationSide>,
}

impl CutterCompensation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a request. Returns `true` when the deactivation must be written now.
    pub fn request(&mut self, side: CompensationSide) -> bool {
        match side {
            CompensationSide::Off => {
                self.state = CompensationState::Off;
                self.active = None;
                true
            }
            CompensationSide::Left => {
                self.state = CompensationState::PendingLeft;
                false
            }
            CompensationSide::Right => {
                self.state = CompensationState::PendingRight;
                false
            }
        }
    }

    /// Consume the pending activation for the linear move being written.
    pub fn take_pending(&mut self) -> Option<CompensationSide> {
        let side = match self.state {
            CompensationState::Off => return None,
            CompensationState::PendingLeft => CompensationSide::Left,
            CompensationState::PendingRight => CompensationSide::Right,
        };
        self.state = CompensationState::Off;
        self.active = Some(side);
        Some(side)
    }

    pub fn is_pending(&self) -> bool {
        self.state != CompensationState::Off
    }

    pub fn state(&self) -> CompensationState {
        self.state
    }

    /// Side currently applied on the controller, if any.
    pub fn active(&self) -> Option<CompensationSide> {
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_is_deferred() {
        let mut comp = CutterCompensation::new();
        assert!(!comp.request(CompensationSide::Left));
        assert_eq!(comp.state(), CompensationState::PendingLeft);
        assert!(comp.is_pending());
        assert_eq!(comp.active(), None);

        assert_eq!(comp.take_pending(), Some(CompensationSide::Left));
        assert!(!comp.is_pending());
        assert_eq!(comp.active(), Some(CompensationSide::Left));
        assert_eq!(comp.take_pending(), None);
    }

    #[test]
    fn test_off_is_immediate() {
        let mut comp = CutterCompensation::new();
        comp.request(CompensationSide::Right);
        comp.take_pending();
        assert!(comp.request(CompensationSide::Off));
        assert_eq!(comp.state(), CompensationState::Off);
        assert_eq!(comp.active(), None);
    }

    #[test]
    fn test_later_request_replaces_pending() {
        let mut comp = CutterCompensation::new();
        comp.request(CompensationSide::Left);
        comp.request(CompensationSide::Right);
        assert_eq!(comp.take_pending(), Some(CompensationSide::Right));
    }

    #[test]
    fn test_off_cancels_pending() {
        let mut comp = CutterCompensation::new();
        comp.request(CompensationSide::Left);
        comp.request(CompensationSide::Off);
        assert!(!comp.is_pending());
        assert_eq!(comp.take_pending(), None);
    }
}
