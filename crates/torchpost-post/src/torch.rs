//! Torch power state.

use torchpost_core::MovementKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TorchState {
    On,
    #[default]
    Off,
}

/// Outcome of a power request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TorchTransition {
    /// The torch changed state; write the switching word
    Switched(TorchState),
    /// The torch was already in the requested state
    Unchanged(TorchState),
}

/// Idempotent torch on/off tracker; duplicate requests never reach the relay.
#[derive(Debug, Default)]
pub struct TorchPower {
    state: TorchState,
}

impl TorchPower {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, on: bool) -> TorchTransition {
        let wanted = if on { TorchState::On } else { TorchState::Off };
        if wanted == self.state {
            return TorchTransition::Unchanged(wanted);
        }
        self.state = wanted;
        TorchTransition::Switched(wanted)
    }

    /// Power request implied by a movement hint, if any.
    pub fn hint(kind: MovementKind) -> Option<bool> {
        match kind {
            MovementKind::Plunge => Some(true),
            MovementKind::Rapid => Some(false),
            _ => None,
        }
    }

    pub fn is_on(&self) -> bool {
        self.state == TorchState::On
    }

    /// Record an unconditional shutdown written by the program footer.
    pub fn force_off(&mut self) {
        self.state = TorchState::Off;
    }
}
