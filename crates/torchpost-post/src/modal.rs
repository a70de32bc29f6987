//! Modal word suppression.
//!
//! The controller keeps the last value of each modal group, so a word is
//! only written when it changes or a group has been forced.

/// Tracks the last word written for each modal group so redundant words can be omitted.
///
/// `emit_word` hands the word back (and caches it) only when it differs from the
/// cached word or the group has been forced; otherwise it returns `None` and the
/// caller leaves the word out of the block. Comparison is on the formatted text,
/// so values that render identically are identical.
#[derive(Debug, Default)]
pub struct ModalWordTracker {
    slots: [Slot; ModalGroup::COUNT],
}

/// Machine modes and words whose value persists on the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalGroup {
    Motion,
    Plane,
    Distance,
    Units,
    Compensation,
    PathBlend,
    WorkOffset,
    X,
    Y,
    Feed,
}

impl ModalGroup {
    pub const COUNT: usize = 10;

    pub const ALL: [ModalGroup; Self::COUNT] = [
        ModalGroup::Motion,
        ModalGroup::Plane,
        ModalGroup::Distance,
        ModalGroup::Units,
        ModalGroup::Compensation,
        ModalGroup::PathBlend,
        ModalGroup::WorkOffset,
        ModalGroup::X,
        ModalGroup::Y,
        ModalGroup::Feed,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    force: bool,
}

impl ModalWordTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the word if it must be written, updating the cache.
    pub fn emit_word(&mut self, group: ModalGroup, word: impl Into<String>) -> Option<String> {
        let word = word.into();
        let slot = &mut self.slots[group.index()];
        if !slot.force && slot.value.as_deref() == Some(word.as_str()) {
            tracing::trace!(?group, %word, "suppressed modal word");
            return None;
        }
        slot.value = Some(word.clone());
        slot.force = false;

        // arc interpretation depends on the plane, so the motion mode follows it
        if group == ModalGroup::Plane {
            self.reset_group(ModalGroup::Motion);
        }
        Some(word)
    }

    /// Forget the cached word; the next `emit_word` for the group always fires.
    pub fn reset_group(&mut self, group: ModalGroup) {
        self.slots[group.index()].value = None;
    }

    /// Keep the cached word but write the group once more on its next use.
    pub fn force(&mut self, group: ModalGroup) {
        self.slots[group.index()].force = true;
    }

    /// Clears all modal state.
    pub fn reset_all(&mut self) {
        for group in ModalGroup::ALL {
            self.reset_group(group);
        }
    }

    pub fn cached(&self, group: ModalGroup) -> Option<&str> {
        self.slots[group.index()].value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_first_time() {
        let mut tracker = ModalWordTracker::new();
        assert_eq!(tracker.emit_word(ModalGroup::Motion, "G01").as_deref(), Some("G01"));
        assert_eq!(tracker.cached(ModalGroup::Motion), Some("G01"));
    }

    #[test]
    fn suppressed_on_repeat() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::Feed, "F100.");
        assert_eq!(tracker.emit_word(ModalGroup::Feed, "F100."), None);
    }

    #[test]
    fn re_emits_after_change() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::Motion, "G01");
        assert!(tracker.emit_word(ModalGroup::Motion, "G00").is_some());
    }

    #[test]
    fn reset_group_forces_same_value() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::X, "X1.");
        tracker.reset_group(ModalGroup::X);
        assert_eq!(tracker.cached(ModalGroup::X), None);
        assert_eq!(tracker.emit_word(ModalGroup::X, "X1.").as_deref(), Some("X1."));
        assert_eq!(tracker.emit_word(ModalGroup::X, "X1."), None);
    }

    #[test]
    fn force_flag_fires_once() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::Compensation, "G40");
        tracker.force(ModalGroup::Compensation);
        assert_eq!(tracker.cached(ModalGroup::Compensation), Some("G40"));
        assert!(tracker.emit_word(ModalGroup::Compensation, "G40").is_some());
        assert!(tracker.emit_word(ModalGroup::Compensation, "G40").is_none());
    }

    #[test]
    fn plane_change_forces_motion() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::Plane, "G17");
        tracker.emit_word(ModalGroup::Motion, "G02");
        assert!(tracker.emit_word(ModalGroup::Motion, "G02").is_none());

        tracker.emit_word(ModalGroup::Plane, "G18");
        assert!(tracker.emit_word(ModalGroup::Motion, "G02").is_some());
    }

    #[test]
    fn unchanged_plane_keeps_motion() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::Plane, "G17");
        tracker.emit_word(ModalGroup::Motion, "G01");
        assert!(tracker.emit_word(ModalGroup::Plane, "G17").is_none());
        assert!(tracker.emit_word(ModalGroup::Motion, "G01").is_none());
    }

    #[test]
    fn groups_are_independent() {
        let mut tracker = ModalWordTracker::new();
        tracker.emit_word(ModalGroup::X, "X1.");
        assert!(tracker.emit_word(ModalGroup::Y, "X1.").is_some());
    }

    #[test]
    fn reset_all_clears_every_group() {
        let mut tracker = ModalWordTracker::new();
        for group in ModalGroup::ALL {
            tracker.emit_word(group, "W1");
        }
        tracker.reset_all();
        for group in ModalGroup::ALL {
            assert!(tracker.emit_word(group, "W1").is_some(), "{:?}", group);
        }
    }
}
