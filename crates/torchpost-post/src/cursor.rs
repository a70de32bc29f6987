//! Forward cursor over the event stream with one event of lookahead.

use std::iter::Peekable;
use torchpost_core::ToolpathEvent;

pub struct EventCursor<I: Iterator<Item = ToolpathEvent>> {
    events: Peekable<I>,
    index: usize,
}

/// What the cursor saw after the current event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lookahead {
    pub next_is_circular: bool,
    pub next_is_motion: bool,
}

impl<I: Iterator<Item = ToolpathEvent>> EventCursor<I> {
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter().peekable(),
            index: 0,
        }
    }

    /// Next event, its stream index, and a view of the event after it.
    pub fn advance(&mut self) -> Option<(usize, ToolpathEvent, Lookahead)> {
        let event = self.events.next()?;
        let index = self.index;
        self.index += 1;
        let lookahead = match self.events.peek() {
            Some(next) => Lookahead {
                next_is_circular: next.is_circular(),
                next_is_motion: next.is_motion(),
            },
            None => Lookahead::default(),
        };
        Some((index, event, lookahead))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use torchpost_core::Point2;

    #[test]
    fn test_lookahead() {
        let events = vec![
            ToolpathEvent::rapid(0.0, 0.0),
            ToolpathEvent::arc(true, Point2::ORIGIN, Point2::new(1.0, 0.0), 10.0),
            ToolpathEvent::SectionEnd,
        ];
        let mut cursor = EventCursor::new(events);

        let (i, _, look) = cursor.advance().unwrap();
        assert_eq!(i, 0);
        assert!(look.next_is_circular);
        assert!(look.next_is_motion);

        let (i, event, look) = cursor.advance().unwrap();
        assert_eq!(i, 1);
        assert!(event.is_circular());
        assert!(!look.next_is_circular);
        assert!(!look.next_is_motion);

        let (_, _, look) = cursor.advance().unwrap();
        assert_eq!(look, Lookahead::default());
        assert!(cursor.advance().is_none());
    }
}
