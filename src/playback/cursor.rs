use crate::core::Catalog;
use chrono::{DateTime, Utc};
use std::ops::Range;

/// Position of the next undispatched event in a sorted catalog
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCursor {
    position: usize,
}

impl EventCursor {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self, catalog: &Catalog) -> bool {
        self.position >= catalog.len()
    }

    /// Move past every event at or before `time`.
    ///
    /// Returns the indices passed over, in time order. Each index is
    /// returned at most once however far `time` jumps in one call.
    pub fn advance_to(&mut self, catalog: &Catalog, time: DateTime<Utc>) -> Range<usize> {
        let start = self.position;
        while self.position < catalog.len() && catalog[self.position].time <= time {
            self.position += 1;
        }
        start..self.position
    }

    /// Re-seat on the first event at or after `time`, dispatching nothing
    pub fn seek(&mut self, catalog: &Catalog, time: DateTime<Utc>) {
        self.position = catalog.first_at_or_after(time);
    }

    /// Pull the cursor back when time runs backwards so events after
    /// `time` are dispatched again on the way forward
    pub fn rewind_to(&mut self, catalog: &Catalog, time: DateTime<Utc>) {
        self.position = self.position.min(catalog.first_after(time));
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::QuakeEvent;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2000, 1, d, 0, 0, 0).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_events(
            [1, 2, 2, 5, 9]
                .iter()
                .map(|&d| QuakeEvent::new(day(d), 0.0, 0.0, 1.0, 4.0, format!("day {d}"), 1.0))
                .collect(),
        )
    }

    #[test]
    fn test_advance_includes_equal_times() {
        let catalog = catalog();
        let mut cursor = EventCursor::default();

        assert_eq!(cursor.advance_to(&catalog, day(2)), 0..3);
        assert_eq!(cursor.advance_to(&catalog, day(2)), 3..3);
        assert_eq!(cursor.advance_to(&catalog, day(31)), 3..5);
        assert!(cursor.is_exhausted(&catalog));
    }

    #[test]
    fn test_seek_lands_on_first_at_or_after() {
        let catalog = catalog();
        let mut cursor = EventCursor::default();

        cursor.seek(&catalog, day(2));
        assert_eq!(cursor.position(), 1);

        cursor.seek(&catalog, day(3));
        assert_eq!(cursor.position(), 3);

        cursor.reset();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_rewind_never_moves_forward() {
        let catalog = catalog();
        let mut cursor = EventCursor::default();

        cursor.advance_to(&catalog, day(6));
        cursor.rewind_to(&catalog, day(2));
        assert_eq!(cursor.position(), 3);

        cursor.rewind_to(&catalog, day(20));
        assert_eq!(cursor.position(), 3);
    }
}
