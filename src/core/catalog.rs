use crate::core::QuakeEvent;
use chrono::{DateTime, Utc};
use std::ops::Index;

/// Time-ordered, read-only collection of events for one session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<QuakeEvent>,
}

impl Catalog {
    /// Build a catalog, sorting events by time.
    ///
    /// The sort is stable: events sharing a timestamp keep their input order.
    pub fn from_events(mut events: Vec<QuakeEvent>) -> Self {
        events.sort_by_key(|ev| ev.time);
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&QuakeEvent> {
        self.events.get(index)
    }

    pub fn events(&self) -> &[QuakeEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, QuakeEvent> {
        self.events.iter()
    }

    /// Index of the first event at or after `time` (`len()` if none)
    pub fn first_at_or_after(&self, time: DateTime<Utc>) -> usize {
        self.events.partition_point(|ev| ev.time < time)
    }

    /// Index of the first event strictly after `time` (`len()` if none)
    pub fn first_after(&self, time: DateTime<Utc>) -> usize {
        self.events.partition_point(|ev| ev.time <= time)
    }

    /// Time of the earliest and latest event
    pub fn time_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        Some((self.events.first()?.time, self.events.last()?.time))
    }
}

impl Index<usize> for Catalog {
    type Output = QuakeEvent;

    fn index(&self, index: usize) -> &QuakeEvent {
        &self.events[index]
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a QuakeEvent;
    type IntoIter = std::slice::Iter<'a, QuakeEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(day: u32, place: &str) -> QuakeEvent {
        let time = Utc.with_ymd_and_hms(2000, 1, day, 0, 0, 0).unwrap();
        QuakeEvent::new(time, 0.0, 0.0, 10.0, 5.0, place, 1.0)
    }

    #[test]
    fn test_sorted_and_stable() {
        let catalog = Catalog::from_events(vec![
            event(5, "e"),
            event(2, "b1"),
            event(9, "i"),
            event(2, "b2"),
            event(1, "a"),
        ]);

        for pair in catalog.events().windows(2) {
            assert!(pair[0].time <= pair[1].time);
        }
        let places: Vec<&str> = catalog.iter().map(|ev| ev.place.as_str()).collect();
        assert_eq!(places, vec!["a", "b1", "b2", "e", "i"]);
    }

    #[test]
    fn test_search_bounds() {
        let catalog = Catalog::from_events(vec![event(1, "a"), event(3, "b"), event(3, "c"), event(7, "d")]);
        let day3 = Utc.with_ymd_and_hms(2000, 1, 3, 0, 0, 0).unwrap();
        let day8 = Utc.with_ymd_and_hms(2000, 1, 8, 0, 0, 0).unwrap();

        assert_eq!(catalog.first_at_or_after(day3), 1);
        assert_eq!(catalog.first_after(day3), 3);
        assert_eq!(catalog.first_at_or_after(day8), 4);
        assert_eq!(catalog[3].place, "d");
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.time_bounds(), None);
        assert_eq!(catalog.first_at_or_after(Utc::now()), 0);
    }
}
