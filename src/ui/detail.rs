use crate::core::QuakeEvent;
use chrono::{DateTime, Utc};

/// Text shown in the event detail popup
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetail {
    pub title: String,
    pub body: String,
}

impl EventDetail {
    pub fn from_event(ev: &QuakeEvent) -> Self {
        let body = format!(
            "Time (UTC): {}\nMagnitude: {:.1}\nDepth: {:.1} km\nLat: {:.3}, Lon: {:.3}",
            ev.time.format("%Y-%m-%d %H:%M:%S"),
            ev.magnitude,
            ev.depth_km,
            ev.latitude,
            ev.longitude,
        );
        Self {
            title: ev.place.clone(),
            body,
        }
    }
}

/// Label for the simulated-date readout
pub fn date_label(time: DateTime<Utc>) -> String {
    time.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_detail_text() {
        let time = Utc.with_ymd_and_hms(1995, 1, 17, 20, 46, 52).unwrap();
        let ev = QuakeEvent::new(time, 34.583, 135.018, 16.0, 6.9, "Kobe", 1.0);
        let detail = EventDetail::from_event(&ev);

        assert_eq!(detail.title, "Kobe");
        assert_eq!(
            detail.body,
            "Time (UTC): 1995-01-17 20:46:52\nMagnitude: 6.9\nDepth: 16.0 km\nLat: 34.583, Lon: 135.018"
        );
    }

    #[test]
    fn test_date_label() {
        let time = Utc.with_ymd_and_hms(2011, 3, 11, 5, 46, 24).unwrap();
        assert_eq!(date_label(time), "2011-03-11");
    }
}
