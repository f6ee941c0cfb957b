use crate::core::geo;
use chrono::{DateTime, Utc};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// One catalog entry: a located, timestamped earthquake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuakeEvent {
    /// Origin time in UTC
    pub time: DateTime<Utc>,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Hypocenter depth in kilometers
    pub depth_km: f32,

    /// Magnitude as reported; not clamped
    pub magnitude: f32,

    /// Free-text location label
    pub place: String,

    /// Position on the globe in its local frame, projected once at load
    pub local_position: Point3<f64>,
}

impl QuakeEvent {
    /// Create an event, projecting its coordinates onto a globe of `globe_radius`
    pub fn new(
        time: DateTime<Utc>,
        latitude: f64,
        longitude: f64,
        depth_km: f32,
        magnitude: f32,
        place: impl Into<String>,
        globe_radius: f64,
    ) -> Self {
        Self {
            time,
            latitude,
            longitude,
            depth_km,
            magnitude,
            place: place.into(),
            local_position: geo::project(latitude, longitude, globe_radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_caches_projection() {
        let time = Utc.with_ymd_and_hms(1995, 1, 17, 20, 46, 0).unwrap();
        let ev = QuakeEvent::new(time, 34.6, 135.0, 16.0, 6.9, "Kobe", 2.0);

        assert_eq!(ev.local_position, geo::project(34.6, 135.0, 2.0));
        assert_eq!(ev.place, "Kobe");
        assert_eq!(ev.latitude, 34.6);
    }
}
