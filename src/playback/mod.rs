pub mod clock;
pub mod cursor;
pub mod engine;

pub use clock::{PlaybackClock, TimeRange};
pub use cursor::EventCursor;
pub use engine::{PlaybackEngine, TickSummary};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 1983-01-01T00:00:00Z
const DEFAULT_MIN_DATE_SECS: i64 = 410_227_200;
/// 2024-12-31T23:59:59Z
const DEFAULT_MAX_DATE_SECS: i64 = 1_735_689_599;

/// Simulated seconds in one day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Earliest reachable simulated instant
    pub min_date: DateTime<Utc>,
    /// Latest reachable simulated instant
    pub max_date: DateTime<Utc>,
    /// Initial rate in simulated days per real second
    pub days_per_second: f64,
    /// Start playing as soon as a non-empty catalog is loaded
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_date: DateTime::from_timestamp(DEFAULT_MIN_DATE_SECS, 0).unwrap_or_default(),
            max_date: DateTime::from_timestamp(DEFAULT_MAX_DATE_SECS, 0).unwrap_or_default(),
            days_per_second: 1.0,
            autoplay: true,
        }
    }
}

impl PlaybackConfig {
    pub fn range(&self) -> TimeRange {
        TimeRange::new(self.min_date, self.max_date)
    }
}
