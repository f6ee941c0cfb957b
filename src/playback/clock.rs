use crate::playback::{PlaybackState, SECONDS_PER_DAY};
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

/// Closed interval of reachable simulated time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a range; the bounds are swapped if given in reverse
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    pub fn clamp(&self, time: DateTime<Utc>) -> DateTime<Utc> {
        time.clamp(self.start, self.end)
    }

    fn span_seconds(&self) -> f64 {
        (self.end - self.start).num_seconds() as f64
    }
}

/// Simulation clock
///
/// Advances simulated time by `rate × elapsed` while playing and keeps it
/// inside the configured range. Reaching either end stalls the clock; it
/// does not change state.
#[derive(Debug, Clone)]
pub struct PlaybackClock {
    range: TimeRange,
    sim_time: DateTime<Utc>,
    rate: f64, // simulated seconds per real second, may be negative
    state: PlaybackState,
}

impl PlaybackClock {
    pub fn new(range: TimeRange, days_per_second: f64) -> Self {
        Self {
            range,
            sim_time: range.start,
            rate: days_per_second * SECONDS_PER_DAY,
            state: PlaybackState::Stopped,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn sim_time(&self) -> DateTime<Utc> {
        self.sim_time
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Whether ticks move the clock (and animate markers)
    pub fn is_advancing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Rate in simulated seconds per real second
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn days_per_second(&self) -> f64 {
        self.rate / SECONDS_PER_DAY
    }

    /// Set the rate; takes effect on the next advance
    pub fn set_days_per_second(&mut self, days_per_second: f64) {
        self.rate = days_per_second * SECONDS_PER_DAY;
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    /// Pause; does nothing while stopped
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Stopped {
            self.state = PlaybackState::Paused;
        }
    }

    /// Stop and rewind to the start of the range
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.sim_time = self.range.start;
    }

    /// Set simulated time, clamped to the range. State is unchanged.
    pub fn jump_to(&mut self, target: DateTime<Utc>) -> DateTime<Utc> {
        self.sim_time = self.range.clamp(target);
        self.sim_time
    }

    /// Advance by `elapsed_secs` of real time.
    ///
    /// Returns the new simulated time, or `None` when not playing.
    pub fn advance(&mut self, elapsed_secs: f64) -> Option<DateTime<Utc>> {
        if !self.is_advancing() {
            return None;
        }

        // Anything beyond one full span lands on a bound anyway
        let span = self.range.span_seconds() + 1.0;
        let offset = (self.rate * elapsed_secs).clamp(-span, span);
        let micros = (offset * 1_000_000.0).round() as i64;

        let next = self
            .sim_time
            .checked_add_signed(Duration::microseconds(micros))
            .unwrap_or(if micros < 0 { self.range.start } else { self.range.end });
        let clamped = self.range.clamp(next);

        if clamped != next {
            debug!("Simulated time pinned at {}", clamped);
        }

        self.sim_time = clamped;
        Some(clamped)
    }
}
