//! Playback-speed control: a `[0, 1]` slider on a logarithmic days/sec scale.
//!
//! The slider position is the single source of truth. Presets and typed-in
//! rates are first converted to a slider position, and the rate is then read
//! back through the forward mapping, so the two can never disagree.

use crate::core::interp::{inverse_lerp, lerp};
use serde::{Deserialize, Serialize};

/// One simulated hour per second
pub const MIN_DAYS_PER_SECOND: f64 = 1.0 / 24.0;
/// One simulated (tropical) year per second
pub const MAX_DAYS_PER_SECOND: f64 = 365.2422;

/// Bounds of the logarithmic rate scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimescaleConfig {
    pub min_days_per_second: f64,
    pub max_days_per_second: f64,
}

impl Default for TimescaleConfig {
    fn default() -> Self {
        Self {
            min_days_per_second: MIN_DAYS_PER_SECOND,
            max_days_per_second: MAX_DAYS_PER_SECOND,
        }
    }
}

impl TimescaleConfig {
    /// Rate for a slider position; `u` is clamped to `[0, 1]`
    pub fn rate_for(&self, u: f64) -> f64 {
        let u = if u.is_nan() { 0.0 } else { u };
        let log_days = lerp(self.min_days_per_second.log10(), self.max_days_per_second.log10(), u);
        10f64.powf(log_days)
    }

    /// Slider position for a rate; the rate is clamped to the scale first
    pub fn position_for(&self, days_per_second: f64) -> f64 {
        let days = if days_per_second.is_nan() {
            self.min_days_per_second
        } else {
            days_per_second.clamp(self.min_days_per_second, self.max_days_per_second)
        };
        inverse_lerp(
            self.min_days_per_second.log10(),
            self.max_days_per_second.log10(),
            days.log10(),
        )
    }
}

/// Named speed buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatePreset {
    HourPerSecond,
    DayPerSecond,
    MonthPerSecond,
    YearPerSecond,
}

impl RatePreset {
    pub const ALL: [RatePreset; 4] = [
        RatePreset::HourPerSecond,
        RatePreset::DayPerSecond,
        RatePreset::MonthPerSecond,
        RatePreset::YearPerSecond,
    ];

    pub fn days_per_second(self) -> f64 {
        match self {
            RatePreset::HourPerSecond => 1.0 / 24.0,
            RatePreset::DayPerSecond => 1.0,
            RatePreset::MonthPerSecond => 30.0,
            RatePreset::YearPerSecond => 365.2422,
        }
    }
}

/// Slider state plus the rate it currently selects
#[derive(Debug, Clone)]
pub struct TimescaleControl {
    scale: TimescaleConfig,
    position: f64,
}

impl TimescaleControl {
    /// Start at one day per second
    pub fn new(scale: TimescaleConfig) -> Self {
        let mut control = Self { scale, position: 0.0 };
        control.apply_preset(RatePreset::DayPerSecond);
        control
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn days_per_second(&self) -> f64 {
        self.scale.rate_for(self.position)
    }

    /// Move the slider; returns the selected rate
    pub fn apply_position(&mut self, u: f64) -> f64 {
        self.position = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        self.days_per_second()
    }

    /// Select a rate directly; out-of-scale rates land on the nearest bound
    pub fn apply_rate(&mut self, days_per_second: f64) -> f64 {
        let u = self.scale.position_for(days_per_second);
        self.apply_position(u)
    }

    pub fn apply_preset(&mut self, preset: RatePreset) -> f64 {
        self.apply_rate(preset.days_per_second())
    }

    pub fn label(&self) -> String {
        format_rate(self.days_per_second())
    }
}

/// Human-readable speed
pub fn format_rate(days_per_second: f64) -> String {
    format!("{:.2} days / sec", days_per_second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_end_points() {
        let scale = TimescaleConfig::default();
        assert_close(scale.rate_for(0.0), MIN_DAYS_PER_SECOND, 1e-12);
        assert_close(scale.rate_for(1.0), MAX_DAYS_PER_SECOND, 1e-9);
    }

    #[test]
    fn test_round_trip() {
        let scale = TimescaleConfig::default();
        for u in [0.0, 0.25, 0.5, 0.75, 1.0] {
            assert_close(scale.position_for(scale.rate_for(u)), u, 1e-12);
        }
    }

    #[test]
    fn test_out_of_range_clamps() {
        let scale = TimescaleConfig::default();
        assert_eq!(scale.position_for(0.0), 0.0);
        assert_eq!(scale.position_for(-5.0), 0.0);
        assert_eq!(scale.position_for(10_000.0), 1.0);
        assert_close(scale.rate_for(2.0), MAX_DAYS_PER_SECOND, 1e-9);
        assert_close(scale.rate_for(-1.0), MIN_DAYS_PER_SECOND, 1e-12);
    }

    #[test]
    fn test_presets_go_through_slider() {
        let mut control = TimescaleControl::new(TimescaleConfig::default());
        assert_close(control.days_per_second(), 1.0, 1e-9);

        for preset in RatePreset::ALL {
            let days = control.apply_preset(preset);
            assert_close(days, preset.days_per_second(), 1e-9);
            assert_close(control.days_per_second(), days, 0.0);
        }

        control.apply_preset(RatePreset::HourPerSecond);
        assert_close(control.position(), 0.0, 1e-12);
        control.apply_preset(RatePreset::YearPerSecond);
        assert_close(control.position(), 1.0, 1e-12);
    }

    #[test]
    fn test_label() {
        let mut control = TimescaleControl::new(TimescaleConfig::default());
        control.apply_preset(RatePreset::MonthPerSecond);
        assert_eq!(control.label(), "30.00 days / sec");
        assert_eq!(format_rate(1.0 / 24.0), "0.04 days / sec");
    }
}
