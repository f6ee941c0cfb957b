pub mod manager;
pub mod marker;

pub use manager::MarkerManager;
pub use marker::{LiveMarker, MarkerId};

use crate::core::interp::{inverse_lerp, lerp};
use serde::{Deserialize, Serialize};

/// What happens when a spawn would exceed the live-marker limit.
///
/// Only `Unbounded` matches the player's stock behaviour. The two limits
/// are opt-in extensions for long sessions at high speed; nothing enables
/// them unless the config names one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum MarkerCapacity {
    /// No limit
    #[default]
    Unbounded,
    /// Refuse new markers while `max` are live
    DropNewest { max: usize },
    /// Destroy the oldest live marker to make room
    EvictOldest { max: usize },
}

/// Marker appearance and lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Size multiplier applied to every marker
    pub base_scale: f64,
    /// Magnitudes mapped onto `scale_range`; values outside clamp
    pub magnitude_domain: (f64, f64),
    /// Size factor for the weakest and strongest magnitudes
    pub scale_range: (f64, f64),
    /// Size at the first animated frame
    pub start_scale: f64,
    /// Size when the animation ends
    pub end_scale: f64,
    /// Animation length in seconds of playing time
    pub life_time: f64,
    /// Hard removal deadline in real seconds, paused or not
    pub expiry_timeout: f64,
    pub capacity: MarkerCapacity,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            base_scale: 0.05,
            magnitude_domain: (2.0, 9.0),
            scale_range: (0.1, 1.0),
            start_scale: 0.05,
            end_scale: 1.0,
            life_time: 3.0,
            expiry_timeout: 5.0,
            capacity: MarkerCapacity::Unbounded,
        }
    }
}

impl MarkerConfig {
    /// Size factor for a magnitude
    pub fn magnitude_factor(&self, magnitude: f32) -> f64 {
        let (lo, hi) = self.magnitude_domain;
        let t = inverse_lerp(lo, hi, f64::from(magnitude));
        lerp(self.scale_range.0, self.scale_range.1, t)
    }

    /// Size of a marker on the frame it spawns, before its first tick
    pub fn spawn_size(&self, magnitude: f32) -> f64 {
        self.base_scale * self.magnitude_factor(magnitude)
    }

    /// Animation progress in `[0, 1]`
    pub fn progress(&self, anim_time: f64) -> f64 {
        if self.life_time <= 0.0 {
            return 1.0;
        }
        (anim_time / self.life_time).clamp(0.0, 1.0)
    }

    /// Animated size; replaces the spawn size from the first tick on
    pub fn size_at(&self, t: f64) -> f64 {
        lerp(self.start_scale, self.end_scale, t)
    }

    pub fn opacity_at(&self, t: f64) -> f64 {
        lerp(1.0, 0.0, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_magnitude_factor_clamps() {
        let config = MarkerConfig::default();
        assert_close(config.magnitude_factor(2.0), 0.1, 1e-12);
        assert_close(config.magnitude_factor(1.0), 0.1, 1e-12);
        assert_close(config.magnitude_factor(9.0), 1.0, 1e-12);
        assert_close(config.magnitude_factor(9.5), 1.0, 1e-12);
        assert_close(config.magnitude_factor(5.5), 0.55, 1e-12);
    }

    #[test]
    fn test_spawn_size() {
        let config = MarkerConfig::default();
        assert_close(config.spawn_size(9.0), 0.05, 1e-12);
        assert_close(config.spawn_size(0.0), 0.005, 1e-12);
    }

    #[test]
    fn test_animation_curves() {
        let config = MarkerConfig::default();
        assert_eq!(config.progress(1.5), 0.5);
        assert_eq!(config.progress(10.0), 1.0);
        assert_close(config.size_at(0.0), 0.05, 1e-12);
        assert_close(config.size_at(0.5), 0.525, 1e-12);
        assert_close(config.size_at(1.0), 1.0, 1e-12);
        assert_eq!(config.opacity_at(0.25), 0.75);
    }

    #[test]
    fn test_size_ignores_magnitude_once_animating() {
        let config = MarkerConfig::default();
        let t = config.progress(1.5);
        assert_close(config.size_at(t), 0.525, 1e-12);
        assert!(config.spawn_size(2.0) < config.size_at(t));
    }

    #[test]
    fn test_capacity_serde() {
        let json = serde_json::to_string(&MarkerCapacity::EvictOldest { max: 200 }).unwrap();
        assert_eq!(json, r#"{"policy":"evict_oldest","max":200}"#);

        let parsed: MarkerCapacity = serde_json::from_str(r#"{"policy":"unbounded"}"#).unwrap();
        assert_eq!(parsed, MarkerCapacity::Unbounded);
    }
}
