pub mod detail;
pub mod timescale;

pub use detail::{date_label, EventDetail};
pub use timescale::{format_rate, RatePreset, TimescaleConfig, TimescaleControl};
