//! Time-scrubbable playback of a historical earthquake catalog over a globe.
//!
//! The catalog is loaded once from CSV ([`input`]), played back by a
//! simulation clock that dispatches each event as it is passed
//! ([`playback`]) and shown as short-lived animated markers
//! ([`markers`]). Rendering, date display and the detail popup are
//! collaborators behind the traits in [`view`].

pub mod config;
pub mod core;
pub mod input;
pub mod markers;
pub mod playback;
pub mod ui;
pub mod view;

pub use crate::config::PlayerConfig;
pub use crate::core::{Catalog, GlobeFrame, QuakeEvent};
pub use crate::input::CatalogError;
pub use crate::playback::{PlaybackEngine, PlaybackState};
