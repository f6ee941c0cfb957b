use crate::core::{is_on_near_hemisphere, Catalog, GlobeFrame, QuakeEvent};
use crate::markers::{MarkerConfig, MarkerId, MarkerManager};
use crate::playback::{EventCursor, PlaybackClock, PlaybackConfig, PlaybackState};
use crate::view::{DateDisplay, DetailPopup, MarkerRenderer};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use nalgebra::Point3;
use std::ops::Range;
use std::time::Duration as StdDuration;
use tracing::{debug, info};

/// What one tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// Catalog indices dispatched this tick, in time order
    pub dispatched: Range<usize>,
    /// Markers removed this tick
    pub expired: usize,
}

/// Playback engine for an earthquake catalog
///
/// Drives the simulation clock, dispatches each event once as the clock
/// passes it and hands dispatched events to the marker manager. Everything
/// happens inside [`tick`](Self::tick) or the transport calls; nothing runs
/// in the background.
pub struct PlaybackEngine {
    catalog: Catalog,
    clock: PlaybackClock,
    cursor: EventCursor,
    markers: MarkerManager,
    date_display: Option<Box<dyn DateDisplay>>,
    popup: Option<Box<dyn DetailPopup>>,
}

impl PlaybackEngine {
    pub fn new(catalog: Catalog, playback: &PlaybackConfig, markers: MarkerConfig) -> Self {
        Self {
            catalog,
            clock: PlaybackClock::new(playback.range(), playback.days_per_second),
            cursor: EventCursor::default(),
            markers: MarkerManager::new(markers),
            date_display: None,
            popup: None,
        }
    }

    pub fn attach_renderer(&mut self, renderer: Box<dyn MarkerRenderer>) {
        self.markers.attach_renderer(renderer);
    }

    pub fn attach_date_display(&mut self, display: Box<dyn DateDisplay>) {
        self.date_display = Some(display);
        self.publish_date();
    }

    pub fn attach_popup(&mut self, popup: Box<dyn DetailPopup>) {
        self.popup = Some(popup);
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn markers(&self) -> &MarkerManager {
        &self.markers
    }

    /// Get current playback state
    pub fn state(&self) -> PlaybackState {
        self.clock.state()
    }

    /// Check if currently playing
    pub fn is_playing(&self) -> bool {
        self.clock.is_advancing()
    }

    /// Current simulated time
    pub fn sim_time(&self) -> DateTime<Utc> {
        self.clock.sim_time()
    }

    /// Clock pinned at the end of the range with no markers left on screen
    pub fn is_finished(&self) -> bool {
        self.clock.sim_time() >= self.clock.range().end && self.markers.is_empty()
    }

    /// Index of the next event to dispatch
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    /// Playback speed in simulated days per real second
    pub fn rate(&self) -> f64 {
        self.clock.days_per_second()
    }

    /// Set playback speed; applies from the next tick
    pub fn set_rate(&mut self, days_per_second: f64) {
        self.clock.set_days_per_second(days_per_second);
        debug!("Rate set to {} days/sec", days_per_second);
    }

    /// Start/resume playback
    pub fn play(&mut self) {
        if self.clock.state() != PlaybackState::Playing {
            info!("Playing from {}", self.clock.sim_time());
        }
        self.clock.play();
    }

    /// Pause playback; ignored while stopped
    pub fn pause(&mut self) {
        self.clock.pause();
    }

    /// Stop playback and reset to the start of the range
    pub fn stop(&mut self) {
        self.clock.stop();
        self.cursor.reset();
        self.markers.clear_all();
        self.publish_date();
        info!("Playback stopped");
    }

    /// Jump to a point in time.
    ///
    /// The target is clamped to the playback range, live markers are
    /// cleared and the cursor moves to the first event at or after the new
    /// time. Events skipped over are not dispatched: a jump shows the
    /// catalog from that date on, it does not replay up to it. The playing
    /// state is left as it was.
    pub fn jump_to(&mut self, target: DateTime<Utc>) {
        self.markers.clear_all();
        let time = self.clock.jump_to(target);
        self.cursor.seek(&self.catalog, time);
        self.publish_date();
        info!("Jumped to {} (next event #{})", time, self.cursor.position());
    }

    /// Jump to midnight UTC of a calendar date.
    ///
    /// Month is clamped to 1–12, day to the length of that month and year
    /// to the years the playback range covers.
    pub fn jump_to_date(&mut self, year: i32, month: u32, day: u32) {
        let range = self.clock.range();
        let year = year.clamp(range.start.year(), range.end.year());
        let month = month.clamp(1, 12);
        let day = day.clamp(1, days_in_month(year, month));

        let target = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .unwrap_or(range.start);
        self.jump_to(target);
    }

    /// Update playback state (call each frame)
    pub fn tick(&mut self, elapsed: StdDuration) -> TickSummary {
        let dt = elapsed.as_secs_f64();
        let advancing = self.clock.is_advancing();

        // Markers already on screen age first; new ones start at zero
        let expired = self.markers.tick(dt, advancing);

        let before = self.clock.sim_time();
        let Some(now) = self.clock.advance(dt) else {
            let at = self.cursor.position();
            return TickSummary {
                dispatched: at..at,
                expired,
            };
        };

        if now < before {
            self.cursor.rewind_to(&self.catalog, now);
        }

        let dispatched = self.cursor.advance_to(&self.catalog, now);
        for index in dispatched.clone() {
            self.markers.spawn(index, &self.catalog[index]);
        }

        self.publish_date();

        TickSummary { dispatched, expired }
    }

    /// Show the detail popup for a clicked marker.
    ///
    /// Only markers on the hemisphere facing `viewer` respond. Returns
    /// whether the click was accepted.
    pub fn select_marker(&mut self, id: MarkerId, frame: &GlobeFrame, viewer: &Point3<f64>) -> bool {
        let Some(marker) = self.markers.get(id) else {
            return false;
        };
        let local = marker.local_position();
        if !is_on_near_hemisphere(frame, &local, viewer) {
            return false;
        }
        let Some(event) = self.catalog.get(marker.event_index()) else {
            return false;
        };

        if let Some(popup) = self.popup.as_mut() {
            popup.show(event, frame.to_world(&local));
        }
        true
    }

    /// Hide the detail popup
    pub fn dismiss_detail(&mut self) {
        if let Some(popup) = self.popup.as_mut() {
            popup.hide();
        }
    }

    /// Event shown by a live marker
    pub fn marker_event(&self, id: MarkerId) -> Option<&QuakeEvent> {
        let marker = self.markers.get(id)?;
        self.catalog.get(marker.event_index())
    }

    fn publish_date(&mut self) {
        let time = self.clock.sim_time();
        if let Some(display) = self.date_display.as_mut() {
            display.show_date(time);
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or(28, |last| last.day())
}
