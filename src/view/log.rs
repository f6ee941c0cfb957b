use crate::core::QuakeEvent;
use crate::ui::{date_label, EventDetail};
use crate::view::interface::{DateDisplay, DetailPopup, MarkerRenderer, MarkerVisual, RenderHandle};
use chrono::{DateTime, Utc};
use nalgebra::Point3;
use tracing::{debug, info};

/// Headless renderer that only logs marker lifecycles
#[derive(Debug, Default)]
pub struct TracingRenderer {
    next_handle: u64,
    live: usize,
}

impl TracingRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MarkerRenderer for TracingRenderer {
    fn create(&mut self, visual: &MarkerVisual) -> Option<RenderHandle> {
        self.next_handle += 1;
        self.live += 1;
        let p = visual.local_position;
        debug!(
            handle = self.next_handle,
            scale = visual.scale,
            live = self.live,
            "Marker at ({:.3}, {:.3}, {:.3})",
            p.x,
            p.y,
            p.z
        );
        Some(RenderHandle(self.next_handle))
    }

    fn update(&mut self, _handle: RenderHandle, _visual: &MarkerVisual) {}

    fn destroy(&mut self, handle: RenderHandle) {
        self.live = self.live.saturating_sub(1);
        debug!(handle = handle.0, live = self.live, "Marker removed");
    }
}

/// Logs the simulated date whenever the calendar day changes
#[derive(Debug, Default)]
pub struct TracingDateDisplay {
    last_label: Option<String>,
}

impl TracingDateDisplay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DateDisplay for TracingDateDisplay {
    fn show_date(&mut self, time: DateTime<Utc>) {
        let label = date_label(time);
        if self.last_label.as_deref() != Some(label.as_str()) {
            debug!("Simulated date {}", label);
            self.last_label = Some(label);
        }
    }
}

/// Writes popup contents to the log
#[derive(Debug, Default)]
pub struct TracingPopup;

impl DetailPopup for TracingPopup {
    fn show(&mut self, event: &QuakeEvent, _world_position: Point3<f64>) {
        let detail = EventDetail::from_event(event);
        info!("{}\n{}", detail.title, detail.body);
    }

    fn hide(&mut self) {}
}
