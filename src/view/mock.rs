use crate::core::QuakeEvent;
use crate::view::interface::{DateDisplay, DetailPopup, MarkerRenderer, MarkerVisual, RenderHandle};
use chrono::{DateTime, Utc};
use nalgebra::Point3;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Everything a `RecordingRenderer` has been asked to do
#[derive(Debug, Default)]
pub struct RenderLog {
    /// Objects currently alive, with their latest visual
    pub live: HashMap<RenderHandle, MarkerVisual>,
    pub created: usize,
    pub updated: usize,
    pub destroyed: usize,
}

/// Renderer that records calls instead of drawing
///
/// Clones share the same log, so a test can keep one clone while the
/// engine owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    log: Rc<RefCell<RenderLog>>,
    next_handle: Rc<RefCell<u64>>,
    refuse: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A renderer whose `create` always fails
    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::default()
        }
    }

    pub fn live_count(&self) -> usize {
        self.log.borrow().live.len()
    }

    pub fn created(&self) -> usize {
        self.log.borrow().created
    }

    pub fn destroyed(&self) -> usize {
        self.log.borrow().destroyed
    }

    pub fn updated(&self) -> usize {
        self.log.borrow().updated
    }

    pub fn visual(&self, handle: RenderHandle) -> Option<MarkerVisual> {
        self.log.borrow().live.get(&handle).copied()
    }
}

impl MarkerRenderer for RecordingRenderer {
    fn create(&mut self, visual: &MarkerVisual) -> Option<RenderHandle> {
        if self.refuse {
            return None;
        }
        let mut next = self.next_handle.borrow_mut();
        *next += 1;
        let handle = RenderHandle(*next);

        let mut log = self.log.borrow_mut();
        log.live.insert(handle, *visual);
        log.created += 1;
        Some(handle)
    }

    fn update(&mut self, handle: RenderHandle, visual: &MarkerVisual) {
        let mut log = self.log.borrow_mut();
        if let Some(slot) = log.live.get_mut(&handle) {
            *slot = *visual;
        }
        log.updated += 1;
    }

    fn destroy(&mut self, handle: RenderHandle) {
        let mut log = self.log.borrow_mut();
        log.live.remove(&handle);
        log.destroyed += 1;
    }
}

/// Date display that keeps every date it was shown
#[derive(Debug, Clone, Default)]
pub struct RecordingDateDisplay {
    shown: Rc<RefCell<Vec<DateTime<Utc>>>>,
}

impl RecordingDateDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.shown.borrow().last().copied()
    }

    pub fn count(&self) -> usize {
        self.shown.borrow().len()
    }
}

impl DateDisplay for RecordingDateDisplay {
    fn show_date(&mut self, time: DateTime<Utc>) {
        self.shown.borrow_mut().push(time);
    }
}

/// Popup that remembers what it currently shows
#[derive(Debug, Clone, Default)]
pub struct RecordingPopup {
    current: Rc<RefCell<Option<(QuakeEvent, Point3<f64>)>>>,
}

impl RecordingPopup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Option<(QuakeEvent, Point3<f64>)> {
        self.current.borrow().clone()
    }
}

impl DetailPopup for RecordingPopup {
    fn show(&mut self, event: &QuakeEvent, world_position: Point3<f64>) {
        *self.current.borrow_mut() = Some((event.clone(), world_position));
    }

    fn hide(&mut self) {
        *self.current.borrow_mut() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_renderer_shares_log() {
        let renderer = RecordingRenderer::new();
        let mut owned = renderer.clone();

        let visual = MarkerVisual {
            local_position: Point3::new(1.0, 0.0, 0.0),
            scale: 0.5,
            opacity: 1.0,
        };
        let handle = owned.create(&visual).unwrap();
        assert_eq!(renderer.live_count(), 1);

        owned.update(handle, &MarkerVisual { opacity: 0.25, ..visual });
        assert_eq!(renderer.visual(handle).unwrap().opacity, 0.25);

        owned.destroy(handle);
        assert_eq!(renderer.live_count(), 0);
        assert_eq!(renderer.created(), 1);
        assert_eq!(renderer.destroyed(), 1);
    }

    #[test]
    fn test_refusing_renderer() {
        let mut renderer = RecordingRenderer::refusing();
        let visual = MarkerVisual {
            local_position: Point3::origin(),
            scale: 1.0,
            opacity: 1.0,
        };
        assert!(renderer.create(&visual).is_none());
    }
}
