use crate::core::QuakeEvent;
use crate::markers::{LiveMarker, MarkerCapacity, MarkerConfig, MarkerId};
use crate::view::MarkerRenderer;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Owns every live marker and is the only thing that destroys one
///
/// Markers are kept oldest first. All renderer calls are skipped when no
/// renderer is attached; the lifecycle runs the same either way.
pub struct MarkerManager {
    config: MarkerConfig,
    live: VecDeque<LiveMarker>,
    renderer: Option<Box<dyn MarkerRenderer>>,
    next_id: u64,
    dropped: u64,
}

impl MarkerManager {
    pub fn new(config: MarkerConfig) -> Self {
        Self {
            config,
            live: VecDeque::new(),
            renderer: None,
            next_id: 0,
            dropped: 0,
        }
    }

    pub fn config(&self) -> &MarkerConfig {
        &self.config
    }

    pub fn attach_renderer(&mut self, renderer: Box<dyn MarkerRenderer>) {
        self.renderer = Some(renderer);
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Spawns refused by a `DropNewest` limit so far
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn get(&self, id: MarkerId) -> Option<&LiveMarker> {
        self.live.iter().find(|m| m.id == id)
    }

    /// Live markers, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &LiveMarker> {
        self.live.iter()
    }

    /// Create a marker for a dispatched event.
    ///
    /// Returns `None` only when a `DropNewest` limit refuses it.
    pub fn spawn(&mut self, event_index: usize, event: &QuakeEvent) -> Option<MarkerId> {
        match self.config.capacity {
            MarkerCapacity::Unbounded => {}
            MarkerCapacity::DropNewest { max } => {
                if self.live.len() >= max {
                    self.dropped += 1;
                    debug!("Marker limit {} reached, dropping event {}", max, event_index);
                    return None;
                }
            }
            MarkerCapacity::EvictOldest { max } => {
                if max == 0 {
                    self.dropped += 1;
                    return None;
                }
                while self.live.len() >= max {
                    if let Some(oldest) = self.live.pop_front() {
                        self.destroy(oldest);
                    }
                }
            }
        }

        self.next_id += 1;
        let mut marker = LiveMarker {
            id: MarkerId(self.next_id),
            event_index,
            local_position: event.local_position,
            spawn_size: self.config.spawn_size(event.magnitude),
            anim_time: 0.0,
            wall_age: 0.0,
            render: None,
        };

        if let Some(renderer) = self.renderer.as_mut() {
            marker.render = renderer.create(&marker.spawn_visual());
            if marker.render.is_none() {
                warn!("Renderer declined marker for event {}", event_index);
            }
        }

        let id = marker.id;
        self.live.push_back(marker);
        Some(id)
    }

    /// Advance every marker by `elapsed` real seconds.
    ///
    /// Animation only moves while `animating`; the safety timeout always
    /// does. Returns how many markers expired.
    pub fn tick(&mut self, elapsed: f64, animating: bool) -> usize {
        if self.live.is_empty() {
            return 0;
        }

        let before = self.live.len();
        let mut kept = VecDeque::with_capacity(before);

        for mut marker in self.live.drain(..) {
            marker.wall_age += elapsed;
            if animating {
                marker.anim_time += elapsed;
            }

            if marker.is_expired(&self.config) {
                if let (Some(renderer), Some(handle)) = (self.renderer.as_mut(), marker.render) {
                    renderer.destroy(handle);
                }
                continue;
            }

            if animating {
                if let (Some(renderer), Some(handle)) = (self.renderer.as_mut(), marker.render) {
                    renderer.update(handle, &marker.visual(&self.config));
                }
            }
            kept.push_back(marker);
        }

        self.live = kept;
        before - self.live.len()
    }

    /// Destroy every live marker
    pub fn clear_all(&mut self) {
        let cleared = self.live.len();
        while let Some(marker) = self.live.pop_front() {
            self.destroy(marker);
        }
        if cleared > 0 {
            debug!("Cleared {} markers", cleared);
        }
    }

    fn destroy(&mut self, marker: LiveMarker) {
        if let (Some(renderer), Some(handle)) = (self.renderer.as_mut(), marker.render) {
            renderer.destroy(handle);
        }
    }
}
