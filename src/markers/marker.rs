use crate::markers::MarkerConfig;
use crate::view::{MarkerVisual, RenderHandle};
use nalgebra::Point3;

/// Identifies a live marker for its whole life
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u64);

/// Transient visual for one dispatched event
#[derive(Debug, Clone)]
pub struct LiveMarker {
    pub(crate) id: MarkerId,
    pub(crate) event_index: usize,
    pub(crate) local_position: Point3<f64>,
    pub(crate) spawn_size: f64,
    /// Time spent animating (only while playing)
    pub(crate) anim_time: f64,
    /// Real time since spawn, paused or not
    pub(crate) wall_age: f64,
    pub(crate) render: Option<RenderHandle>,
}

impl LiveMarker {
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// Catalog index of the event this marker shows
    pub fn event_index(&self) -> usize {
        self.event_index
    }

    pub fn local_position(&self) -> Point3<f64> {
        self.local_position
    }

    pub fn anim_time(&self) -> f64 {
        self.anim_time
    }

    pub fn render_handle(&self) -> Option<RenderHandle> {
        self.render
    }

    /// Appearance on the spawn frame, sized by magnitude
    pub fn spawn_visual(&self) -> MarkerVisual {
        MarkerVisual {
            local_position: self.local_position,
            scale: self.spawn_size,
            opacity: 1.0,
        }
    }

    /// Appearance after animating for `anim_time`
    pub fn visual(&self, config: &MarkerConfig) -> MarkerVisual {
        let t = config.progress(self.anim_time);
        MarkerVisual {
            local_position: self.local_position,
            scale: config.size_at(t),
            opacity: config.opacity_at(t),
        }
    }

    /// Animation finished or the safety timeout ran out
    pub fn is_expired(&self, config: &MarkerConfig) -> bool {
        self.anim_time >= config.life_time || self.wall_age >= config.expiry_timeout
    }
}
