use crate::core::QuakeEvent;
use chrono::{DateTime, Utc};
use nalgebra::Point3;

/// Opaque handle to a renderer-side marker object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(pub u64);

/// What a marker should look like this frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerVisual {
    /// Position in the globe's local frame
    pub local_position: Point3<f64>,
    /// Uniform scale
    pub scale: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f64,
}

/// Trait for whatever draws markers on the globe
///
/// The playback core knows nothing about meshes, materials or transforms;
/// the renderer parents markers under its own globe frame. Implementations:
/// - a real scene graph in the host application
/// - `TracingRenderer` for headless runs
/// - `RecordingRenderer` for tests
pub trait MarkerRenderer {
    /// Create a visible object. `None` if the renderer cannot make one.
    fn create(&mut self, visual: &MarkerVisual) -> Option<RenderHandle>;

    /// Apply a new scale / opacity to an existing object
    fn update(&mut self, handle: RenderHandle, visual: &MarkerVisual);

    /// Remove an object
    fn destroy(&mut self, handle: RenderHandle);
}

/// Shows the current simulated date
pub trait DateDisplay {
    fn show_date(&mut self, time: DateTime<Utc>);
}

/// Detail panel for a clicked event
pub trait DetailPopup {
    fn show(&mut self, event: &QuakeEvent, world_position: Point3<f64>);

    fn hide(&mut self);
}
