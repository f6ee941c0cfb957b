pub mod interface;
pub mod log;
pub mod mock;

pub use interface::{DateDisplay, DetailPopup, MarkerRenderer, MarkerVisual, RenderHandle};
pub use log::{TracingDateDisplay, TracingPopup, TracingRenderer};
pub use mock::{RecordingDateDisplay, RecordingPopup, RecordingRenderer};
