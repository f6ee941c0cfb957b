pub mod catalog;
pub mod event;
pub mod geo;
pub mod interp;

pub use catalog::Catalog;
pub use event::QuakeEvent;
pub use geo::{is_on_near_hemisphere, project, GlobeFrame};
