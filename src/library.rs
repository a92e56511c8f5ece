//! Track records and the directory scanner that seeds the organizer.

mod model;
mod scan;

pub use model::Track;
pub use scan::scan;
