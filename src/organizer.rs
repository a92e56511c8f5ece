//! Organizer module: the indexed track collection and its playback operations.

mod error;
mod model;

pub use error::OrganizerError;
pub use model::*;

#[cfg(test)]
mod tests;
