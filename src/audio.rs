//! Playback: the `Playback` seam and its `rodio` implementation.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{Playback, PlaybackError};
