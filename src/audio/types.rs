//! Audio-related small types.
//!
//! This module defines the `Playback` seam the organizer drives and the
//! commands understood by the audio thread.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use thiserror::Error;

/// Something that can start and stop playback of a file.
///
/// Starting a new file supersedes whatever was playing before.
pub trait Playback {
    fn start(&mut self, path: &Path) -> Result<(), PlaybackError>;

    /// Halt playback. Stopping an idle player is not an error.
    fn stop(&mut self) -> Result<(), PlaybackError>;
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio thread is no longer running")]
    Disconnected,

    #[error("cannot play {}", .0.display())]
    Unplayable(PathBuf),
}

#[derive(Debug)]
pub(super) enum AudioCmd {
    /// Start playing `path`, replacing the current file.
    ///
    /// The thread answers on `started` once the file is playing (`true`) or
    /// could not be opened (`false`).
    Play { path: PathBuf, started: Sender<bool> },
    /// Stop playback immediately.
    Stop,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
