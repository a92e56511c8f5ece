use thiserror::Error;

use crate::audio::PlaybackError;

#[derive(Debug, Error)]
pub enum OrganizerError {
    #[error("Index cannot be negative: {0}")]
    NegativeIndex(i64),

    #[error("Index is too large: {0}")]
    IndexOutOfRange(i64),

    #[error("No tracks available")]
    EmptyCollection,

    #[error("playback failed: {0}")]
    Playback(#[from] PlaybackError),
}

impl OrganizerError {
    /// Whether the error only reports a bad request and left the collection untouched.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, Self::Playback(_))
    }
}
