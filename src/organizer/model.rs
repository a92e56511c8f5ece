//! The organizer: an ordered track collection wired to a player.
//!
//! Every read or mutation by position goes through the same index check,
//! and both random operations draw from the organizer's own RNG so a seeded
//! generator makes them reproducible.

use std::path::PathBuf;

use log::{info, warn};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::audio::Playback;
use crate::library::Track;

use super::error::OrganizerError;

pub type Result<T> = std::result::Result<T, OrganizerError>;

/// An ordered, indexable collection of tracks that drives a [`Playback`].
pub struct Organizer<P, R = StdRng> {
    tracks: Vec<Track>,
    player: P,
    rng: R,
}

impl<P: Playback, R: Rng> Organizer<P, R> {
    /// Create an empty organizer.
    pub fn new(player: P, rng: R) -> Self {
        Self {
            tracks: Vec::new(),
            player,
            rng,
        }
    }

    /// Create an organizer seeded with a library, in the library's order.
    pub fn with_tracks(tracks: Vec<Track>, player: P, rng: R) -> Self {
        info!("Music library loaded. {} tracks.", tracks.len());
        Self { tracks, player, rng }
    }

    /// Append a track to the end of the collection.
    pub fn add_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Append a track built from a file name alone.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.add_track(Track::from_path(path));
    }

    /// Remove and return the track at `index`; later tracks shift down by one.
    pub fn remove_track(&mut self, index: i64) -> Result<Track> {
        let i = self.check_index(index)?;
        Ok(self.tracks.remove(i))
    }

    pub fn number_of_tracks(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: i64) -> Result<&Track> {
        let i = self.check_index(index)?;
        Ok(&self.tracks[i])
    }

    /// The listing line for one track: `"Track {index}: {artist} - {title}"`.
    pub fn list_track(&self, index: i64) -> Result<String> {
        let track = self.track(index)?;
        Ok(format!("Track {index}: {}", track.details()))
    }

    /// All tracks in insertion order.
    pub fn list_all_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    /// Tracks whose artist contains `artist` (case-sensitive), in insertion order.
    pub fn list_by_artist<'a>(&'a self, artist: &'a str) -> impl Iterator<Item = &'a Track> {
        self.tracks.iter().filter(move |t| t.artist().contains(artist))
    }

    pub fn play_track(&mut self, index: i64) -> Result<&Track> {
        let i = self.check_index(index)?;
        let track = &self.tracks[i];
        self.player.start(track.path())?;
        info!("Now playing: {track}");
        Ok(track)
    }

    /// Play the first track, if there is one. An empty collection plays nothing.
    pub fn play_first(&mut self) -> Result<Option<&Track>> {
        let Some(track) = self.tracks.first() else {
            return Ok(None);
        };
        self.player.start(track.path())?;
        info!("Now playing: {track}");
        Ok(Some(track))
    }

    pub fn stop_playing(&mut self) -> Result<()> {
        self.player.stop()?;
        Ok(())
    }

    /// Play one track picked uniformly at random.
    ///
    /// Each call is an independent draw.
    pub fn play_random_track(&mut self) -> Result<&Track> {
        let Some(track) = self.tracks.choose(&mut self.rng) else {
            return Err(reject(OrganizerError::EmptyCollection));
        };
        self.player.start(track.path())?;
        info!("Now playing: {track}");
        Ok(track)
    }

    /// A uniformly random permutation of `0..number_of_tracks()`.
    pub fn shuffled_order(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.tracks.len()).collect();
        order.shuffle(&mut self.rng);
        order
    }

    /// Start every track exactly once, in a fresh random order.
    ///
    /// The permutation is fixed before the first track is started; it is
    /// returned so callers can see what was played. Each start supersedes the
    /// previous one on the player.
    ///
    /// If the player fails part way, the tracks already started stay started
    /// and the error is returned; the log records how far the shuffle got.
    pub fn randomize_play_list(&mut self) -> Result<Vec<usize>> {
        if self.tracks.is_empty() {
            return Err(reject(OrganizerError::EmptyCollection));
        }

        let order = self.shuffled_order();
        for (played, &i) in order.iter().enumerate() {
            let track = &self.tracks[i];
            if let Err(e) = self.player.start(track.path()) {
                warn!(
                    "shuffle stopped at {track} after {played} of {} tracks",
                    order.len()
                );
                return Err(e.into());
            }
            info!("Now playing: {track}");
        }
        Ok(order)
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    fn check_index(&self, index: i64) -> Result<usize> {
        if index < 0 {
            return Err(reject(OrganizerError::NegativeIndex(index)));
        }
        usize::try_from(index)
            .ok()
            .filter(|&i| i < self.tracks.len())
            .ok_or_else(|| reject(OrganizerError::IndexOutOfRange(index)))
    }
}

fn reject(err: OrganizerError) -> OrganizerError {
    warn!("{err}");
    err
}
