use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;

use crate::audio::Playback;
use crate::organizer::{Organizer, OrganizerError};

use super::cli::Command;

/// Run one library command, writing listings to `out`.
///
/// Rejected requests (bad index, empty library) are logged by the organizer
/// and are not errors; only playback and I/O failures are.
pub fn execute<P: Playback, R: Rng>(
    command: &Command,
    organizer: &mut Organizer<P, R>,
    out: &mut impl Write,
) -> Result<()> {
    let outcome: Result<(), OrganizerError> = match command {
        Command::Count => {
            writeln!(out, "{}", organizer.number_of_tracks())?;
            Ok(())
        }
        Command::List { index: Some(i) } => match organizer.list_track(*i) {
            Ok(line) => {
                writeln!(out, "{line}")?;
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::List { index: None } => {
            writeln!(out, "Track listing: ")?;
            for track in organizer.list_all_tracks() {
                writeln!(out, "{track}")?;
            }
            writeln!(out)?;
            Ok(())
        }
        Command::Info { index } => match organizer.track(*index) {
            Ok(track) => {
                writeln!(out, "Track {index}: {track}")?;
                writeln!(out, "  album:    {}", track.album().unwrap_or("unknown"))?;
                let length = track.duration().map_or_else(|| "unknown".to_string(), format_mmss);
                writeln!(out, "  duration: {length}")?;
                writeln!(out, "  file:     {}", track.path().display())?;
                Ok(())
            }
            Err(e) => Err(e),
        },
        Command::Artist { name } => {
            for track in organizer.list_by_artist(name) {
                writeln!(out, "{track}")?;
            }
            Ok(())
        }
        Command::Play { index } => organizer.play_track(*index).map(drop),
        Command::First => organizer.play_first().map(drop),
        Command::Random => organizer.play_random_track().map(drop),
        Command::Shuffle => organizer.randomize_play_list().map(drop),
        // Answered before the library is scanned.
        Command::Config => Ok(()),
    };

    match outcome {
        Err(e) if e.is_rejection() => Ok(()),
        other => other.context("command failed"),
    }
}

fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
