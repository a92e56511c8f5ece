use std::borrow::Cow;
use std::path::Path;

use lofty::prelude::*;
use lofty::probe::Probe;
use log::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::LibrarySettings;

use super::model::Track;

/// Which directory entries count as library tracks.
struct Filter {
    extensions: Vec<String>,
    include_hidden: bool,
}

impl Filter {
    fn new(settings: &LibrarySettings) -> Self {
        Self {
            extensions: settings.normalized_extensions(),
            include_hidden: settings.include_hidden,
        }
    }

    fn has_audio_extension(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext))
    }

    /// Whether the walk should descend into (or yield) `entry`. The root is always entered.
    fn enters(&self, entry: &DirEntry) -> bool {
        self.include_hidden
            || entry.depth() == 0
            || !entry.file_name().to_string_lossy().starts_with('.')
    }
}

fn walker(dir: &Path, settings: &LibrarySettings) -> WalkDir {
    let walker = WalkDir::new(dir).follow_links(settings.follow_links);
    // Non-recursive means the root's own files only.
    match (settings.recursive, settings.max_depth) {
        (false, _) => walker.max_depth(1),
        (true, Some(depth)) => walker.max_depth(depth),
        (true, None) => walker,
    }
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a single file into a `Track`.
///
/// Artist and title start out derived from the file name and are replaced
/// by tag values when the file carries readable tags.
fn read_track(path: &Path) -> Track {
    let fallback = Track::from_path(path);

    let tagged = match Probe::open(path).and_then(|p| p.read()) {
        Ok(tagged) => tagged,
        Err(e) => {
            debug!("no readable tags in {}: {e}", path.display());
            return fallback;
        }
    };

    let duration = tagged.properties().duration();
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return fallback.with_duration(duration);
    };

    let artist = non_blank(tag.artist()).unwrap_or_else(|| fallback.artist().to_string());
    let title = non_blank(tag.title()).unwrap_or_else(|| fallback.title().to_string());

    let track = Track::new(artist, title, path).with_duration(duration);
    match non_blank(tag.album()) {
        Some(album) => track.with_album(album),
        None => track,
    }
}

/// Walk `dir` and collect every audio file accepted by `settings`.
///
/// The result is sorted case-insensitively by its display string so that the
/// same directory always yields the same indices.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    if !dir.is_dir() {
        warn!("library directory {} does not exist", dir.display());
        return Vec::new();
    }

    let filter = Filter::new(settings);
    let mut tracks: Vec<Track> = walker(dir, settings)
        .into_iter()
        .filter_entry(|e| filter.enters(e))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|e| e.path().is_file() && filter.has_audio_extension(e.path()))
        .map(|e| read_track(e.path()))
        .collect();

    tracks.sort_by_cached_key(|t| t.details().to_lowercase());
    debug!("scanned {} tracks under {}", tracks.len(), dir.display());
    tracks
}
