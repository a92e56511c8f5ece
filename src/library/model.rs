use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

const UNKNOWN: &str = "unknown";

/// An immutable record describing one playable audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    artist: String,
    title: String,
    path: PathBuf,
    album: Option<String>,
    duration: Option<Duration>,
}

impl Track {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            path: path.into(),
            album: None,
            duration: None,
        }
    }

    /// Build a track from a file name alone.
    ///
    /// The file stem is split at its first `-` into artist and title
    /// (`"Artist - Title.mp3"`). Without a dash the artist is `"unknown"` and
    /// the whole stem becomes the title.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (artist, title) = details_from_stem(&path);
        Self::new(artist, title, path)
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The file this track plays from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    /// `"artist - title"`, the string used by every listing.
    pub fn details(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.title)
    }
}

fn details_from_stem(path: &Path) -> (String, String) {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::trim)
        .unwrap_or_default();

    if stem.is_empty() {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    }

    match stem.split_once('-') {
        Some((artist, title)) if !artist.trim().is_empty() && !title.trim().is_empty() => {
            (artist.trim().to_string(), title.trim().to_string())
        }
        _ => (UNKNOWN.to_string(), stem.to_string()),
    }
}
