use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

static NEXT_TRACK_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique track identifier. Never reused.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TrackId(u64);

impl TrackId {
    /// Allocate a fresh id.
    pub fn fresh() -> Self {
        Self(NEXT_TRACK_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Opaque reference to a track's audio bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator(PathBuf);

impl SourceLocator {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Seconds; `0.0` means unknown.
    pub duration: f64,
    pub source: SourceLocator,
    pub cover_art: Option<SourceLocator>,
}

impl Track {
    /// Build a track with a fresh id and placeholder artist/album.
    pub fn new(title: impl Into<String>, source: SourceLocator) -> Self {
        Self {
            id: TrackId::fresh(),
            title: title.into(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration: 0.0,
            source,
            cover_art: None,
        }
    }
}

/// Normalize a reported duration: anything negative or non-finite is unknown.
pub fn sanitize_seconds(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        0.0
    }
}
