use std::fmt;

use crate::library::Track;

/// Playlist identifier, unique within a `PlaylistStore`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PlaylistId(u64);

impl PlaylistId {
    pub(super) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for PlaylistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A user-named ordered list of tracks. Duplicates are allowed; tracks are
/// identified by `Track::id`.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub tracks: Vec<Track>,
}
