use tracing::{debug, info};

use crate::notify::{Change, Notifier};

use super::model::{Track, TrackId};

/// Ordered, in-memory collection of imported tracks.
pub struct Library {
    tracks: Vec<Track>,
    notifier: Notifier,
}

impl Library {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            tracks: Vec::new(),
            notifier,
        }
    }

    /// Append `tracks` in the given order. Ids are not deduplicated.
    pub fn add(&mut self, tracks: Vec<Track>) {
        if tracks.is_empty() {
            return;
        }
        info!(count = tracks.len(), "adding tracks to library");
        for t in &tracks {
            debug!(id = %t.id, title = %t.title, "library add");
        }
        self.tracks.extend(tracks);
        self.notifier.publish(Change::Library);
    }

    pub fn list(&self) -> &[Track] {
        &self.tracks
    }

    #[cfg(test)]
    pub fn get(&self, id: TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
