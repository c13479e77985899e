use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::library::Track;
use crate::notify::{Change, Notifier};

use super::model::{Playlist, PlaylistId};

/// Ordered, in-memory collection of playlists.
pub struct PlaylistStore {
    playlists: Vec<Playlist>,
    next_id: u64,
    notifier: Notifier,
}

impl PlaylistStore {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            playlists: Vec::new(),
            next_id: 1,
            notifier,
        }
    }

    /// Create an empty playlist named exactly `name`.
    ///
    /// Whitespace-only names are rejected and leave the store untouched.
    pub fn create(&mut self, name: &str) -> Result<&Playlist, StoreError> {
        if name.trim().is_empty() {
            debug!("rejecting empty playlist name");
            return Err(StoreError::InvalidName);
        }

        let id = PlaylistId::new(self.next_id);
        self.next_id += 1;
        info!(%id, playlist = name, "created playlist");

        self.playlists.push(Playlist {
            id,
            name: name.to_string(),
            tracks: Vec::new(),
        });
        self.notifier.publish(Change::Playlists);
        Ok(&self.playlists[self.playlists.len() - 1])
    }

    /// Append `track` to the playlist `id`.
    pub fn add_track(&mut self, id: PlaylistId, track: Track) -> Result<(), StoreError> {
        let Some(playlist) = self.playlists.iter_mut().find(|p| p.id == id) else {
            warn!(%id, "add_track: no such playlist");
            return Err(StoreError::PlaylistNotFound(id));
        };
        info!(playlist = %playlist.name, title = %track.title, "added track to playlist");
        playlist.tracks.push(track);
        self.notifier.publish(Change::Playlists);
        Ok(())
    }

    pub fn list(&self) -> &[Playlist] {
        &self.playlists
    }

    pub fn get(&self, id: PlaylistId) -> Option<&Playlist> {
        self.playlists.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.playlists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playlists.is_empty()
    }
}
