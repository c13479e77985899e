//! `Session`: the single owner of all player state.
//!
//! Built once in `runtime::run` and handed to the view by reference.

use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::{debug, info};

use crate::audio::{PlaybackEvent, PlaybackPrimitive};
use crate::config::LibrarySettings;
use crate::error::StoreError;
use crate::library::{self, Library, Track};
use crate::notify::{Change, Notifier};
use crate::playback::{IndexPicker, PlaybackCoordinator, PlaybackState};
use crate::playlist::{PlaylistId, PlaylistStore};

/// Label of the source shown when no playlist is selected.
pub const LIBRARY_NAME: &str = "Your Library";

/// Which track source is active and how it is filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// `None` means the whole library.
    pub current_playlist: Option<PlaylistId>,
    pub search_query: String,
}

pub struct Session {
    notifier: Notifier,
    library: Library,
    playlists: PlaylistStore,
    selection: Selection,
    playback: PlaybackCoordinator,
}

/// The tracks `next`/`previous` walk through: the selected playlist, or the
/// library when none is selected (or it no longer exists).
fn resolve_source<'a>(
    library: &'a Library,
    playlists: &'a PlaylistStore,
    selection: &Selection,
) -> &'a [Track] {
    selection
        .current_playlist
        .and_then(|id| playlists.get(id))
        .map(|p| p.tracks.as_slice())
        .unwrap_or_else(|| library.list())
}

impl Session {
    pub fn new(volume: f32, picker: Box<dyn IndexPicker>, notifier: Notifier) -> Self {
        Self {
            library: Library::new(notifier.clone()),
            playlists: PlaylistStore::new(notifier.clone()),
            selection: Selection::default(),
            playback: PlaybackCoordinator::new(volume, picker, notifier.clone()),
            notifier,
        }
    }

    pub fn subscribe(&self) -> Receiver<Change> {
        self.notifier.subscribe()
    }

    pub fn attach_primitive(&mut self, primitive: Box<dyn PlaybackPrimitive>) {
        self.playback.attach_primitive(primitive);
    }

    pub fn shutdown(&mut self, fade_out: Duration) {
        self.playback.shutdown(fade_out);
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn playlists(&self) -> &PlaylistStore {
        &self.playlists
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn playback(&self) -> &PlaybackCoordinator {
        &self.playback
    }

    pub fn state(&self) -> &PlaybackState {
        self.playback.state()
    }

    pub fn active_tracks(&self) -> &[Track] {
        resolve_source(&self.library, &self.playlists, &self.selection)
    }

    /// Active tracks matching the search query, in source order.
    pub fn visible_tracks(&self) -> Vec<&Track> {
        library::filter_tracks(self.active_tracks(), &self.selection.search_query)
    }

    pub fn active_source_name(&self) -> &str {
        self.selection
            .current_playlist
            .and_then(|id| self.playlists.get(id))
            .map(|p| p.name.as_str())
            .unwrap_or(LIBRARY_NAME)
    }

    /// Switch the active source. `None` selects the library.
    pub fn select_playlist(&mut self, id: Option<PlaylistId>) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.playlists.get(id).is_none() {
                return Err(StoreError::PlaylistNotFound(id));
            }
        }
        if self.selection.current_playlist != id {
            debug!(playlist = ?id, "active source changed");
            self.selection.current_playlist = id;
            self.notifier.publish(Change::Selection);
        }
        Ok(())
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.selection.search_query != query {
            self.selection.search_query = query;
            self.notifier.publish(Change::Selection);
        }
    }

    /// Import files and directories into the library. Returns how many tracks
    /// were added.
    pub fn import<P: AsRef<Path>>(&mut self, paths: &[P], settings: &LibrarySettings) -> usize {
        let tracks = library::import_paths(paths, settings);
        let n = tracks.len();
        info!(count = n, "import finished");
        self.library.add(tracks);
        n
    }

    pub fn create_playlist(&mut self, name: &str) -> Result<PlaylistId, StoreError> {
        self.playlists.create(name).map(|p| p.id)
    }

    pub fn add_to_playlist(&mut self, id: PlaylistId, track: Track) -> Result<(), StoreError> {
        self.playlists.add_track(id, track)
    }

    pub fn play(&mut self, track: Track) {
        self.playback.play(track);
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn resume(&mut self) {
        self.playback.resume();
    }

    pub fn toggle_play_pause(&mut self) {
        self.playback.toggle_play_pause();
    }

    pub fn next(&mut self) -> bool {
        let source = resolve_source(&self.library, &self.playlists, &self.selection);
        self.playback.next(source)
    }

    pub fn previous(&mut self) -> bool {
        let source = resolve_source(&self.library, &self.playlists, &self.selection);
        self.playback.previous(source)
    }

    pub fn seek(&mut self, secs: f64) {
        self.playback.seek(secs);
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.playback.set_volume(volume);
    }

    pub fn toggle_shuffle(&mut self) {
        self.playback.toggle_shuffle();
    }

    pub fn toggle_repeat(&mut self) {
        self.playback.toggle_repeat();
    }

    pub fn handle_playback_event(&mut self, event: PlaybackEvent) {
        let source = resolve_source(&self.library, &self.playlists, &self.selection);
        self.playback.handle_event(event, source);
    }
}
