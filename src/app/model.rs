//! View state layered on top of a `Session`.
//!
//! `App` owns the session plus everything that only matters to the TUI:
//! which pane has focus, cursor rows, the active text prompt and the status
//! line.

use tracing::debug;

use crate::config::{ControlsSettings, LibrarySettings};
use crate::library::Track;
use crate::notify::Change;
use crate::playlist::PlaylistId;

use super::session::Session;

/// Pane that receives `j`/`k`/`enter`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    Sidebar,
    #[default]
    Tracks,
}

/// What keystrokes currently feed into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing refines the search query live.
    Search,
    /// Typing a name for a new playlist.
    NewPlaylist,
    /// Typing a file or directory to import.
    Import,
    /// Choosing a playlist for the selected track.
    PickPlaylist,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            InputMode::Normal => "",
            InputMode::Search => " search ",
            InputMode::NewPlaylist => " new playlist name ",
            InputMode::Import => " import path ",
            InputMode::PickPlaylist => " add to playlist ",
        }
    }
}

pub struct App {
    pub session: Session,
    pub focus: Focus,
    /// Row in the sidebar; `0` is the library, `n` is playlist `n - 1`.
    pub sidebar_selected: usize,
    /// Row in the visible (filtered) track list.
    pub track_selected: usize,
    pub mode: InputMode,
    pub input: String,
    /// Row in the playlist picker.
    pub picker_selected: usize,
    pub status: Option<String>,
    /// Whether the track cursor jumps to the playing track.
    pub follow_playback: bool,

    controls: ControlsSettings,
    library_settings: LibrarySettings,
}

impl App {
    pub fn new(
        session: Session,
        controls: ControlsSettings,
        library_settings: LibrarySettings,
        follow_playback: bool,
    ) -> Self {
        Self {
            session,
            focus: Focus::default(),
            sidebar_selected: 0,
            track_selected: 0,
            mode: InputMode::Normal,
            input: String::new(),
            picker_selected: 0,
            status: None,
            follow_playback,
            controls,
            library_settings,
        }
    }

    pub fn controls(&self) -> &ControlsSettings {
        &self.controls
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    pub fn sidebar_len(&self) -> usize {
        1 + self.session.playlists().len()
    }

    /// The source a sidebar row stands for. `Some(None)` is the library.
    pub fn sidebar_entry(&self, row: usize) -> Option<Option<PlaylistId>> {
        match row {
            0 => Some(None),
            n => self.session.playlists().list().get(n - 1).map(|p| Some(p.id)),
        }
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.session
            .visible_tracks()
            .get(self.track_selected)
            .copied()
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Sidebar => Focus::Tracks,
            Focus::Tracks => Focus::Sidebar,
        };
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor of the focused pane down, wrapping to the top.
    pub fn move_down(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_selected = wrap_next(self.sidebar_selected, self.sidebar_len());
            }
            Focus::Tracks => {
                self.follow_playback_off();
                let len = self.session.visible_tracks().len();
                self.track_selected = wrap_next(self.track_selected, len);
            }
        }
    }

    /// Move the cursor of the focused pane up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        match self.focus {
            Focus::Sidebar => {
                self.sidebar_selected = wrap_prev(self.sidebar_selected, self.sidebar_len());
            }
            Focus::Tracks => {
                self.follow_playback_off();
                let len = self.session.visible_tracks().len();
                self.track_selected = wrap_prev(self.track_selected, len);
            }
        }
    }

    /// `gg`: first row of the focused pane.
    pub fn jump_top(&mut self) {
        match self.focus {
            Focus::Sidebar => self.sidebar_selected = 0,
            Focus::Tracks => {
                self.follow_playback_off();
                self.track_selected = 0;
            }
        }
    }

    /// `G`: last row of the focused pane.
    pub fn jump_bottom(&mut self) {
        match self.focus {
            Focus::Sidebar => self.sidebar_selected = self.sidebar_len() - 1,
            Focus::Tracks => {
                self.follow_playback_off();
                self.track_selected = self.session.visible_tracks().len().saturating_sub(1);
            }
        }
    }

    pub fn move_picker_down(&mut self) {
        self.picker_selected = wrap_next(self.picker_selected, self.session.playlists().len());
    }

    pub fn move_picker_up(&mut self) {
        self.picker_selected = wrap_prev(self.picker_selected, self.session.playlists().len());
    }

    /// `enter` in normal mode: open the sidebar entry or play the track under
    /// the cursor.
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Sidebar => self.open_sidebar_entry(),
            Focus::Tracks => self.play_selected(),
        }
    }

    pub fn open_sidebar_entry(&mut self) {
        let Some(entry) = self.sidebar_entry(self.sidebar_selected) else {
            return;
        };
        match self.session.select_playlist(entry) {
            Ok(()) => {
                self.track_selected = 0;
                self.focus = Focus::Tracks;
                self.follow_current_track();
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    pub fn play_selected(&mut self) {
        let Some(track) = self.selected_track().cloned() else {
            return;
        };
        self.follow_playback_on();
        self.session.play(track);
    }

    pub fn next_track(&mut self) {
        self.follow_playback_on();
        self.session.next();
    }

    pub fn previous_track(&mut self) {
        self.follow_playback_on();
        self.session.previous();
    }

    /// Seek relative to the current position by `delta` seconds.
    pub fn seek_by(&mut self, delta: f64) {
        if self.session.playback().current_track().is_none() {
            return;
        }
        let target = self.session.state().current_time + delta;
        self.session.seek(target);
    }

    pub fn seek_forward(&mut self) {
        self.seek_by(self.controls.seek_seconds as f64);
    }

    pub fn seek_backward(&mut self) {
        self.seek_by(-(self.controls.seek_seconds as f64));
    }

    pub fn volume_up(&mut self) {
        let v = self.session.state().volume + self.controls.volume_step;
        self.session.set_volume(v);
    }

    pub fn volume_down(&mut self) {
        let v = self.session.state().volume - self.controls.volume_step;
        self.session.set_volume(v);
    }

    /// Open a text prompt. Search starts from the current query; the
    /// playlist picker needs a selected track and at least one playlist.
    pub fn start_input(&mut self, mode: InputMode) {
        match mode {
            InputMode::Normal => {
                self.cancel_input();
                return;
            }
            InputMode::Search => {
                self.input = self.session.selection().search_query.clone();
                self.focus = Focus::Tracks;
            }
            InputMode::PickPlaylist => {
                if self.selected_track().is_none() {
                    self.set_status("no track selected");
                    return;
                }
                if self.session.playlists().is_empty() {
                    self.set_status("no playlists yet, press n to create one");
                    return;
                }
                self.picker_selected = 0;
                self.input.clear();
            }
            InputMode::NewPlaylist | InputMode::Import => self.input.clear(),
        }
        debug!(?mode, "input started");
        self.mode = mode;
    }

    pub fn push_input_char(&mut self, c: char) {
        if self.mode == InputMode::PickPlaylist {
            return;
        }
        self.input.push(c);
        if self.mode == InputMode::Search {
            self.apply_search();
        }
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
        if self.mode == InputMode::Search {
            self.apply_search();
        }
    }

    fn apply_search(&mut self) {
        self.follow_playback_off();
        self.session.set_search_query(self.input.clone());
        self.track_selected = 0;
    }

    /// `esc`: leave the prompt. Escaping a search also clears the query.
    pub fn cancel_input(&mut self) {
        if self.mode == InputMode::Search {
            self.session.set_search_query("");
            self.ensure_selection_in_range();
        }
        self.mode = InputMode::Normal;
        self.input.clear();
    }

    /// `enter` inside a prompt.
    pub fn submit_input(&mut self) {
        let mode = std::mem::take(&mut self.mode);
        let input = std::mem::take(&mut self.input);
        match mode {
            InputMode::Normal | InputMode::Search => {}
            InputMode::NewPlaylist => match self.session.create_playlist(&input) {
                Ok(_) => self.set_status(format!("created playlist \"{input}\"")),
                Err(e) => self.set_status(e.to_string()),
            },
            InputMode::Import => {
                let path = input.trim();
                if path.is_empty() {
                    return;
                }
                let n = self.session.import(&[path], &self.library_settings);
                if n == 0 {
                    self.set_status(format!("no audio files found at {path}"));
                } else {
                    self.set_status(format!("imported {n} tracks"));
                }
            }
            InputMode::PickPlaylist => self.add_selected_to_picked_playlist(),
        }
    }

    fn add_selected_to_picked_playlist(&mut self) {
        let Some(track) = self.selected_track().cloned() else {
            self.set_status("no track selected");
            return;
        };
        let Some(playlist) = self.session.playlists().list().get(self.picker_selected) else {
            return;
        };
        let (id, name) = (playlist.id, playlist.name.clone());
        let title = track.title.clone();
        match self.session.add_to_playlist(id, track) {
            Ok(()) => self.set_status(format!("added \"{title}\" to \"{name}\"")),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// React to a state change published by the session.
    pub fn on_change(&mut self, change: Change) {
        match change {
            Change::Track => self.follow_current_track(),
            Change::Library | Change::Playlists | Change::Selection => {
                self.ensure_selection_in_range();
            }
            Change::Transport | Change::Position | Change::Volume | Change::Modes => {}
        }
    }

    /// With follow mode on, put the cursor on the playing track if it is
    /// visible.
    fn follow_current_track(&mut self) {
        if !self.follow_playback {
            return;
        }
        let Some(id) = self.session.playback().current_track().map(|t| t.id) else {
            return;
        };
        let pos = self
            .session
            .visible_tracks()
            .iter()
            .position(|t| t.id == id);
        if let Some(i) = pos {
            self.track_selected = i;
        }
    }

    fn ensure_selection_in_range(&mut self) {
        let len = self.session.visible_tracks().len();
        if self.track_selected >= len {
            self.track_selected = len.saturating_sub(1);
        }
        let sidebar = self.sidebar_len();
        if self.sidebar_selected >= sidebar {
            self.sidebar_selected = sidebar - 1;
        }
    }
}

fn wrap_next(current: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (current + 1) % len }
}

fn wrap_prev(current: usize, len: usize) -> usize {
    match (current, len) {
        (_, 0) => 0,
        (0, n) => n - 1,
        (i, n) => (i - 1).min(n - 1),
    }
}
