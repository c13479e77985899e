use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::trace;

use crate::app::{App, InputMode};
use crate::audio::PlaybackEvent;
use crate::config;
use crate::notify::Change;
use crate::ui;

/// State tracked by the event loop across iterations.
#[derive(Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Something changed since the last frame.
    pub dirty: bool,
}

/// Main terminal event loop: drains playback notifications into the session,
/// redraws on change and dispatches key presses. Returns `Ok(())` when the
/// user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    playback_events: Option<&Receiver<PlaybackEvent>>,
    changes: &Receiver<Change>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut state = EventLoopState {
        dirty: true,
        ..EventLoopState::default()
    };

    loop {
        if let Some(rx) = playback_events {
            while let Ok(ev) = rx.try_recv() {
                app.session.handle_playback_event(ev);
            }
        }

        while let Ok(change) = changes.try_recv() {
            trace!(?change, "state changed");
            app.on_change(change);
            state.dirty = true;
        }

        if state.dirty {
            terminal.draw(|f| ui::draw(f, app, &settings.ui))?;
            state.dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key_event(key, app, &mut state) {
                        return Ok(());
                    }
                    state.dirty = true;
                }
                Event::Resize(..) => state.dirty = true,
                _ => {}
            }
        }
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key_event(key: KeyEvent, app: &mut App, state: &mut EventLoopState) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match app.mode {
        InputMode::Normal => {}
        InputMode::PickPlaylist => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Enter => app.submit_input(),
                KeyCode::Char('j') | KeyCode::Down => app.move_picker_down(),
                KeyCode::Char('k') | KeyCode::Up => app.move_picker_up(),
                _ => {}
            }
            return false;
        }
        InputMode::Search | InputMode::NewPlaylist | InputMode::Import => {
            state.pending_gg = false;
            match key.code {
                KeyCode::Esc => app.cancel_input(),
                KeyCode::Enter => app.submit_input(),
                KeyCode::Backspace => app.pop_input_char(),
                KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.move_down();
                }
                KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.move_up();
                }
                KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
                _ => {}
            }
            return false;
        }
    }

    app.status = None;

    if key.code == KeyCode::Char('g') {
        if state.pending_gg {
            app.jump_top();
        }
        state.pending_gg = !state.pending_gg;
        return false;
    }
    state.pending_gg = false;

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('G') => app.jump_bottom(),
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Enter => app.activate(),
        KeyCode::Char(' ') | KeyCode::Char('p') => app.session.toggle_play_pause(),
        KeyCode::Char('l') => app.next_track(),
        KeyCode::Char('h') => app.previous_track(),
        KeyCode::Char('L') => app.seek_forward(),
        KeyCode::Char('H') => app.seek_backward(),
        KeyCode::Char('+') | KeyCode::Char('=') => app.volume_up(),
        KeyCode::Char('-') => app.volume_down(),
        KeyCode::Char('s') => app.session.toggle_shuffle(),
        KeyCode::Char('r') => app.session.toggle_repeat(),
        KeyCode::Char('/') => app.start_input(InputMode::Search),
        KeyCode::Char('n') => app.start_input(InputMode::NewPlaylist),
        KeyCode::Char('a') => app.start_input(InputMode::PickPlaylist),
        KeyCode::Char('i') => app.start_input(InputMode::Import),
        KeyCode::Esc if !app.session.selection().search_query.is_empty() => {
            app.session.set_search_query("");
        }
        _ => {}
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Session;
    use crate::config::{ControlsSettings, LibrarySettings};
    use crate::notify::Notifier;
    use crate::playback::RandomPicker;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let session = Session::new(0.5, Box::new(RandomPicker::seeded(1)), Notifier::new());
        App::new(
            session,
            ControlsSettings::default(),
            LibrarySettings::default(),
            true,
        )
    }

    #[test]
    fn q_and_ctrl_c_quit() {
        let mut app = app();
        let mut state = EventLoopState::default();
        assert!(handle_key_event(press(KeyCode::Char('q')), &mut app, &mut state));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(handle_key_event(ctrl_c, &mut app, &mut state));
    }

    #[test]
    fn q_is_text_inside_a_prompt() {
        let mut app = app();
        let mut state = EventLoopState::default();
        handle_key_event(press(KeyCode::Char('n')), &mut app, &mut state);
        assert_eq!(app.mode, InputMode::NewPlaylist);
        assert!(!handle_key_event(press(KeyCode::Char('q')), &mut app, &mut state));
        handle_key_event(press(KeyCode::Enter), &mut app, &mut state);
        assert_eq!(app.session.playlists().list()[0].name, "q");
    }

    #[test]
    fn mode_keys_toggle_flags() {
        let mut app = app();
        let mut state = EventLoopState::default();
        handle_key_event(press(KeyCode::Char('s')), &mut app, &mut state);
        handle_key_event(press(KeyCode::Char('r')), &mut app, &mut state);
        assert!(app.session.state().is_shuffle);
        assert!(app.session.state().is_repeat);
        handle_key_event(press(KeyCode::Char('-')), &mut app, &mut state);
        assert!(app.session.state().volume < 0.5);
    }

    #[test]
    fn gg_needs_two_presses() {
        let mut app = app();
        let mut state = EventLoopState::default();
        app.toggle_focus();
        app.session.create_playlist("one").unwrap();
        app.sidebar_selected = 1;

        handle_key_event(press(KeyCode::Char('g')), &mut app, &mut state);
        assert_eq!(app.sidebar_selected, 1);
        handle_key_event(press(KeyCode::Char('g')), &mut app, &mut state);
        assert_eq!(app.sidebar_selected, 0);
    }
}
