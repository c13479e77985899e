//! UI rendering for the terminal user interface.
//!
//! Everything here reads from `App`; nothing mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Padding, Paragraph},
};

use crate::app::{App, Focus, InputMode, LIBRARY_NAME};
use crate::config::{ControlsSettings, UiSettings};
use crate::library::{format_duration, format_position};
use crate::playback::TransportState;

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Key hints shown in the footer, incorporating the configured steps.
fn control_hints(controls: &ControlsSettings) -> Vec<String> {
    vec![
        "[j/k] up/down".to_string(),
        "[tab] switch pane".to_string(),
        "[enter] open/play".to_string(),
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}s", controls.seek_seconds),
        "[-/+] volume".to_string(),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        "[/] search".to_string(),
        "[n] new playlist".to_string(),
        "[a] add to playlist".to_string(),
        "[i] import".to_string(),
        "[q] quit".to_string(),
    ]
}

/// Pack the key hints into rows no wider than `width` columns. A hint wider
/// than `width` gets a row of its own.
fn controls_lines(controls: &ControlsSettings, width: usize) -> Vec<String> {
    const SEP: &str = " | ";
    let mut rows: Vec<String> = Vec::new();
    for hint in control_hints(controls) {
        match rows.last_mut() {
            Some(row) if row.chars().count() + SEP.len() + hint.chars().count() <= width => {
                row.push_str(SEP);
                row.push_str(&hint);
            }
            _ => rows.push(hint),
        }
    }
    rows
}

/// Row shown in place of an empty track list.
fn empty_list_hint(library_empty: bool) -> &'static str {
    if library_empty {
        "library is empty, press i to import"
    } else {
        "no tracks here"
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Window `[start, end)` of `total` rows that keeps `selected` centered in
/// `height` rows where possible, plus the selection's offset in the window.
fn visible_window(total: usize, selected: usize, height: usize) -> (usize, usize, usize) {
    if total <= height || height == 0 {
        return (0, total, selected);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, selected - start)
}

fn focused_block(title: String, focused: bool) -> Block<'static> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.session.selection().current_playlist;

    let mut items = vec![{
        let item = ListItem::new(format!("Home · {LIBRARY_NAME}"));
        if active.is_none() { item.bold() } else { item }
    }];
    items.extend(app.session.playlists().list().iter().map(|p| {
        let item = ListItem::new(format!("{} ({})", p.name, p.tracks.len()));
        if active == Some(p.id) { item.bold() } else { item }
    }));

    let focused = app.focus == Focus::Sidebar;
    let list = List::new(items)
        .block(focused_block(" playlists ".to_string(), focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.sidebar_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tracks(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.session.visible_tracks();
    let playing = app.session.playback().current_track().map(|t| t.id);

    let total = visible.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let selected = app.track_selected.min(total.saturating_sub(1));
    let (start, end, selected_in_window) = visible_window(total, selected, list_height);

    // Only build items for the rows that fit.
    let mut items: Vec<ListItem> = visible[start..end]
        .iter()
        .map(|t| {
            let marker = if playing == Some(t.id) { "♪ " } else { "  " };
            let line = Line::from(vec![
                Span::raw(marker),
                Span::raw(t.title.as_str()).bold(),
                Span::raw(format!("  {} · {}", t.artist, t.album)).dim(),
                Span::raw(format!("  {}", format_duration(t.duration))),
            ]);
            ListItem::new(line)
        })
        .collect();
    if items.is_empty() {
        let hint = empty_list_hint(app.session.library().is_empty());
        items.push(ListItem::new(hint).dim());
    }

    let mut title = format!(
        " {} · {} songs ",
        app.session.active_source_name(),
        app.session.active_tracks().len()
    );
    let query = app.session.selection().search_query.trim();
    if !query.is_empty() {
        title.push_str(&format!("· filter: {query} ({total}) "));
    }

    let focused = app.focus == Focus::Tracks;
    let list = List::new(items)
        .block(focused_block(title, focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(selected_in_window));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_now_playing(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.session.state();

    let block = Block::bordered().padding(LEFT_PAD).title(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let transport = match state.transport() {
        TransportState::Idle => "Stopped",
        TransportState::Paused => "Paused",
        TransportState::Playing => "Playing",
    };
    let song = match &state.current_track {
        Some(t) => Line::from(vec![
            Span::raw(format!("{transport}: ")),
            Span::raw(t.title.as_str()).bold(),
            Span::raw(format!(" - {} · {}", t.artist, t.album)),
        ]),
        None => Line::from("Nothing playing"),
    };
    frame.render_widget(Paragraph::new(song), rows[0]);

    let label = format!(
        "{} / {}",
        format_position(state.current_time),
        format_duration(state.duration)
    );
    let gauge = Gauge::default()
        .ratio(state.progress())
        .label(label)
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(gauge, rows[1]);

    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    let flags = format!(
        "Volume: {:>3}% • Shuffle: {} • Repeat: {} • Cursor: {}{}",
        (state.volume * 100.0).round() as u32,
        on_off(state.is_shuffle),
        on_off(state.is_repeat),
        if app.follow_playback { "Follow" } else { "Free-roam" },
        if app.session.playback().has_primitive() { "" } else { " • no audio device" },
    );
    frame.render_widget(Paragraph::new(flags), rows[2]);
}

fn draw_prompt(frame: &mut Frame, app: &App, area: Rect) {
    match app.mode {
        InputMode::Normal => {}
        InputMode::PickPlaylist => {
            let names = app.session.playlists().list();
            let height = (names.len() as u16).saturating_add(2);
            let popup = centered_rect_sized(40, height, area);
            frame.render_widget(Clear, popup);

            let items: Vec<ListItem> = names
                .iter()
                .map(|p| ListItem::new(p.name.as_str()))
                .collect();
            let list = List::new(items)
                .block(Block::bordered().title(InputMode::PickPlaylist.prompt()))
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(app.picker_selected));
            frame.render_stateful_widget(list, popup, &mut state);
        }
        mode => {
            let popup = centered_rect_sized(60, 3, area);
            frame.render_widget(Clear, popup);
            let input = Paragraph::new(format!("{}_", app.input))
                .block(Block::bordered().padding(LEFT_PAD).title(mode.prompt()));
            frame.render_widget(input, popup);
        }
    }
}

/// Render the entire UI into `frame` from `app` state.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    // Borders take two columns and the left padding one more.
    let footer_width = frame.area().width.saturating_sub(3) as usize;
    let mut footer_lines = Vec::new();
    if let Some(msg) = &app.status {
        footer_lines.push(Line::from(msg.as_str()).bold());
    }
    footer_lines.extend(
        controls_lines(app.controls(), footer_width)
            .into_iter()
            .map(Line::from),
    );
    let footer_height = (footer_lines.len() as u16).saturating_add(2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(5),
            Constraint::Length(footer_height),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(20)])
        .split(chunks[1]);
    draw_sidebar(frame, app, body[0]);
    draw_tracks(frame, app, body[1]);

    draw_now_playing(frame, app, chunks[2]);

    let footer = Paragraph::new(footer_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" controls ")
            .padding(LEFT_PAD),
    );
    frame.render_widget(footer, chunks[3]);

    draw_prompt(frame, app, chunks[1]);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::app::Session;
    use crate::config::LibrarySettings;
    use crate::notify::Notifier;
    use crate::playback::RandomPicker;

    #[test]
    fn window_centers_selection_in_long_lists() {
        assert_eq!(visible_window(5, 3, 10), (0, 5, 3));
        assert_eq!(visible_window(100, 50, 10), (45, 55, 5));
        assert_eq!(visible_window(100, 2, 10), (0, 10, 2));
        assert_eq!(visible_window(100, 99, 10), (90, 100, 9));
    }

    #[test]
    fn controls_mention_configured_seek_step() {
        let controls = ControlsSettings {
            seek_seconds: 12,
            ..ControlsSettings::default()
        };
        let rows = controls_lines(&controls, 200);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains("seek -/+12s"));
    }

    #[test]
    fn controls_wrap_at_hint_boundaries() {
        let controls = ControlsSettings::default();
        let rows = controls_lines(&controls, 40);
        assert!(rows.len() > 1);
        assert!(rows.iter().all(|r| r.chars().count() <= 40));
        assert_eq!(rows[0], "[j/k] up/down | [tab] switch pane");
        assert!(rows.last().is_some_and(|r| r.ends_with("[q] quit")));

        let joined = rows.join(" | ");
        assert_eq!(joined, control_hints(&controls).join(" | "));
    }

    fn render(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| draw(f, app, &UiSettings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn empty_app() -> App {
        let session = Session::new(0.5, Box::new(RandomPicker::seeded(1)), Notifier::new());
        App::new(
            session,
            ControlsSettings::default(),
            LibrarySettings::default(),
            true,
        )
    }

    #[test]
    fn footer_shows_status_and_every_control_hint() {
        let mut app = empty_app();
        app.set_status("imported 3 tracks");
        let screen = render(&app, 80, 40);

        assert!(screen.contains("imported 3 tracks"));
        assert!(screen.contains("[j/k] up/down"));
        assert!(screen.contains("[q] quit"));
    }

    #[test]
    fn empty_library_shows_import_hint() {
        let app = empty_app();
        assert!(render(&app, 100, 30).contains(empty_list_hint(true)));
    }
}
