use std::env;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, Session};
use crate::logging;
use crate::notify::Notifier;
use crate::playback::RandomPicker;

mod event_loop;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(Some(path)) => info!(log = %path.display(), "encore starting"),
        Ok(None) => {}
        Err(e) => eprintln!("encore: logging disabled: {e}"),
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let mut session = Session::new(
        settings.playback.volume,
        Box::new(RandomPicker::from_entropy()),
        Notifier::new(),
    );
    startup::apply_playback_defaults(&mut session, &settings);

    let paths: Vec<String> = env::args().skip(1).collect();
    startup::import_args(&mut session, &paths, &settings.library);

    let playback_events = startup::attach_audio(&mut session);
    let changes = session.subscribe();

    let mut app = App::new(
        session,
        settings.controls.clone(),
        settings.library.clone(),
        settings.ui.follow_playback,
    );

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        playback_events.as_ref(),
        &changes,
    );

    app.session
        .shutdown(Duration::from_millis(settings.audio.quit_fade_out_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    match &run_result {
        Ok(()) => info!("encore exiting"),
        Err(e) => warn!(error = %e, "event loop failed"),
    }
    run_result
}
