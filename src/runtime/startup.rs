use std::sync::mpsc::Receiver;

use tracing::{info, warn};

use crate::app::Session;
use crate::audio::{PlaybackEvent, RodioPrimitive};
use crate::config;

/// Apply the configured shuffle/repeat modes. Volume is given to the
/// session at construction.
pub fn apply_playback_defaults(session: &mut Session, settings: &config::Settings) {
    if settings.playback.shuffle {
        session.toggle_shuffle();
    }
    if settings.playback.repeat {
        session.toggle_repeat();
    }
}

/// Open the audio device and hand it to the session. Without a device the
/// player still runs; transport controls become no-ops.
pub fn attach_audio(session: &mut Session) -> Option<Receiver<PlaybackEvent>> {
    match RodioPrimitive::spawn() {
        Ok((primitive, events)) => {
            session.attach_primitive(Box::new(primitive));
            Some(events)
        }
        Err(e) => {
            warn!(error = %e, "no audio output; playback disabled");
            None
        }
    }
}

/// Import the paths given on the command line.
pub fn import_args(session: &mut Session, args: &[String], settings: &config::LibrarySettings) {
    if args.is_empty() {
        return;
    }
    let n = session.import(args, settings);
    info!(
        paths = args.len(),
        tracks = n,
        library = session.library().len(),
        "imported command-line paths"
    );
}
