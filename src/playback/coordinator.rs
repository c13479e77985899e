use std::time::Duration;

use tracing::{debug, info, trace, warn};

use crate::audio::{PlaybackEvent, PlaybackEventKind, PlaybackPrimitive};
use crate::error::PlaybackError;
use crate::library::{SourceLocator, Track, sanitize_seconds};
use crate::notify::{Change, Notifier};

use super::shuffle::IndexPicker;
use super::state::{PlaybackState, TransportState};

/// Tracks the current track and transport state, and is the only owner of the
/// playback primitive.
///
/// The active track source is passed into `next`, `previous` and
/// `handle_event` on every call so it always reflects current store contents.
/// Primitive failures are logged, never returned.
pub struct PlaybackCoordinator {
    primitive: Option<Box<dyn PlaybackPrimitive>>,
    picker: Box<dyn IndexPicker>,
    state: PlaybackState,
    /// Bumped on every load; events tagged with an older value are stale.
    generation: u64,
    /// Whether the primitive holds the current track's source.
    loaded: bool,
    notifier: Notifier,
}

impl PlaybackCoordinator {
    pub fn new(volume: f32, picker: Box<dyn IndexPicker>, notifier: Notifier) -> Self {
        let volume = if volume.is_nan() { 0.0 } else { volume.clamp(0.0, 1.0) };
        Self {
            primitive: None,
            picker,
            state: PlaybackState::new(volume),
            generation: 0,
            loaded: false,
            notifier,
        }
    }

    /// Hand the primitive over once it exists. Until then every transport
    /// operation is a silent no-op.
    pub fn attach_primitive(&mut self, mut primitive: Box<dyn PlaybackPrimitive>) {
        if let Err(e) = primitive.set_volume(self.state.volume) {
            warn!(error = %e, "failed to apply initial volume");
        }
        self.primitive = Some(primitive);
    }

    /// Fade out and release the primitive. Later transport calls are no-ops.
    pub fn shutdown(&mut self, fade_out: Duration) {
        self.loaded = false;
        if let Some(mut p) = self.primitive.take() {
            info!(fade_out_ms = fade_out.as_millis() as u64, "shutting down playback");
            p.shutdown(fade_out);
        }
        self.state.is_playing = false;
    }

    pub fn has_primitive(&self) -> bool {
        self.primitive.is_some()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn transport(&self) -> TransportState {
        self.state.transport()
    }

    #[cfg(test)]
    pub(super) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state.current_track.as_ref()
    }

    /// Load `track` and start it.
    ///
    /// The track becomes current even if the primitive is missing or refuses
    /// the source; in that case the transport is left paused.
    pub fn play(&mut self, track: Track) {
        info!(id = %track.id, title = %track.title, "playing track");
        let started = self.load_and_start(&track.source, &track.title);

        self.state.duration = sanitize_seconds(track.duration);
        self.state.current_time = 0.0;
        self.state.current_track = Some(track);
        self.state.is_playing = started;

        self.notifier.publish(Change::Track);
        self.notifier.publish(Change::Transport);
        self.notifier.publish(Change::Position);
    }

    /// Bump the generation, then load, set volume and play. On a refused
    /// source the primitive is told to stop so the previous track goes quiet.
    fn load_and_start(&mut self, source: &SourceLocator, title: &str) -> bool {
        self.generation += 1;
        self.loaded = false;

        let Some(p) = self.primitive.as_deref_mut() else {
            debug!("{}; track selected but not started", PlaybackError::PrimitiveUnavailable);
            return false;
        };
        match start(p, source, self.generation, self.state.volume) {
            Ok(()) => {
                self.loaded = true;
                true
            }
            Err(e) => {
                warn!(error = %e, title, "could not start track");
                if let Err(e) = p.stop() {
                    warn!(error = %e, "stop after failed load failed");
                }
                false
            }
        }
    }

    /// Pause playback. No-op unless currently playing.
    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        debug!("pausing playback");
        if let Some(p) = self.primitive.as_deref_mut() {
            if let Err(e) = p.pause() {
                warn!(error = %e, "pause failed");
            }
        }
        self.state.is_playing = false;
        self.notifier.publish(Change::Transport);
    }

    /// Resume the current track. No-op without a current track or primitive.
    /// A track whose source never loaded is loaded again first.
    pub fn resume(&mut self) {
        let Some(track) = self.state.current_track.as_ref() else {
            return;
        };
        if self.primitive.is_none() {
            debug!("{}; resume ignored", PlaybackError::PrimitiveUnavailable);
            return;
        }

        if !self.loaded {
            let (source, title) = (track.source.clone(), track.title.clone());
            debug!(title = %title, "reloading track before resume");
            if self.load_and_start(&source, &title) {
                self.state.current_time = 0.0;
                self.state.is_playing = true;
                self.notifier.publish(Change::Transport);
                self.notifier.publish(Change::Position);
            }
            return;
        }

        let Some(p) = self.primitive.as_deref_mut() else {
            return;
        };
        debug!("resuming playback");
        match p.play() {
            Ok(()) => {
                self.state.is_playing = true;
                self.notifier.publish(Change::Transport);
            }
            Err(e) => warn!(error = %e, "resume failed"),
        }
    }

    /// Pause when playing, otherwise resume the loaded track.
    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Jump to `secs`. The position is updated optimistically; later
    /// `TimeUpdate`s overwrite it. Negative values clamp to zero, and a known
    /// duration caps the target.
    pub fn seek(&mut self, secs: f64) {
        let Some(p) = self.primitive.as_deref_mut() else {
            debug!("{}; seek ignored", PlaybackError::PrimitiveUnavailable);
            return;
        };
        let mut target = sanitize_seconds(secs);
        if self.state.duration > 0.0 {
            target = target.min(self.state.duration);
        }
        if let Err(e) = p.seek(target) {
            warn!(error = %e, "seek failed");
        }
        self.state.current_time = target;
        self.notifier.publish(Change::Position);
    }

    /// Store and forward a volume, clamped to `[0, 1]`. NaN is ignored.
    pub fn set_volume(&mut self, volume: f32) {
        if volume.is_nan() {
            return;
        }
        let volume = volume.clamp(0.0, 1.0);
        if let Some(p) = self.primitive.as_deref_mut() {
            if let Err(e) = p.set_volume(volume) {
                warn!(error = %e, "set_volume failed");
            }
        }
        if self.state.volume != volume {
            self.state.volume = volume;
            self.notifier.publish(Change::Volume);
        }
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.is_shuffle = !self.state.is_shuffle;
        info!(shuffle = self.state.is_shuffle, "shuffle toggled");
        self.notifier.publish(Change::Modes);
    }

    pub fn toggle_repeat(&mut self) {
        self.state.is_repeat = !self.state.is_repeat;
        info!(repeat = self.state.is_repeat, "repeat toggled");
        self.notifier.publish(Change::Modes);
    }

    /// Advance within `source`. Returns whether a track was started.
    ///
    /// With shuffle on, any index may come up, including the current one.
    /// If the current track is not in `source`, the first track is used.
    pub fn next(&mut self, source: &[Track]) -> bool {
        let Some(current) = self.position_in(source) else {
            return false;
        };
        let len = source.len();
        let idx = if self.state.is_shuffle {
            self.picker.pick(len).min(len - 1)
        } else {
            match current {
                Some(i) => (i + 1) % len,
                None => 0,
            }
        };
        debug!(idx, len, shuffle = self.state.is_shuffle, "next track");
        self.play(source[idx].clone());
        true
    }

    /// Step back within `source`, wrapping to the end. Shuffle is ignored.
    /// If the current track is not in `source`, the last track is used.
    pub fn previous(&mut self, source: &[Track]) -> bool {
        let Some(current) = self.position_in(source) else {
            return false;
        };
        let len = source.len();
        let idx = match current {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        debug!(idx, len, "previous track");
        self.play(source[idx].clone());
        true
    }

    /// `None` when there is nothing to navigate (empty source or no current
    /// track), otherwise the current track's index in `source`, if present.
    fn position_in(&self, source: &[Track]) -> Option<Option<usize>> {
        let current = self.state.current_track.as_ref()?;
        if source.is_empty() {
            return None;
        }
        Some(source.iter().position(|t| t.id == current.id))
    }

    /// Apply a primitive notification. `source` is the active track source,
    /// used when an ended track advances.
    pub fn handle_event(&mut self, event: PlaybackEvent, source: &[Track]) {
        if event.generation != self.generation {
            trace!(
                event_generation = event.generation,
                current = self.generation,
                "dropping stale playback event"
            );
            return;
        }

        match event.kind {
            PlaybackEventKind::TimeUpdate(t) => {
                let mut t = sanitize_seconds(t);
                if self.state.duration > 0.0 {
                    t = t.min(self.state.duration);
                }
                self.state.current_time = t;
                self.notifier.publish(Change::Position);
            }
            PlaybackEventKind::MetadataLoaded(d) => {
                self.state.duration = sanitize_seconds(d);
                if self.state.duration > 0.0 && self.state.current_time > self.state.duration {
                    self.state.current_time = self.state.duration;
                }
                self.notifier.publish(Change::Position);
            }
            PlaybackEventKind::Ended => self.on_ended(source),
        }
    }

    fn on_ended(&mut self, source: &[Track]) {
        if self.state.is_repeat {
            // Restart in place; the current track stays the same.
            let Some(p) = self.primitive.as_deref_mut() else {
                return;
            };
            debug!("repeating current track");
            let restarted = p.seek(0.0).and_then(|()| p.play());
            if let Err(e) = restarted {
                warn!(error = %e, "repeat failed");
                self.state.is_playing = false;
            }
            self.state.current_time = 0.0;
            self.notifier.publish(Change::Position);
            self.notifier.publish(Change::Transport);
            return;
        }

        if !self.next(source) && self.state.is_playing {
            // Nothing to advance to; the primitive has stopped on its own.
            self.state.is_playing = false;
            self.notifier.publish(Change::Transport);
        }
    }
}

fn start(
    p: &mut dyn PlaybackPrimitive,
    source: &SourceLocator,
    generation: u64,
    volume: f32,
) -> Result<(), PlaybackError> {
    p.load(source, generation)?;
    p.set_volume(volume)?;
    p.play()
}
