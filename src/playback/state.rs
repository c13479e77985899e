use crate::library::Track;

/// Coarse transport state of the coordinator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TransportState {
    /// Nothing loaded.
    #[default]
    Idle,
    Paused,
    Playing,
}

/// Observable playback state.
///
/// `is_playing` is never true while `current_track` is `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub is_playing: bool,
    /// Seconds into the current track.
    pub current_time: f64,
    /// Seconds; `0.0` until the primitive reports metadata.
    pub duration: f64,
    /// In `[0, 1]`.
    pub volume: f32,
    pub is_shuffle: bool,
    pub is_repeat: bool,
}

impl PlaybackState {
    pub fn new(volume: f32) -> Self {
        Self {
            current_track: None,
            is_playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume,
            is_shuffle: false,
            is_repeat: false,
        }
    }

    pub fn transport(&self) -> TransportState {
        match (&self.current_track, self.is_playing) {
            (None, _) => TransportState::Idle,
            (Some(_), true) => TransportState::Playing,
            (Some(_), false) => TransportState::Paused,
        }
    }

    /// Playback progress in `[0, 1]`, or `0` while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.current_time / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new(0.7)
    }
}
