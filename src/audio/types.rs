//! Playback primitive trait, notifications and audio-thread commands.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

use rodio::Decoder;

use crate::error::PlaybackError;
use crate::library::SourceLocator;

/// Notification payloads emitted by a playback primitive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PlaybackEventKind {
    /// Current position in seconds.
    TimeUpdate(f64),
    /// Total duration in seconds, once known.
    MetadataLoaded(f64),
    /// The loaded source played to its end.
    Ended,
}

/// A notification tagged with the generation of the `load` it belongs to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaybackEvent {
    pub generation: u64,
    pub kind: PlaybackEventKind,
}

/// Opaque capability that decodes and outputs audio.
///
/// Calls return immediately; the effect is observed later through
/// `PlaybackEvent`s. Loading a new source abandons the previous one.
pub trait PlaybackPrimitive {
    /// Replace the current source. Events for it carry `generation`.
    fn load(&mut self, locator: &SourceLocator, generation: u64) -> Result<(), PlaybackError>;
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
    /// Move the playback position to `secs` from the start.
    fn seek(&mut self, secs: f64) -> Result<(), PlaybackError>;
    /// `volume` is in `[0, 1]`.
    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError>;
    /// Drop the current source so nothing keeps sounding.
    fn stop(&mut self) -> Result<(), PlaybackError>;
    /// Stop output for good, fading out over `fade_out`.
    fn shutdown(&mut self, _fade_out: Duration) {}
}

pub(super) type FileDecoder = Decoder<BufReader<File>>;

pub(super) enum AudioCmd {
    /// Swap in a freshly opened source, paused.
    Load {
        path: PathBuf,
        decoder: FileDecoder,
        generation: u64,
    },
    Play,
    Pause,
    /// Stop and forget the current source.
    Stop,
    /// Absolute position in seconds.
    Seek(f64),
    SetVolume(f32),
    /// Stop the thread, fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}
