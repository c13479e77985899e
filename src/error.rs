//! Error types shared by the stores and the playback backend.

use std::path::PathBuf;

use thiserror::Error;

use crate::playlist::PlaylistId;

/// Failures of library/playlist mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Playlist name was empty or whitespace only.
    #[error("playlist name cannot be empty")]
    InvalidName,

    /// No playlist with this id exists.
    #[error("playlist {0} not found")]
    PlaylistNotFound(PlaylistId),
}

/// Failures reported by a playback primitive.
///
/// The coordinator never propagates these to its callers; it logs them and
/// carries on.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No primitive is attached yet (e.g. no audio device).
    #[error("playback primitive unavailable")]
    PrimitiveUnavailable,

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// The output stream could not be opened.
    #[error("audio output error: {0}")]
    Stream(String),

    /// The audio thread is gone.
    #[error("audio thread disconnected")]
    Disconnected,
}
