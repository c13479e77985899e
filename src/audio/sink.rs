//! Helpers for opening decoders and building `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::PlaybackError;

use super::types::FileDecoder;

/// Open and probe `path`, surfacing I/O and format errors separately.
pub(super) fn open_decoder(path: &Path) -> Result<FileDecoder, PlaybackError> {
    let file = File::open(path).map_err(|source| PlaybackError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Decoder::new(BufReader::new(file)).map_err(|source| PlaybackError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Create a paused `Sink` playing `source` from the start.
pub(super) fn create_sink(stream: &OutputStream, source: FileDecoder, volume: f32) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    sink
}

/// Reopen `path` and create a paused `Sink` starting at `start_at`.
///
/// Used when the decoder cannot seek in place, or the previous source has
/// already been drained.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
    volume: f32,
) -> Result<Sink, PlaybackError> {
    // `skip_duration` is our fallback seeking primitive; even Duration::ZERO is fine.
    let source = open_decoder(path)?.skip_duration(start_at);
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}
