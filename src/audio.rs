//! Audio module: the playback primitive seam and its `rodio` implementation.
//!
//! The coordinator only talks to `PlaybackPrimitive`. `RodioPrimitive` runs a
//! dedicated audio thread and reports progress back as `PlaybackEvent`s.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioPrimitive;
pub use types::*;
