//! Playback module: the coordinator state machine that drives a
//! `PlaybackPrimitive`, and the injectable shuffle source.

mod coordinator;
mod shuffle;
mod state;

pub use coordinator::PlaybackCoordinator;
pub use shuffle::{IndexPicker, RandomPicker};
pub use state::{PlaybackState, TransportState};
