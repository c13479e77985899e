//! Library module: the track model, the in-memory library store, file
//! import and search filtering.

mod display;
mod filter;
mod import;
mod model;
mod store;

pub use display::{format_duration, format_position};
pub use filter::filter_tracks;
pub use import::import_paths;
pub use model::*;
pub use store::Library;
