//! Playlist module: named, ordered track sequences and their store.

mod model;
mod store;

pub use model::*;
pub use store::PlaylistStore;

#[cfg(test)]
mod tests;
