//! Application module: the `Session` that owns all player state, and the
//! `App` view model the TUI and runtime drive it through.

mod model;
mod session;

pub use model::*;
pub use session::{LIBRARY_NAME, Session};
