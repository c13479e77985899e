mod app;
mod audio;
mod config;
mod error;
mod library;
mod logging;
mod notify;
mod playback;
mod playlist;
mod runtime;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
