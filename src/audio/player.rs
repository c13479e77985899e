use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::info;

use crate::error::PlaybackError;
use crate::library::SourceLocator;

use super::sink::open_decoder;
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackEvent, PlaybackPrimitive};

/// `PlaybackPrimitive` backed by a `rodio` output stream on its own thread.
pub struct RodioPrimitive {
    tx: Sender<AudioCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioPrimitive {
    /// Open the default output device.
    ///
    /// Returns the primitive plus the receiving end of its notifications. The
    /// caller is expected to drain the receiver on the thread that owns the
    /// coordinator.
    pub fn spawn() -> Result<(Self, Receiver<PlaybackEvent>), PlaybackError> {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<PlaybackEvent>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let handle = spawn_audio_thread(rx, events_tx, ready_tx);
        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(msg)) => {
                let _ = handle.join();
                return Err(PlaybackError::Stream(msg));
            }
            Err(_) => {
                let _ = handle.join();
                return Err(PlaybackError::Disconnected);
            }
        }
        info!("audio output opened");

        Ok((
            Self {
                tx,
                join: Mutex::new(Some(handle)),
            },
            events_rx,
        ))
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), PlaybackError> {
        self.tx.send(cmd).map_err(|_| PlaybackError::Disconnected)
    }

    /// Fade out, stop the audio thread and wait for it.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackPrimitive for RodioPrimitive {
    fn load(&mut self, locator: &SourceLocator, generation: u64) -> Result<(), PlaybackError> {
        // Probe on the caller's thread so open/decode failures surface here.
        // A refused source still replaces the old one.
        let decoder = match open_decoder(locator.path()) {
            Ok(d) => d,
            Err(e) => {
                let _ = self.send(AudioCmd::Stop);
                return Err(e);
            }
        };
        self.send(AudioCmd::Load {
            path: locator.path().to_path_buf(),
            decoder,
            generation,
        })
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Pause)
    }

    fn seek(&mut self, secs: f64) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Seek(secs))
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), PlaybackError> {
        self.send(AudioCmd::SetVolume(volume))
    }

    fn stop(&mut self) -> Result<(), PlaybackError> {
        self.send(AudioCmd::Stop)
    }

    fn shutdown(&mut self, fade_out: Duration) {
        self.quit_softly(fade_out);
    }
}

impl Drop for RodioPrimitive {
    fn drop(&mut self) {
        self.quit_softly(Duration::ZERO);
    }
}
