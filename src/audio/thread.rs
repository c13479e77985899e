use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use rodio::{OutputStreamBuilder, Sink, Source};
use tracing::{debug, info, warn};

use super::sink::{create_sink, create_sink_at};
use super::types::{AudioCmd, PlaybackEvent, PlaybackEventKind};

const TICK: Duration = Duration::from_millis(200);

/// State owned by the audio thread for the currently loaded source.
struct Loaded {
    path: PathBuf,
    generation: u64,
    sink: Sink,
    paused: bool,
    ended: bool,
}

fn emit(events: &Sender<PlaybackEvent>, generation: u64, kind: PlaybackEventKind) {
    // The UI may already be gone during shutdown.
    let _ = events.send(PlaybackEvent { generation, kind });
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

/// Spawn the thread that owns the output stream.
///
/// `ready` receives `Ok(())` once the device is open, or the error text if it
/// could not be opened (in which case the thread exits).
pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<PlaybackEvent>,
    ready: Sender<Result<(), String>>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = ready.send(Err(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would
        // scribble over the TUI.
        stream.log_on_drop(false);
        let _ = ready.send(Ok(()));

        let mut volume: f32 = 1.0;
        let mut current: Option<Loaded> = None;

        loop {
            match rx.recv_timeout(TICK) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load {
                        path,
                        decoder,
                        generation,
                    } => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                        }
                        let total = decoder
                            .total_duration()
                            .map(|d| d.as_secs_f64())
                            .unwrap_or(0.0);
                        let sink = create_sink(&stream, decoder, volume);
                        debug!(path = %path.display(), generation, "loaded source");
                        emit(&events, generation, PlaybackEventKind::MetadataLoaded(total));
                        emit(&events, generation, PlaybackEventKind::TimeUpdate(0.0));
                        current = Some(Loaded {
                            path,
                            generation,
                            sink,
                            paused: true,
                            ended: false,
                        });
                    }

                    AudioCmd::Play => {
                        if let Some(ref mut cur) = current {
                            cur.sink.play();
                            cur.paused = false;
                        }
                    }

                    AudioCmd::Pause => {
                        if let Some(ref mut cur) = current {
                            cur.sink.pause();
                            cur.paused = true;
                        }
                    }

                    AudioCmd::Stop => {
                        if let Some(old) = current.take() {
                            old.sink.stop();
                            debug!(path = %old.path.display(), "source unloaded");
                        }
                    }

                    AudioCmd::Seek(secs) => {
                        let Some(ref mut cur) = current else {
                            continue;
                        };
                        let target = Duration::from_secs_f64(secs.max(0.0));

                        // A drained sink has nothing left to seek in; rebuild it.
                        let seeked_in_place = !cur.sink.empty() && cur.sink.try_seek(target).is_ok();
                        if !seeked_in_place {
                            match create_sink_at(&stream, &cur.path, target, volume) {
                                Ok(new_sink) => {
                                    cur.sink.stop();
                                    if !cur.paused {
                                        new_sink.play();
                                    }
                                    cur.sink = new_sink;
                                }
                                Err(e) => {
                                    warn!(error = %e, "seek by reopening failed");
                                    continue;
                                }
                            }
                        }
                        cur.ended = false;
                        emit(
                            &events,
                            cur.generation,
                            PlaybackEventKind::TimeUpdate(target.as_secs_f64()),
                        );
                    }

                    AudioCmd::SetVolume(v) => {
                        volume = v.clamp(0.0, 1.0);
                        if let Some(ref cur) = current {
                            cur.sink.set_volume(volume);
                        }
                    }

                    AudioCmd::Quit { fade_out_ms } => {
                        if let Some(ref cur) = current {
                            if !cur.paused {
                                fade_out_sink(&cur.sink, fade_out_ms);
                            }
                            cur.sink.stop();
                        }
                        info!("audio thread stopping");
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic progress report and end-of-source detection.
                    if let Some(ref mut cur) = current {
                        if cur.paused || cur.ended {
                            continue;
                        }
                        if cur.sink.empty() {
                            cur.ended = true;
                            emit(&events, cur.generation, PlaybackEventKind::Ended);
                        } else {
                            let pos = cur.sink.get_pos().as_secs_f64();
                            emit(&events, cur.generation, PlaybackEventKind::TimeUpdate(pos));
                        }
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
