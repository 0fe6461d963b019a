use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::file::AudioFile;
use lofty::probe::Probe;
use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{EngineCmd, EngineEvent};

/// Total duration of the file, via its tag header. `None` when unreadable;
/// the decoder itself will complain about those on `Load`.
fn probe_duration(path: &Path) -> Option<Duration> {
    Probe::open(path)
        .and_then(|p| p.read())
        .ok()
        .map(|tagged| tagged.properties().duration())
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(s) => s,
            Err(e) => {
                let _ = events.send(EngineEvent::Error(format!("no audio output device: {e}")));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in
        // debugging, but noisy for a TUI app.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut loaded: Option<PathBuf> = None;
        let mut paused = true;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(cmd) => match cmd {
                    EngineCmd::Load(path) => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink_at(&stream, &path, Duration::ZERO) {
                            Ok(new_sink) => {
                                let total = probe_duration(&path).unwrap_or(Duration::ZERO);
                                sink = Some(new_sink);
                                paused = true;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                loaded = Some(path);
                                let _ = events.send(EngineEvent::DurationChanged(total));
                                let _ =
                                    events.send(EngineEvent::PositionChanged(Duration::ZERO));
                            }
                            Err(msg) => {
                                sink = None;
                                loaded = None;
                                paused = true;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                let _ = events.send(EngineEvent::Error(msg));
                            }
                        }
                    }
                    EngineCmd::Play => {
                        if let Some(s) = sink.as_ref() {
                            if paused {
                                s.play();
                                paused = false;
                                started_at = Some(Instant::now());
                            }
                        }
                    }
                    EngineCmd::Pause => {
                        if let Some(s) = sink.as_ref() {
                            if !paused {
                                s.pause();
                                if let Some(st) = started_at {
                                    accumulated += st.elapsed();
                                }
                                started_at = None;
                                paused = true;
                            }
                        }
                    }
                    EngineCmd::Stop => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        sink = None;
                        loaded = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                    }
                    EngineCmd::SetPosition(pos) => {
                        // Scrubbing: rebuild the sink and skip into the file.
                        let Some(path) = loaded.clone() else {
                            continue;
                        };
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        match create_sink_at(&stream, &path, pos) {
                            Ok(new_sink) => {
                                if paused {
                                    started_at = None;
                                } else {
                                    new_sink.play();
                                    started_at = Some(Instant::now());
                                }
                                sink = Some(new_sink);
                                accumulated = pos;
                                let _ = events.send(EngineEvent::PositionChanged(pos));
                            }
                            Err(msg) => {
                                sink = None;
                                loaded = None;
                                paused = true;
                                started_at = None;
                                accumulated = Duration::ZERO;
                                let _ = events.send(EngineEvent::Error(msg));
                            }
                        }
                    }
                    EngineCmd::Quit => break,
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic position report + end-of-media detection.
                    let finished = match sink.as_ref() {
                        Some(s) if !paused => s.empty(),
                        _ => false,
                    };
                    if finished {
                        sink = None;
                        loaded = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        let _ = events.send(EngineEvent::EndOfMedia);
                    } else if sink.is_some() && !paused {
                        let pos =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        let _ = events.send(EngineEvent::PositionChanged(pos));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}
