use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::player::PlaybackEngine;

use super::thread::spawn_audio_thread;
use super::types::{EngineCmd, EngineEvent};

/// Playback engine backed by a dedicated rodio thread.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    /// Spawn the audio thread. The returned receiver delivers engine events
    /// to whoever runs the main loop.
    pub fn new() -> (Self, Receiver<EngineEvent>) {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let join = spawn_audio_thread(rx, event_tx);

        (
            Self {
                tx,
                join: Mutex::new(Some(join)),
            },
            event_rx,
        )
    }

    fn send(&self, cmd: EngineCmd) {
        // The audio thread only goes away on Quit or channel disconnect;
        // either way there is nobody left to tell.
        let _ = self.tx.send(cmd);
    }

    /// Ask the audio thread to exit and wait for it.
    pub fn quit(&self) {
        self.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, path: &Path) {
        self.send(EngineCmd::Load(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(EngineCmd::Play);
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause);
    }

    fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    fn set_position(&mut self, position: Duration) {
        self.send(EngineCmd::SetPosition(position));
    }
}
