use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::Rng;

use crate::config::LibrarySettings;
use crate::library::{self, Track};
use crate::playlist::Playlist;

use super::types::{PlayMode, PlaybackEngine, PlayerError, View};

/// Owns the playlist and the "current track" notion, and keeps an injected
/// playback engine and view in sync with both.
///
/// The controller does not mirror the engine's playing/paused state; it only
/// tracks which track is current and forwards commands. The current track is
/// identified by path, and its index is re-derived by linear scan whenever it
/// is needed, so playlist mutation can never leave a stale index behind.
pub struct Controller<E: PlaybackEngine, V: View> {
    playlist: Playlist,
    mode: PlayMode,
    current: Option<PathBuf>,
    library: LibrarySettings,
    engine: E,
    view: V,
}

impl<E: PlaybackEngine, V: View> Controller<E, V> {
    pub fn new(engine: E, view: V, mode: PlayMode, library: LibrarySettings) -> Self {
        Self {
            playlist: Playlist::new(),
            mode,
            current: None,
            library,
            engine,
            view,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn mode(&self) -> PlayMode {
        self.mode
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Index of the current track in the playlist, if it is still there.
    pub fn current_index(&self) -> Option<usize> {
        self.current
            .as_deref()
            .and_then(|p| self.playlist.index_of(p))
    }

    /// Display name of the current track.
    pub fn current_name(&self) -> Option<String> {
        self.current_index()
            .and_then(|i| self.playlist.get(i))
            .map(|t| t.display.clone())
    }

    /// Append each path not already present, in input order. Returns the
    /// number of tracks actually added; empty input is fine.
    pub fn add_paths(&mut self, paths: &[PathBuf]) -> usize {
        let added = self.append_new(paths);
        self.view.set_status(&format!("Added {added} track(s)"));
        added
    }

    /// List audio files directly inside `dir` and add them. Zero additions
    /// (all duplicates vs. no matching files) is only distinguishable via
    /// the returned count, never an error.
    pub fn add_from_folder(&mut self, dir: &Path) -> usize {
        let paths = library::list_folder(dir, &self.library);
        let added = self.append_new(&paths);
        if added > 0 {
            self.view.set_status(&format!("Added {added} track(s)"));
        } else {
            self.view.set_status("No new tracks added");
        }
        added
    }

    fn append_new(&mut self, paths: &[PathBuf]) -> usize {
        let mut added = 0;
        for path in paths {
            if self.playlist.push(Track::from_path(path)) {
                added += 1;
            }
        }
        if added > 0 {
            self.sync_view();
        }
        added
    }

    /// Remove the track at `index`.
    ///
    /// Removing the current track stops playback and clears it; otherwise
    /// the highlight is re-derived so it follows the current track to its
    /// shifted position.
    pub fn remove(&mut self, index: usize) -> Result<(), PlayerError> {
        let was_current = self
            .current
            .as_deref()
            .zip(self.playlist.get(index))
            .is_some_and(|(cur, t)| cur == t.path.as_path());

        let Some(removed) = self.playlist.remove(index) else {
            return self.fail(PlayerError::OutOfRange);
        };

        if was_current {
            self.engine.stop();
            self.current = None;
            self.view.set_progress_value(Duration::ZERO);
        }

        self.sync_view();
        self.view.set_status(&format!("Removed {}", removed.display));
        Ok(())
    }

    /// Start or resume playback.
    ///
    /// `Some(index)` plays that row, loading it first unless it is already
    /// the current track. `None` resumes the current track, or fails with
    /// `NoSelection` when there is none.
    pub fn play(&mut self, index: Option<usize>) -> Result<(), PlayerError> {
        match index {
            Some(i) => {
                if self.playlist.is_empty() {
                    return self.fail(PlayerError::EmptyPlaylist);
                }
                let Some(track) = self.playlist.get(i) else {
                    return self.fail(PlayerError::OutOfRange);
                };
                let already_current = self.current.as_deref() == Some(track.path.as_path());
                if already_current {
                    self.engine.play();
                    self.announce(i);
                } else {
                    self.start(i);
                }
                Ok(())
            }
            None => match self.current_index() {
                Some(i) => {
                    self.engine.play();
                    self.announce(i);
                    Ok(())
                }
                None => self.fail(PlayerError::NoSelection),
            },
        }
    }

    pub fn pause(&mut self) {
        self.engine.pause();
        self.view.set_status("Paused");
    }

    /// Stop playback, clear the current track and un-highlight the view.
    pub fn stop(&mut self) {
        self.engine.stop();
        self.current = None;
        self.view.set_highlighted(None);
        self.view.set_progress_value(Duration::ZERO);
        self.view.set_status("Stopped");
    }

    /// End-of-media signal from the engine.
    pub fn on_track_ended(&mut self) {
        self.advance();
    }

    /// Pick and start the next track per the current mode.
    ///
    /// A current track that is no longer in the playlist counts as "no
    /// current" and stops playback instead of indexing into nowhere.
    pub fn advance(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }

        match self.mode {
            PlayMode::Shuffle => {
                let next = rand::rng().random_range(0..len);
                self.start(next);
            }
            PlayMode::Sequential => match self.current_index() {
                Some(i) if i + 1 < len => self.start(i + 1),
                _ => self.stop(),
            },
            PlayMode::RepeatAll => match self.current_index() {
                Some(i) => self.start((i + 1) % len),
                None => self.stop(),
            },
        }
    }

    /// Absolute seek, straight through to the engine.
    pub fn seek(&mut self, position: Duration) {
        self.engine.set_position(position);
    }

    pub fn set_mode(&mut self, mode: PlayMode) {
        self.mode = mode;
        self.view.set_status(&format!("Mode: {}", mode.label()));
    }

    pub fn cycle_mode(&mut self) {
        self.set_mode(self.mode.cycled());
    }

    pub fn on_position_changed(&mut self, position: Duration) {
        self.view.set_progress_value(position);
    }

    pub fn on_duration_changed(&mut self, total: Duration) {
        self.view.set_progress_range(total);
    }

    /// Engine failures are opaque; they only become a status line.
    pub fn on_engine_error(&mut self, message: &str) {
        let err = PlayerError::Engine(message.to_string());
        self.view.set_status(&err.to_string());
    }

    /// Load and play the track at `index`, unconditionally reloading. Used
    /// for selecting a new track and for auto-advance, where the previous
    /// source has been consumed and a plain resume would go nowhere.
    fn start(&mut self, index: usize) {
        let Some(track) = self.playlist.get(index) else {
            return;
        };
        let path = track.path.clone();
        self.engine.load(&path);
        self.engine.play();
        self.current = Some(path);
        self.announce(index);
    }

    fn announce(&mut self, index: usize) {
        let name = self
            .playlist
            .get(index)
            .map(|t| t.display.clone())
            .unwrap_or_default();
        self.view.set_highlighted(Some(index));
        self.view.set_status(&format!("Playing: {name}"));
    }

    fn fail(&mut self, err: PlayerError) -> Result<(), PlayerError> {
        self.view.set_status(&err.to_string());
        Err(err)
    }

    /// Re-render the list and re-derive the highlight from the current path.
    fn sync_view(&mut self) {
        let names = self.playlist.names();
        self.view.render_playlist(&names);
        let highlighted = self.current_index();
        self.view.set_highlighted(highlighted);
    }
}
