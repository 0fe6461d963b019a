//! Controller-facing traits and small types.

use std::fmt;
use std::path::Path;
use std::time::Duration;

/// How the next track is picked when one ends.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayMode {
    /// Top to bottom, stop after the last track.
    Sequential,
    /// Uniformly random pick; repeats are allowed.
    Shuffle,
    /// Top to bottom, wrap around at the end.
    RepeatAll,
}

impl Default for PlayMode {
    fn default() -> Self {
        Self::Sequential
    }
}

impl PlayMode {
    /// The mode after this one in the selector cycle.
    pub fn cycled(self) -> Self {
        match self {
            Self::Sequential => Self::Shuffle,
            Self::Shuffle => Self::RepeatAll,
            Self::RepeatAll => Self::Sequential,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sequential => "Sequential",
            Self::Shuffle => "Shuffle",
            Self::RepeatAll => "Repeat-all",
        }
    }
}

/// Commands the controller issues to the playback backend.
///
/// All of them are fire-and-forget: completions (position, duration, end of
/// media, errors) come back asynchronously as engine events.
pub trait PlaybackEngine {
    fn load(&mut self, path: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn stop(&mut self);
    fn set_position(&mut self, position: Duration);
}

/// What the controller needs from a playlist view.
pub trait View {
    /// Replace the rendered list with `names`, in order.
    fn render_playlist(&mut self, names: &[String]);
    /// Highlight the row of the current track, or nothing.
    fn set_highlighted(&mut self, index: Option<usize>);
    fn set_status(&mut self, text: &str);
    fn set_progress_range(&mut self, total: Duration);
    fn set_progress_value(&mut self, position: Duration);
}

/// Controller-level failures. Always recovered locally and surfaced as a
/// status message; nothing here can take the process down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerError {
    OutOfRange,
    NoSelection,
    EmptyPlaylist,
    Engine(String),
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange => write!(f, "No such track"),
            Self::NoSelection => write!(f, "No track selected"),
            Self::EmptyPlaylist => write!(f, "The playlist is empty"),
            Self::Engine(msg) => write!(f, "Playback error: {msg}"),
        }
    }
}

impl std::error::Error for PlayerError {}
