use std::path::PathBuf;
use std::time::Duration;

/// Commands accepted by the audio thread.
#[derive(Debug)]
pub(super) enum EngineCmd {
    /// Replace the current source with the file at this path, paused.
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    /// Absolute seek into the current source.
    SetPosition(Duration),
    /// Exit the audio thread.
    Quit,
}

/// Asynchronous completions reported by the audio thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PositionChanged(Duration),
    DurationChanged(Duration),
    EndOfMedia,
    /// Opaque failure, e.g. an unreadable or undecodable file.
    Error(String),
}
