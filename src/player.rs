//! Playlist/playback-state synchronization.
//!
//! `Controller` owns the playlist and the notion of a "current" track and
//! drives an injected playback engine and view. It is the only place that
//! mutates either; everything it does runs on the main loop thread.

mod controller;
mod types;

pub use controller::Controller;
pub use types::{PlayMode, PlaybackEngine, PlayerError, View};

#[cfg(test)]
mod tests;
