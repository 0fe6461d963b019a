//! rodio-backed playback engine.
//!
//! Commands are fire-and-forget over a channel to a dedicated audio thread;
//! position, duration, end-of-media and decode failures come back as
//! `EngineEvent`s on a second channel.

mod engine;
mod sink;
mod thread;
mod types;

pub use engine::RodioEngine;
pub use types::EngineEvent;
