//! The playlist model: an ordered, duplicate-free (by path) list of tracks.

mod model;

pub use model::Playlist;

#[cfg(test)]
mod tests;
