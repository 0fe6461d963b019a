//! Track discovery and naming.
//!
//! A `Track` pairs a file path with the display name shown in the playlist.
//! `list_folder` finds playable files inside a single directory.

mod model;
mod scan;

pub use model::Track;
pub use scan::list_folder;

#[cfg(test)]
mod tests;
