use std::path::Path;

use crate::library::Track;

/// Ordered sequence of tracks. Insertion order is display order; a path can
/// appear at most once.
#[derive(Default)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new() -> Self {
        Self { tracks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Exact path match, no normalization.
    pub fn contains(&self, path: &Path) -> bool {
        self.tracks.iter().any(|t| t.path == path)
    }

    /// Append `track` unless its path is already present. Returns whether it
    /// was added.
    pub fn push(&mut self, track: Track) -> bool {
        if self.contains(&track.path) {
            return false;
        }
        self.tracks.push(track);
        true
    }

    /// Remove and return the track at `index`; `None` when out of range.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index < self.tracks.len() {
            Some(self.tracks.remove(index))
        } else {
            None
        }
    }

    /// Index of the track with `path`, by linear scan. Indices are never
    /// cached across mutation, so this is re-derived on every use.
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    /// Display names in list order.
    pub fn names(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.display.clone()).collect()
    }
}
