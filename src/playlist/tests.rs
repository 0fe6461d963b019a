use super::Playlist;
use crate::library::Track;
use std::path::{Path, PathBuf};

fn t(path: &str) -> Track {
    let path = PathBuf::from(path);
    let display = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();
    Track { path, display }
}

#[test]
fn push_rejects_duplicate_paths() {
    let mut pl = Playlist::new();
    assert!(pl.push(t("/music/a.mp3")));
    assert!(pl.push(t("/music/b.mp3")));
    assert!(!pl.push(t("/music/a.mp3")));
    assert_eq!(pl.len(), 2);
}

#[test]
fn insertion_order_is_display_order() {
    let mut pl = Playlist::new();
    pl.push(t("/music/c.mp3"));
    pl.push(t("/music/a.mp3"));
    pl.push(t("/music/b.mp3"));
    assert_eq!(pl.names(), vec!["c", "a", "b"]);
}

#[test]
fn remove_shifts_later_indices() {
    let mut pl = Playlist::new();
    pl.push(t("/music/a.mp3"));
    pl.push(t("/music/b.mp3"));
    pl.push(t("/music/c.mp3"));

    assert_eq!(pl.index_of(Path::new("/music/c.mp3")), Some(2));
    let removed = pl.remove(0).unwrap();
    assert_eq!(removed.display, "a");
    assert_eq!(pl.index_of(Path::new("/music/c.mp3")), Some(1));
    assert_eq!(pl.index_of(Path::new("/music/a.mp3")), None);
}

#[test]
fn remove_out_of_range_is_none() {
    let mut pl = Playlist::new();
    pl.push(t("/music/a.mp3"));
    assert!(pl.remove(1).is_none());
    assert_eq!(pl.len(), 1);
}

#[test]
fn contains_is_exact_match() {
    let mut pl = Playlist::new();
    pl.push(t("/music/a.mp3"));
    assert!(pl.contains(Path::new("/music/a.mp3")));
    assert!(!pl.contains(Path::new("/music/A.mp3")));
    assert!(!pl.contains(Path::new("music/a.mp3")));
}
