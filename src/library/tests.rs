use super::Track;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn track_display_falls_back_to_file_stem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("Blackened.mp3");
    fs::write(&path, b"not a real mp3").unwrap();

    let track = Track::from_path(&path);
    assert_eq!(track.path, path);
    assert_eq!(track.display, "Blackened");
}

#[test]
fn track_display_for_missing_file_uses_stem() {
    let track = Track::from_path(Path::new("/nonexistent/Paranoid.flac"));
    assert_eq!(track.display, "Paranoid");
}
