use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::LibrarySettings;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// List the audio files directly inside `dir` (non-recursive), sorted by
/// file name. Unreadable entries and subdirectories are skipped.
pub fn list_folder(dir: &Path, settings: &LibrarySettings) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            paths.push(path.to_path_buf());
        }
    }

    paths.sort_by(|a, b| {
        let an = a.file_name().map(|s| s.to_ascii_lowercase());
        let bn = b.file_name().map(|s| s.to_ascii_lowercase());
        an.cmp(&bn)
    });
    paths
}
