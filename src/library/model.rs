use std::path::{Path, PathBuf};

use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::Accessor;

/// One playable file. Immutable once added to the playlist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub display: String,
}

impl Track {
    /// Build a `Track` from a file path.
    ///
    /// The display name prefers the embedded title tag and falls back to the
    /// file stem when the file has no readable tag.
    pub fn from_path(path: &Path) -> Self {
        let mut display = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();

        if let Ok(tagged) = Probe::open(path).and_then(|p| p.read()) {
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(title) = tag.title() {
                    let title = title.trim();
                    if !title.is_empty() {
                        display = title.to_string();
                    }
                }
            }
        }

        Track {
            path: path.to_path_buf(),
            display,
        }
    }
}
