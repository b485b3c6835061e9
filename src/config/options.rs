// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub ingest: IngestOptions,
    pub playlists: PlaylistOptions,
    pub media: MediaOptions,
    pub export: ExportOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IngestOptions {
    pub letters: Vec<char>,
    pub skipped: Vec<char>,
    pub search_pause: Duration,
    pub source_pause: Duration,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            letters: ALPHABET.to_vec(),
            skipped: SKIPPED_LETTERS.to_vec(),
            search_pause: Duration::from_millis(SEARCH_REQUEST_PAUSE_MS),
            source_pause: Duration::from_millis(SOURCE_REQUEST_PAUSE_MS),
        }
    }
}

impl IngestOptions {
    /// Letters actually queried, in alphabet order.
    pub fn sweep_letters(&self) -> Vec<char> {
        self.letters
            .iter()
            .copied()
            .filter(|c| !self.skipped.contains(c))
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Raw playlist titles must start with this to count as a dictionary category.
    pub category_prefix: String,
    /// Substrings removed from every category and video title.
    pub boilerplate: Vec<String>,
    pub quotes: Vec<char>,
    /// Categories with at least this many distinct videos are left out of the index.
    pub oversized_threshold: usize,
    /// Let an override entry win over an automatic match.
    pub overrides_take_precedence: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            category_prefix: s!(CATEGORY_PREFIX),
            boilerplate: TITLE_BOILERPLATE.iter().map(|b| s!(*b)).collect(),
            quotes: TITLE_QUOTES.to_vec(),
            oversized_threshold: OVERSIZED_THRESHOLD,
            overrides_take_precedence: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistOptions {
    /// Saved copy of the channel's playlists page.
    pub channel_file: PathBuf,
    pub cache_dir: PathBuf,
    /// Only use cached playlist pages, never fetch.
    pub offline: bool,
    pub fetch_pause: Duration,
    /// Fail the run when a video title stays unresolved.
    pub strict: bool,
    pub reconcile: ReconcileOptions,
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            channel_file: PathBuf::from(DEFAULT_CHANNEL_FILE),
            cache_dir: PathBuf::from(STORE_DIR).join(PLAYLIST_CACHE_SUBDIR),
            offline: false,
            fetch_pause: Duration::from_millis(PLAYLIST_REQUEST_PAUSE_MS),
            strict: false,
            reconcile: ReconcileOptions::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaOptions {
    pub videos_dir: PathBuf,
    pub ffmpeg: PathBuf,
    /// MIME types tried in order until one transcodes.
    pub source_preference: Vec<String>,
}

impl Default for MediaOptions {
    fn default() -> Self {
        Self {
            videos_dir: PathBuf::from(DEFAULT_VIDEOS_DIR),
            ffmpeg: PathBuf::from(FFMPEG),
            source_preference: SOURCE_PREFERENCE.iter().map(|m| s!(*m)).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { out_dir: PathBuf::from(DEFAULT_OUT_DIR) }
    }
}

impl ExportOptions {
    pub fn new(out_dir: impl AsRef<Path>) -> Self {
        Self { out_dir: out_dir.as_ref().to_path_buf() }
    }

    pub fn path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_skips_the_overloaded_letter() {
        let opts = IngestOptions::default();
        let letters = opts.sweep_letters();
        assert_eq!(letters.len(), ALPHABET.len() - 1);
        assert!(!letters.contains(&'ו'));
        assert_eq!(letters.first(), Some(&'א'));
        assert_eq!(letters.last(), Some(&'ת'));
    }

    #[test]
    fn export_paths_live_under_out_dir() {
        let export = ExportOptions::new("/tmp/isl");
        assert_eq!(export.path("groups.json"), PathBuf::from("/tmp/isl/groups.json"));
    }
}
