// src/store.rs
//! Flat output files.
//!
//! Everything is serialized exactly as handed over; nothing is re-derived here. Files
//! are written to a temp file in the same directory and then renamed, so a crash never
//! leaves a half-written JSON behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::config::options::ExportOptions;
use crate::dict::{KeyCollision, Reconciliation, WordGroups};
use crate::error::{Error, Result};
use crate::scrape::Sources;

pub const WORDS_FILE: &str = "words.json";
pub const GROUPS_FILE: &str = "groups.json";
pub const COMBINED_FILE: &str = "combined.json";
pub const SOURCES_FILE: &str = "sources.json";
pub const CATEGORIES_FILE: &str = "categories.json";
pub const VIDEOS_FILE: &str = "videos.txt";
pub const UNRESOLVED_FILE: &str = "unresolved.json";
pub const DIAGNOSTICS_FILE: &str = "diagnostics.json";

/// Non-fatal findings of the last run of each stage. Each stage overwrites only its
/// own fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Diagnostics {
    pub excluded: Vec<String>,
    pub oversized: Vec<String>,
    pub collisions: Vec<KeyCollision>,
    pub media_errors: Vec<String>,
}

fn ensure_parent(path: &Path) -> Result<&Path> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if parent.exists() && !parent.is_dir() {
        return Err(Error::Config(format!("not a directory: {}", parent.display())));
    }
    fs::create_dir_all(parent)?;
    Ok(parent)
}

pub fn write_text(path: &Path, text: &str) -> Result<()> {
    let dir = ensure_parent(path)?;
    let tmp = NamedTempFile::new_in(dir)?;
    {
        let mut w = BufWriter::new(tmp.as_file());
        w.write_all(text.as_bytes())?;
        w.flush()?;
    }
    tmp.persist(path)?;
    Ok(())
}

/// Pretty-printed UTF-8 JSON; Hebrew stays readable (serde_json does not escape it).
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    write_text(path, &text)
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(Error::MissingInput(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// `words.json`, `groups.json` and `combined.json`.
pub fn save_dictionary(
    export: &ExportOptions,
    labels: &BTreeMap<String, String>,
    groups: &WordGroups,
) -> Result<Vec<PathBuf>> {
    let written = vec![
        export.path(WORDS_FILE),
        export.path(GROUPS_FILE),
        export.path(COMBINED_FILE),
    ];
    write_json(&written[0], labels)?;
    write_json(&written[1], &groups.groups)?;
    write_json(&written[2], groups)?;
    logf!("Wrote {} words, {} groups to {}", labels.len(), groups.len(), export.out_dir.display());
    Ok(written)
}

pub fn save_sources(export: &ExportOptions, sources: &Sources) -> Result<PathBuf> {
    let path = export.path(SOURCES_FILE);
    write_json(&path, sources)?;
    logf!("Wrote sources for {} ids to {}", sources.len(), path.display());
    Ok(path)
}

/// `categories.json`, `videos.txt` and `unresolved.json`.
pub fn save_reconciliation(export: &ExportOptions, recon: &Reconciliation) -> Result<Vec<PathBuf>> {
    let written = vec![
        export.path(CATEGORIES_FILE),
        export.path(VIDEOS_FILE),
        export.path(UNRESOLVED_FILE),
    ];
    write_json(&written[0], &recon.categories)?;
    write_text(&written[1], &render_video_listing(recon))?;
    // Same shape as the override table, ready to be filled in by hand.
    let unresolved: BTreeMap<&str, Vec<String>> =
        recon.unresolved.iter().map(|t| (t.as_str(), Vec::new())).collect();
    write_json(&written[2], &unresolved)?;
    logf!(
        "Wrote {} categories, {} unresolved titles to {}",
        recon.categories.len(),
        recon.unresolved.len(),
        export.out_dir.display()
    );
    Ok(written)
}

/// Category title, then its videos indented by two tabs; categories separated by two
/// blank lines. Only the categories kept in the index are listed.
pub fn render_video_listing(recon: &Reconciliation) -> String {
    let blocks: Vec<String> = recon
        .listed()
        .map(|(title, videos)| {
            let mut block = s!(title);
            for v in videos {
                block.push_str("\n\t\t");
                block.push_str(v);
            }
            block
        })
        .collect();
    let mut text = blocks.join("\n\n\n");
    if !text.is_empty() {
        text.push('\n');
    }
    text
}

/// Read-modify-write of `diagnostics.json`.
pub fn update_diagnostics<F>(export: &ExportOptions, update: F) -> Result<Diagnostics>
where
    F: FnOnce(&mut Diagnostics),
{
    let path = export.path(DIAGNOSTICS_FILE);
    let mut diag = match read_json::<Diagnostics>(&path) {
        Ok(d) => d,
        Err(Error::MissingInput(_)) => Diagnostics::default(),
        Err(e) => {
            logw!("Diagnostics: replacing unreadable {}: {e}", path.display());
            Diagnostics::default()
        }
    };
    update(&mut diag);
    write_json(&path, &diag)?;
    Ok(diag)
}

pub fn load_words(export: &ExportOptions) -> Result<BTreeMap<String, String>> {
    read_json(&export.path(WORDS_FILE))
}

pub fn load_combined(export: &ExportOptions) -> Result<WordGroups> {
    read_json(&export.path(COMBINED_FILE))
}

pub fn load_sources(export: &ExportOptions) -> Result<Sources> {
    read_json(&export.path(SOURCES_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Reconciliation;

    #[test]
    fn listing_skips_oversized_categories() {
        let mut r = Reconciliation::default();
        r.videos_by_category.insert(s!("צבעים"), vec![s!("אדום"), s!("כחול")]);
        r.videos_by_category.insert(s!("הכל"), vec![s!("x")]);
        r.videos_by_category.insert(s!("אוכל"), vec![s!("לחם")]);
        r.categories.insert(s!("צבעים"), vec![s!("1")]);
        r.categories.insert(s!("אוכל"), vec![s!("2")]);
        r.oversized.push(s!("הכל"));

        assert_eq!(render_video_listing(&r), "אוכל\n\t\tלחם\n\n\nצבעים\n\t\tאדום\n\t\tכחול\n");
        assert_eq!(render_video_listing(&Reconciliation::default()), "");
    }

    #[test]
    fn json_is_utf8_not_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let mut m = BTreeMap::new();
        m.insert("1", "שלום");
        write_json(&path, &m).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("שלום"));
        let back: BTreeMap<String, String> = read_json(&path).unwrap();
        assert_eq!(back["1"], "שלום");
    }

    #[test]
    fn unresolved_file_has_override_shape() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportOptions::new(dir.path());
        let r = Reconciliation { unresolved: vec![s!("שנה טובה")], ..Default::default() };
        save_reconciliation(&export, &r).unwrap();
        let back: BTreeMap<String, Vec<String>> = read_json(&export.path(UNRESOLVED_FILE)).unwrap();
        assert_eq!(back.get("שנה טובה"), Some(&vec![]));
    }

    #[test]
    fn diagnostics_fields_are_updated_independently() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportOptions::new(dir.path());
        update_diagnostics(&export, |d| d.excluded = vec![s!("2813")]).unwrap();
        let d = update_diagnostics(&export, |d| d.oversized = vec![s!("הכל")]).unwrap();
        assert_eq!(d.excluded, vec![s!("2813")]);
        assert_eq!(d.oversized, vec![s!("הכל")]);
    }

    #[test]
    fn missing_input_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_combined(&ExportOptions::new(dir.path())).unwrap_err();
        assert!(matches!(err, Error::MissingInput(_)));
    }
}
