// src/dict/reconcile.rs
//! Playlist reconciliation.
//!
//! The YouTube playlists and the dictionary site share no key: a playlist video is
//! known only by its display title. Titles are matched to word groups through
//! `normalized_key` (letters only), with the curated override table as the escape
//! hatch for everything that does not match.
//!
//! Steps:
//! 1. clean category and video titles (boilerplate, quotes, whitespace);
//! 2. keep playlists whose raw title carries the dictionary prefix;
//! 3. index groups by normalized key; colliding base words are unioned and reported;
//! 4. resolve each distinct video title: key match, else override, else unresolved;
//! 5. per category, union the ids of its videos. Categories at or above the
//!    oversized threshold are truncated by YouTube and stay out of the index.
//!
//! Unresolved titles, oversized categories and key collisions are diagnostics in the
//! result, never errors.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::group::WordGroups;
use super::normalize::normalized_key;
use crate::config::Curation;
use crate::config::options::ReconcileOptions;
use crate::core::sanitize::clean_title;

/// A playlist as scraped: raw title and raw video titles in page order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub title: String,
    pub videos: Vec<String>,
}

/// One cleaned (category, video) pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlaylistEntry {
    pub category_title: String,
    pub video_title: String,
}

/// Distinct base words that reduce to the same normalized key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCollision {
    pub key: String,
    pub base_words: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// category title → ids; oversized categories are absent.
    pub categories: BTreeMap<String, Vec<String>>,
    /// category title → distinct cleaned video titles, oversized ones included.
    pub videos_by_category: BTreeMap<String, Vec<String>>,
    /// cleaned video title → resolved ids (possibly empty).
    pub video_ids: BTreeMap<String, Vec<String>>,
    /// Titles matched by neither the key index nor the override table, first-seen order.
    pub unresolved: Vec<String>,
    pub oversized: Vec<String>,
    pub collisions: Vec<KeyCollision>,
}

impl Reconciliation {
    /// Categories kept in the index, with their videos, in title order.
    pub fn listed(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.videos_by_category
            .iter()
            .filter(|(title, _)| self.categories.contains_key(title.as_str()))
            .map(|(title, videos)| (title.as_str(), videos.as_slice()))
    }
}

/// Dictionary playlists with their cleaned category titles, in playlist order.
fn candidates<'a>(
    playlists: &'a [Playlist],
    opts: &'a ReconcileOptions,
) -> impl Iterator<Item = (String, &'a Playlist)> + 'a {
    playlists.iter().filter_map(move |playlist| {
        // The prefix is part of the boilerplate, so test it before cleaning.
        if !playlist.title.trim().starts_with(opts.category_prefix.as_str()) {
            logd!("Reconcile: skipping non-dictionary playlist {:?}", playlist.title);
            return None;
        }
        Some((clean_title(&playlist.title, &opts.boilerplate, &opts.quotes), playlist))
    })
}

/// Steps 1-2: cleaned entries of the dictionary playlists, in playlist then page order.
/// Duplicate (category, video) pairs and videos that clean to nothing are dropped.
pub fn playlist_entries(playlists: &[Playlist], opts: &ReconcileOptions) -> Vec<PlaylistEntry> {
    let clean = |t: &str| clean_title(t, &opts.boilerplate, &opts.quotes);
    let mut seen: HashSet<PlaylistEntry> = HashSet::new();
    let mut out = Vec::new();

    for (category_title, playlist) in candidates(playlists, opts) {
        for raw in &playlist.videos {
            let video_title = clean(raw);
            if video_title.is_empty() {
                continue;
            }
            let entry = PlaylistEntry { category_title: category_title.clone(), video_title };
            if seen.insert(entry.clone()) {
                out.push(entry);
            }
        }
    }
    out
}

/// Step 3. Groups are visited in base-word order; a key shared by several base words
/// maps to the union of their ids.
fn key_index(groups: &WordGroups) -> (HashMap<String, Vec<String>>, Vec<KeyCollision>) {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();
    let mut owners: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for (base, ids) in &groups.groups {
        let key = normalized_key(base);
        if key.is_empty() {
            logd!("Reconcile: base word {base:?} has no letters, not indexed");
            continue;
        }
        let slot = index.entry(key.clone()).or_default();
        for id in ids {
            if !slot.contains(id) {
                slot.push(id.clone());
            }
        }
        owners.entry(key).or_default().push(base.clone());
    }

    let collisions: Vec<KeyCollision> = owners
        .into_iter()
        .filter(|(_, bases)| bases.len() > 1)
        .map(|(key, base_words)| KeyCollision { key, base_words })
        .collect();
    for c in &collisions {
        logw!("Reconcile: {:?} share key {:?}; their ids are merged", c.base_words, c.key);
    }
    (index, collisions)
}

fn resolve(
    title: &str,
    index: &HashMap<String, Vec<String>>,
    curation: &Curation,
    opts: &ReconcileOptions,
) -> Option<Vec<String>> {
    let overridden = curation.override_for(title);
    if opts.overrides_take_precedence {
        if let Some(ids) = overridden {
            return Some(ids.to_vec());
        }
    }
    let key = normalized_key(title);
    if let Some(ids) = index.get(&key).filter(|_| !key.is_empty()) {
        return Some(ids.clone());
    }
    overridden.map(<[String]>::to_vec)
}

pub fn reconcile(
    playlists: &[Playlist],
    groups: &WordGroups,
    curation: &Curation,
    opts: &ReconcileOptions,
) -> Reconciliation {
    let entries = playlist_entries(playlists, opts);
    let (index, collisions) = key_index(groups);
    let mut out = Reconciliation { collisions, ..Default::default() };

    // A playlist without usable videos is still a category, with no ids.
    for (category_title, _) in candidates(playlists, opts) {
        out.videos_by_category.entry(category_title).or_default();
    }

    // Step 4
    let mut visited: HashSet<&str> = HashSet::new();
    for entry in &entries {
        let title = &entry.video_title;
        out.videos_by_category
            .entry(entry.category_title.clone())
            .or_default()
            .push(title.clone());

        if !visited.insert(title.as_str()) {
            continue;
        }
        match resolve(title, &index, curation, opts) {
            Some(ids) => {
                out.video_ids.insert(title.clone(), ids);
            }
            None => {
                logw!("Reconcile: unresolved video title {title:?}");
                out.unresolved.push(title.clone());
            }
        }
    }

    // Step 5
    for (category, videos) in &out.videos_by_category {
        if videos.len() >= opts.oversized_threshold {
            logw!(
                "Reconcile: category {category:?} lists {} videos (cap {}); left out of the index",
                videos.len(),
                opts.oversized_threshold
            );
            out.oversized.push(category.clone());
            continue;
        }
        let mut ids: Vec<String> = Vec::new();
        for id in videos.iter().filter_map(|v| out.video_ids.get(v)).flatten() {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        out.categories.insert(category.clone(), ids);
    }

    logf!(
        "Reconciled {} categories ({} oversized), {} titles resolved, {} unresolved",
        out.categories.len(),
        out.oversized.len(),
        out.video_ids.len(),
        out.unresolved.len()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::group::{group, ingest};

    const PREFIX: &str = "מילון שפת הסימנים - ";
    const TAIL: &str = " בשפת הסימנים הישראלית - המכון לקידום החרש";

    fn playlist(title: &str, videos: &[&str]) -> Playlist {
        Playlist {
            id: format!("PL{}", title.len()),
            title: s!(title),
            videos: videos.iter().map(|v| format!("\"{v}\"{TAIL}")).collect(),
        }
    }

    fn groups() -> WordGroups {
        let c = Curation::builtin().unwrap();
        let raw = [
            ("1", "אדום"),
            ("2", "כחול (1)"),
            ("3", "כחול (2)"),
            ("4", "אכזבה"),
            ("5", "צ'יפס"),
            ("6", "בית ספר"),
            ("7", "בית-ספר"),
        ];
        group(&ingest(raw.iter().map(|(i, l)| (s!(*i), s!(*l))), &c.corrections))
    }

    #[test]
    fn categories_union_their_videos() {
        let lists = vec![
            playlist(&format!("{PREFIX}צבעים"), &["אדום", "כחול", "אדום"]),
            playlist(&format!("{PREFIX}אוכל"), &["ציפס", "מזל טוב"]),
        ];
        let c = Curation::builtin().unwrap();
        let r = reconcile(&lists, &groups(), &c, &ReconcileOptions::default());

        assert_eq!(r.categories["צבעים"], vec![s!("1"), s!("2"), s!("3")]);
        assert_eq!(r.categories["אוכל"], vec![s!("5")]);
        assert_eq!(r.videos_by_category["צבעים"], vec![s!("אדום"), s!("כחול")]);
        assert!(r.unresolved.is_empty());
    }

    #[test]
    fn empty_playlists_are_categories_without_ids() {
        let lists = vec![
            playlist(&format!("{PREFIX}ריק"), &[]),
            playlist(&format!("{PREFIX}ציטוטים"), &[""]),
            playlist(&format!("{PREFIX}צבעים"), &["אדום"]),
        ];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());

        assert_eq!(r.categories["ריק"], Vec::<String>::new());
        assert_eq!(r.categories["ציטוטים"], Vec::<String>::new());
        assert_eq!(r.categories["צבעים"], vec![s!("1")]);
        assert!(r.oversized.is_empty());
        assert!(r.unresolved.is_empty());
        assert_eq!(r.listed().count(), 3);
    }

    #[test]
    fn override_to_empty_is_not_unresolved() {
        let lists = vec![playlist(&format!("{PREFIX}ברכות"), &["מזל טוב", "שנה טובה"])];
        let c = Curation::builtin().unwrap();
        let r = reconcile(&lists, &groups(), &c, &ReconcileOptions::default());

        assert_eq!(r.video_ids.get("מזל טוב"), Some(&vec![]));
        assert_eq!(r.unresolved, vec![s!("שנה טובה")]);
        assert!(!r.video_ids.contains_key("שנה טובה"));
        assert_eq!(r.categories["ברכות"], Vec::<String>::new());
    }

    #[test]
    fn override_fills_in_for_unmatched_titles_only_by_default() {
        let mut c = Curation::default();
        c.overrides.insert(s!("אדום"), vec![s!("99")]);
        c.overrides.insert(s!("ירוק"), vec![s!("42")]);
        let lists = vec![playlist(&format!("{PREFIX}צבעים"), &["אדום", "ירוק"])];

        let r = reconcile(&lists, &groups(), &c, &ReconcileOptions::default());
        assert_eq!(r.video_ids["אדום"], vec![s!("1")]);
        assert_eq!(r.video_ids["ירוק"], vec![s!("42")]);

        let opts = ReconcileOptions { overrides_take_precedence: true, ..Default::default() };
        let r = reconcile(&lists, &groups(), &c, &opts);
        assert_eq!(r.video_ids["אדום"], vec![s!("99")]);
    }

    #[test]
    fn non_dictionary_playlists_are_ignored() {
        let lists = vec![
            playlist("חדשות בשפת הסימנים", &["אדום"]),
            playlist(&format!("{PREFIX}צבעים"), &["כחול"]),
        ];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());
        assert_eq!(r.categories.keys().collect::<Vec<_>>(), vec!["צבעים"]);
        assert!(!r.video_ids.contains_key("אדום"));
    }

    #[test]
    fn oversized_categories_stay_out_of_the_index() {
        let many: Vec<String> = (0..100).map(|i| format!("מילה {i}")).collect();
        let many: Vec<&str> = many.iter().map(String::as_str).collect();
        let lists = vec![
            playlist(&format!("{PREFIX}הכל"), &many),
            playlist(&format!("{PREFIX}צבעים"), &["אדום"]),
        ];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());

        assert_eq!(r.oversized, vec![s!("הכל")]);
        assert!(!r.categories.contains_key("הכל"));
        assert!(r.categories.contains_key("צבעים"));
        assert_eq!(r.listed().map(|(t, _)| t).collect::<Vec<_>>(), vec!["צבעים"]);

        let opts = ReconcileOptions { oversized_threshold: 101, ..Default::default() };
        let r = reconcile(&lists, &groups(), &Curation::default(), &opts);
        assert!(r.categories.contains_key("הכל"));
    }

    #[test]
    fn only_distinct_titles_count_toward_the_cap() {
        let repeated: Vec<String> = (0..150).map(|i| format!("מילה {}", i % 50)).collect();
        let repeated: Vec<&str> = repeated.iter().map(String::as_str).collect();
        let lists = vec![
            playlist(&format!("{PREFIX}חזרות"), &repeated),
            playlist(&format!("{PREFIX}חזרות"), &repeated),
        ];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());

        assert!(r.oversized.is_empty());
        assert!(r.categories.contains_key("חזרות"));
        assert_eq!(r.videos_by_category["חזרות"].len(), 50);
        assert_eq!(r.unresolved.len(), 50);
    }

    #[test]
    fn colliding_keys_union_and_are_reported() {
        let lists = vec![playlist(&format!("{PREFIX}לימודים"), &["בית ספר"])];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());

        assert_eq!(
            r.collisions,
            vec![KeyCollision { key: s!("ביתספר"), base_words: vec![s!("בית ספר"), s!("בית-ספר")] }]
        );
        assert_eq!(r.video_ids["בית ספר"], vec![s!("6"), s!("7")]);
    }

    #[test]
    fn category_ids_equal_union_of_resolved_videos() {
        let lists = vec![
            playlist(&format!("{PREFIX}א"), &["אדום", "אכזבה", "לא קיים"]),
            playlist(&format!("{PREFIX}ב"), &["כחול", "ציפס"]),
        ];
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());
        for (category, ids) in &r.categories {
            let mut expected: Vec<&String> = r.videos_by_category[category]
                .iter()
                .filter_map(|v| r.video_ids.get(v))
                .flatten()
                .collect();
            expected.sort();
            expected.dedup();
            let mut got: Vec<&String> = ids.iter().collect();
            got.sort();
            assert_eq!(got, expected, "{category}");
        }
        assert_eq!(r.unresolved, vec![s!("לא קיים")]);
    }

    #[test]
    fn same_category_from_two_playlists_is_merged() {
        let lists = vec![
            playlist(&format!("{PREFIX}צבעים"), &["אדום"]),
            playlist(&format!("{PREFIX}צבעים "), &["כחול", "אדום"]),
        ];
        let entries = playlist_entries(&lists, &ReconcileOptions::default());
        assert_eq!(entries.len(), 2);
        let r = reconcile(&lists, &groups(), &Curation::default(), &ReconcileOptions::default());
        assert_eq!(r.categories["צבעים"], vec![s!("1"), s!("2"), s!("3")]);
    }
}
