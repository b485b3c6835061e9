// src/dict/group.rs
//! Word grouping.
//!
//! The search sweep returns every variant of a word as its own entry
//! (`"bread (1)"`, `"bread (2)"`). Grouping folds those under one base word:
//!
//! ```text
//! sweep pairs → ingest → exclude(bad ids) → group → { groups, words }
//! ```
//!
//! Invariants of the result:
//! - every surviving id is in exactly one group, the one for its base word;
//! - ids inside a group keep the order they were first seen in;
//! - `words` is the exact inverse of `groups`.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use super::normalize::normalize;
use crate::config::curation::CorrectionTable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordEntry {
    pub id: String,
    pub raw_label: String,
    pub base_word: String,
}

impl WordEntry {
    pub fn new(
        id: impl Into<String>,
        raw_label: impl Into<String>,
        corrections: &CorrectionTable,
    ) -> Self {
        let raw_label = raw_label.into();
        let base_word = normalize(&raw_label, corrections);
        Self { id: id.into(), raw_label, base_word }
    }
}

/// Serialized as-is for `combined.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroups {
    /// id → base word
    pub words: BTreeMap<String, String>,
    /// base word → ids
    pub groups: BTreeMap<String, Vec<String>>,
}

impl WordGroups {
    pub fn base_word_of(&self, id: &str) -> Option<&str> {
        self.words.get(id).map(String::as_str)
    }

    pub fn ids_of(&self, base_word: &str) -> Option<&[String]> {
        self.groups.get(base_word).map(Vec::as_slice)
    }

    /// Every grouped id.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.groups.values().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Turn raw sweep output into entries. The same id comes back from every letter its
/// label contains; only its first occurrence is kept.
pub fn ingest<I>(pairs: I, corrections: &CorrectionTable) -> Vec<WordEntry>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut seen: HashSet<String> = HashSet::new();
    let mut repeats = 0usize;
    let entries: Vec<WordEntry> = pairs
        .into_iter()
        .filter(|(id, _)| {
            let fresh = seen.insert(id.clone());
            if !fresh {
                repeats += 1;
            }
            fresh
        })
        .map(|(id, label)| WordEntry::new(id, label, corrections))
        .collect();
    logd!("Ingest: {} entries, {} repeated ids dropped", entries.len(), repeats);
    entries
}

/// Drop known-bad ids. Must run before `group`; returns the ids actually removed.
pub fn exclude(
    entries: Vec<WordEntry>,
    bad_ids: &BTreeSet<String>,
) -> (Vec<WordEntry>, Vec<String>) {
    let (removed, kept): (Vec<WordEntry>, Vec<WordEntry>) =
        entries.into_iter().partition(|e| bad_ids.contains(&e.id));
    let removed: Vec<String> = removed.into_iter().map(|e| e.id).collect();
    if !removed.is_empty() {
        logf!("Excluded {} known-bad id(s): {}", removed.len(), removed.join(", "));
    }
    (kept, removed)
}

/// id → raw label, for `words.json`.
pub fn id_labels(entries: &[WordEntry]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|e| (e.id.clone(), e.raw_label.clone()))
        .collect()
}

pub fn group(entries: &[WordEntry]) -> WordGroups {
    entries.iter().fold(WordGroups::default(), |mut acc, e| {
        if acc.words.contains_key(&e.id) {
            logd!("Group: id {} already grouped, skipping repeat", e.id);
            return acc;
        }
        acc.words.insert(e.id.clone(), e.base_word.clone());
        acc.groups.entry(e.base_word.clone()).or_default().push(e.id.clone());
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Curation;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(i, l)| (s!(*i), s!(*l))).collect()
    }

    fn sample() -> Vec<(String, String)> {
        pairs(&[
            ("10", "לחם (מוצר מזון) 1"),
            ("11", "לחם (מוצר מזון) 2"),
            ("12", "בית (1)"),
            ("13", "בית (2)"),
            ("14", "בית"),
            ("2813", "placeholder"),
            ("15", "אימא"),
            ("12", "בית (1)"),
        ])
    }

    #[test]
    fn variants_share_a_group_in_first_seen_order() {
        let c = Curation::builtin().unwrap();
        let entries = ingest(sample(), &c.corrections);
        let (entries, removed) = exclude(entries, &c.excluded_ids);
        assert_eq!(removed, vec![s!("2813")]);

        let g = group(&entries);
        assert_eq!(g.ids_of("לחם (מוצר מזון)"), Some(&[s!("10"), s!("11")][..]));
        assert_eq!(g.ids_of("בית"), Some(&[s!("12"), s!("13"), s!("14")][..]));
        assert_eq!(g.ids_of("אמא"), Some(&[s!("15")][..]));
        assert_eq!(g.base_word_of("11"), Some("לחם (מוצר מזון)"));
    }

    #[test]
    fn groups_partition_the_surviving_ids() {
        let c = Curation::builtin().unwrap();
        let entries = ingest(sample(), &c.corrections);
        let (entries, _) = exclude(entries, &c.excluded_ids);
        let g = group(&entries);

        let mut grouped: Vec<&str> = g.ids().collect();
        let total = grouped.len();
        grouped.sort_unstable();
        grouped.dedup();
        assert_eq!(grouped.len(), total, "an id landed in two groups");

        let mut expected: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        expected.sort_unstable();
        assert_eq!(grouped, expected);

        for (base, ids) in &g.groups {
            for id in ids {
                assert_eq!(g.words.get(id), Some(base));
            }
        }
    }

    #[test]
    fn excluded_id_is_gone_everywhere() {
        let c = Curation::builtin().unwrap();
        let entries = ingest(sample(), &c.corrections);
        let (entries, _) = exclude(entries, &c.excluded_ids);
        let labels = id_labels(&entries);
        let g = group(&entries);

        assert!(!labels.contains_key("2813"));
        assert!(!g.words.contains_key("2813"));
        assert!(g.groups.values().all(|ids| !ids.iter().any(|i| i == "2813")));
        assert!(!g.groups.contains_key("placeholder"));
    }

    #[test]
    fn raw_labels_are_kept_verbatim() {
        let c = Curation::builtin().unwrap();
        let entries = ingest(sample(), &c.corrections);
        let labels = id_labels(&entries);
        assert_eq!(labels["10"], "לחם (מוצר מזון) 1");
        assert_eq!(labels["15"], "אימא");
        assert_eq!(labels.len(), 7);
    }

    #[test]
    fn repeated_entries_do_not_duplicate_ids() {
        let c = CorrectionTable::new();
        let entries = vec![WordEntry::new("1", "a", &c), WordEntry::new("1", "a", &c)];
        let g = group(&entries);
        assert_eq!(g.ids_of("a"), Some(&[s!("1")][..]));
    }
}
