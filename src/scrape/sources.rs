// src/scrape/sources.rs
use std::collections::{BTreeMap, BTreeSet};
use std::thread;

use crate::{
    config::options::IngestOptions,
    core::Fetch,
    dict::WordEntry,
    progress::Progress,
    specs,
};

/// id → { MIME type → URL }
pub type Sources = BTreeMap<String, BTreeMap<String, String>>;

/// Ask the video endpoint for every entry's media sources, pausing between requests.
/// Entries whose request fails, or that come back without sources, are left out.
pub fn collect_sources(
    net: &dyn Fetch,
    entries: &[WordEntry],
    opts: &IngestOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Sources {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(entries.len());
    }

    let mut out = Sources::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 && !opts.source_pause.is_zero() {
            thread::sleep(opts.source_pause);
        }
        match specs::video::fetch(net, &entry.id, &entry.raw_label) {
            Ok(found) if found.is_empty() => {
                logw!("Sources: {} ({}) has no <source> tags", entry.id, entry.raw_label);
            }
            Ok(found) => {
                out.insert(entry.id.clone(), found);
            }
            Err(e) => loge!("Sources: {} ({}) failed, skipping: {e}", entry.id, entry.raw_label),
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&entry.id);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Sources: {} of {} entries", out.len(), entries.len()));
        p.finish();
    }
    out
}

/// Apply the bad-id exclusion list to a sources map loaded from an earlier run.
pub fn exclude_sources(mut sources: Sources, bad_ids: &BTreeSet<String>) -> Sources {
    sources.retain(|id, _| !bad_ids.contains(id));
    sources
}
