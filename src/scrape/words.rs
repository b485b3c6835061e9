// src/scrape/words.rs
use std::thread;

use crate::{
    config::options::IngestOptions,
    core::Fetch,
    progress::Progress,
    specs,
};

/// Query the search endpoint once per letter and return every `(id, raw label)` pair
/// in sweep order. Ids repeat across letters; `dict::ingest` folds them.
pub fn collect_words(
    net: &dyn Fetch,
    opts: &IngestOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<(String, String)> {
    let letters = opts.sweep_letters();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(letters.len());
    }

    let mut pairs = Vec::new();
    for (i, letter) in letters.iter().enumerate() {
        if i > 0 && !opts.search_pause.is_zero() {
            thread::sleep(opts.search_pause);
        }
        match specs::search::fetch(net, *letter) {
            Ok(found) => {
                logd!("Search '{letter}': {} hits", found.len());
                pairs.extend(found);
            }
            Err(e) => loge!("Search '{letter}' failed, skipping: {e}"),
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&letter.to_string());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!("Search sweep: {} hits over {} letters", pairs.len(), letters.len()));
        p.finish();
    }
    pairs
}
