// src/runner.rs
//! Pipeline stages. Each stage reads what it needs from the output directory (or the
//! network), does its work, and writes its own files, so stages can be re-run alone.

use std::path::PathBuf;

use crate::{
    config::{AppOptions, Curation},
    core::Fetch,
    dict::{self, Reconciliation},
    error::{Error, Result},
    media::{self, MediaReport},
    progress::Progress,
    scrape::{self, Sources},
    store,
};

/// What `build` produced.
pub struct BuildSummary {
    pub entries: usize,
    pub groups: usize,
    pub excluded: Vec<String>,
    pub files_written: Vec<PathBuf>,
}

/// Search sweep, then group and save the dictionary.
pub fn run_build(
    opts: &AppOptions,
    curation: &Curation,
    net: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> Result<BuildSummary> {
    let pairs = scrape::collect_words(net, &opts.ingest, progress);
    build_from_pairs(pairs, opts, curation)
}

/// The offline half of `build`: ingest, exclude, group, save.
pub fn build_from_pairs(
    pairs: Vec<(String, String)>,
    opts: &AppOptions,
    curation: &Curation,
) -> Result<BuildSummary> {
    let entries = dict::ingest(pairs, &curation.corrections);
    if entries.is_empty() {
        return Err(Error::MissingInput(s!("the search sweep returned no entries")));
    }
    let (entries, excluded) = dict::exclude(entries, &curation.excluded_ids);
    let labels = dict::id_labels(&entries);
    let groups = dict::group(&entries);

    let files_written = store::save_dictionary(&opts.export, &labels, &groups)?;
    store::update_diagnostics(&opts.export, |d| d.excluded = excluded.clone())?;

    Ok(BuildSummary {
        entries: entries.len(),
        groups: groups.len(),
        excluded,
        files_written,
    })
}

/// Per-word source sweep over the saved `words.json`.
pub fn run_sources(
    opts: &AppOptions,
    curation: &Curation,
    net: &dyn Fetch,
    progress: Option<&mut dyn Progress>,
) -> Result<Sources> {
    let labels = store::load_words(&opts.export)?;
    let entries = dict::ingest(labels, &curation.corrections);
    let (entries, _) = dict::exclude(entries, &curation.excluded_ids);

    let sources = scrape::collect_sources(net, &entries, &opts.ingest, progress);
    let sources = scrape::exclude_sources(sources, &curation.excluded_ids);
    store::save_sources(&opts.export, &sources)?;
    Ok(sources)
}

/// Read the playlists, reconcile them against the saved `combined.json`, save the
/// category index and its diagnostics.
///
/// Unresolved titles are warnings unless `opts.playlists.strict` is set, in which case
/// the stage fails after everything has been written.
pub fn run_playlists(
    opts: &AppOptions,
    curation: &Curation,
    net: Option<&dyn Fetch>,
    progress: Option<&mut dyn Progress>,
) -> Result<Reconciliation> {
    let groups = store::load_combined(&opts.export)?;
    let net = if opts.playlists.offline { None } else { net };
    let playlists = scrape::collect_playlists(net, &opts.playlists, progress)?;

    let recon = dict::reconcile(&playlists, &groups, curation, &opts.playlists.reconcile);
    store::save_reconciliation(&opts.export, &recon)?;
    store::update_diagnostics(&opts.export, |d| {
        d.oversized = recon.oversized.clone();
        d.collisions = recon.collisions.clone();
    })?;

    for title in &recon.oversized {
        logf!("Oversized category, check by hand: {title}");
    }
    if opts.playlists.strict && !recon.unresolved.is_empty() {
        return Err(Error::Unresolved(recon.unresolved.len()));
    }
    Ok(recon)
}

/// Transcode the videos of every saved word.
pub fn run_media(opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<MediaReport> {
    let labels = store::load_words(&opts.export)?;
    let sources = store::load_sources(&opts.export)?;
    let ids: Vec<String> = labels.into_keys().collect();

    let report = media::run(&ids, &sources, &opts.media, progress)?;
    store::update_diagnostics(&opts.export, |d| d.media_errors = report.errored.clone())?;
    Ok(report)
}
