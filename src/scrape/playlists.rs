// src/scrape/playlists.rs
use std::{fs, path::Path, thread};

use crate::{
    config::options::PlaylistOptions,
    core::Fetch,
    dict::Playlist,
    error::{Error, Result},
    progress::Progress,
    specs,
};

/// Read the saved channel page, then every dictionary playlist it links to.
///
/// Playlist pages come from the cache directory when present; otherwise they are
/// fetched (unless `net` is `None`) and cached as fetched. A playlist whose page is
/// unavailable is skipped with a warning.
pub fn collect_playlists(
    net: Option<&dyn Fetch>,
    opts: &PlaylistOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Playlist>> {
    if !opts.channel_file.exists() {
        return Err(Error::MissingInput(format!(
            "channel playlists page {}",
            opts.channel_file.display()
        )));
    }
    let channel = fs::read_to_string(&opts.channel_file)?;
    let refs: Vec<_> = specs::channel::parse(&channel)
        .into_iter()
        .filter(|r| r.title.starts_with(opts.reconcile.category_prefix.as_str()))
        .collect();
    logf!("Channel page lists {} dictionary playlists", refs.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(refs.len());
    }

    let mut out = Vec::with_capacity(refs.len());
    let mut fetched_any = false;
    for r in refs {
        let cached = cache_path(&opts.cache_dir, &r.id).is_some_and(|p| p.exists());
        if !cached && fetched_any && net.is_some() && !opts.fetch_pause.is_zero() {
            thread::sleep(opts.fetch_pause);
        }
        match load_cached_or_fetch(net, &opts.cache_dir, &r.id) {
            Ok(Some(html)) => {
                fetched_any |= !cached;
                let videos = specs::playlist::parse_videos(&html);
                logd!("Playlist {} {:?}: {} videos", r.id, r.title, videos.len());
                out.push(Playlist { id: r.id.clone(), title: r.title, videos });
            }
            Ok(None) => logw!("Playlist {} {:?} not cached, skipping (offline)", r.id, r.title),
            Err(e) => loge!("Playlist {} {:?} failed, skipping: {e}", r.id, r.title),
        }
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(&r.id);
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(out)
}

/// `None` for ids that are not safe as file names.
fn cache_path(cache_dir: &Path, playlist_id: &str) -> Option<std::path::PathBuf> {
    let safe = !playlist_id.is_empty()
        && playlist_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    safe.then(|| cache_dir.join(format!("{playlist_id}.html")))
}

/// Cached page text, or a fresh fetch written to the cache. `Ok(None)` when the
/// page is not cached and there is no client to fetch it with.
pub fn load_cached_or_fetch(
    net: Option<&dyn Fetch>,
    cache_dir: &Path,
    playlist_id: &str,
) -> Result<Option<String>> {
    let path = cache_path(cache_dir, playlist_id)
        .ok_or_else(|| Error::Parse(format!("unexpected playlist id {playlist_id:?}")))?;
    if path.exists() {
        return Ok(Some(fs::read_to_string(&path)?));
    }
    let Some(net) = net else {
        return Ok(None);
    };
    let html = specs::playlist::fetch(net, playlist_id)?;
    fs::create_dir_all(cache_dir)?;
    fs::write(&path, &html)?;
    Ok(Some(html))
}
