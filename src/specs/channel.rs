// src/specs/channel.rs
//! Spec for a saved copy of the channel's playlists page.
//!
//! Each playlist is a `<ytd-grid-playlist-renderer>` element. Its title anchor carries
//! `href="…list=<playlist id>…"` and the display title as text; the thumbnail anchor
//! points at the same list but has no text, so it is skipped. An anchor with
//! `id="video-title"` wins when present.
//!
//! The page is rendered client-side by YouTube, so it is read from disk (saved from a
//! browser) rather than fetched.

use crate::core::html::{Doc, attr_value, inner_after_open_tag, opener};
use crate::core::sanitize::text_of;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistRef {
    pub id: String,
    /// Display title, trimmed but otherwise raw.
    pub title: String,
}

pub fn parse(html: &str) -> Vec<PlaylistRef> {
    let doc = Doc::new(html);
    let mut out: Vec<PlaylistRef> = Vec::new();

    for renderer in doc.blocks("<ytd-grid-playlist-renderer", "</ytd-grid-playlist-renderer>") {
        let inner = Doc::new(inner_after_open_tag(renderer));
        let mut best: Option<(bool, PlaylistRef)> = None;

        for anchor in inner.blocks("<a", "</a>") {
            let tag = opener(anchor);
            let Some(id) = attr_value(tag, "href").and_then(playlist_id_from_url) else {
                continue;
            };
            let title = text_of(inner_after_open_tag(anchor));
            if title.is_empty() {
                continue;
            }
            let preferred = attr_value(tag, "id") == Some("video-title");
            if best.as_ref().is_none_or(|(was_preferred, _)| preferred && !was_preferred) {
                best = Some((preferred, PlaylistRef { id: s!(id), title }));
            }
        }

        match best {
            Some((_, found)) if !out.iter().any(|p| p.id == found.id) => out.push(found),
            Some(_) => {}
            None => logd!("Channel: renderer without a titled playlist link"),
        }
    }
    out
}

/// The `list` query parameter of a playlist or watch URL.
pub fn playlist_id_from_url(url: &str) -> Option<&str> {
    let query = &url[url.find('?')? + 1..];
    query
        .split("&amp;")
        .flat_map(|part| part.split('&'))
        .find_map(|pair| pair.strip_prefix("list="))
        .filter(|id| !id.is_empty())
}
