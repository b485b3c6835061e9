// src/specs/video.rs
//! Spec for the per-word video endpoint.
//!
//! A form POST `action=get_myvideo, post_title=<label>, page_id=<id>` returns
//! `{ "html": "<video …><source type=\"video/mp4\" src=\"…\">…</video>" }`.
//! The result is a map of MIME type to source URL.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::config::consts::AJAX_URL;
use crate::core::html::{Doc, attr_value};
use crate::core::sanitize::normalize_entities;
use crate::core::Fetch;
use crate::error::Result;

#[derive(Deserialize)]
struct VideoReply {
    #[serde(default)]
    html: String,
}

pub fn fetch(net: &dyn Fetch, id: &str, label: &str) -> Result<BTreeMap<String, String>> {
    let body = net.post_form(
        AJAX_URL,
        &[("action", "get_myvideo"), ("post_title", label), ("page_id", id)],
    )?;
    parse(&body)
}

pub fn parse(body: &str) -> Result<BTreeMap<String, String>> {
    let reply: VideoReply = serde_json::from_str(body)?;
    Ok(parse_sources(&reply.html))
}

/// `<source type=… src=…>` tags; tags missing either attribute are ignored and the
/// first source of a given type wins.
pub fn parse_sources(html: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for tag in Doc::new(html).openers("<source") {
        if let (Some(kind), Some(src)) = (attr_value(tag, "type"), attr_value(tag, "src")) {
            out.entry(kind.trim().to_ascii_lowercase())
                .or_insert_with(|| normalize_entities(src.trim()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sources_by_mime_type() {
        let body = r#"{"html": "<video controls><source type=\"video/mp4\" src=\"http://isl.org.il/v/bread 1.mp4\"><source type='video/webm' src='http://isl.org.il/v/bread.webm?a=1&amp;b=2'><source src=\"no-type.ogv\"></video>"}"#;
        let sources = parse(body).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources["video/mp4"], "http://isl.org.il/v/bread 1.mp4");
        assert_eq!(sources["video/webm"], "http://isl.org.il/v/bread.webm?a=1&b=2");
    }

    #[test]
    fn reply_without_html_has_no_sources() {
        assert!(parse(r#"{"success": false}"#).unwrap().is_empty());
    }
}
