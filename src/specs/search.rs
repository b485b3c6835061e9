// src/specs/search.rs
//! Spec for the dictionary search endpoint.
//!
//! `admin-ajax.php?action=search_video&term=<letter>` answers with a JSON array of
//! `{ "id": <number or string>, "value": <label> }`, one element per video entry whose
//! label contains the letter.

use serde::Deserialize;

use crate::config::consts::AJAX_URL;
use crate::core::Fetch;
use crate::error::Result;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Num(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Num(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Deserialize)]
struct Hit {
    id: RawId,
    value: String,
}

pub fn fetch(net: &dyn Fetch, letter: char) -> Result<Vec<(String, String)>> {
    let term = letter.to_string();
    let body = net.get(AJAX_URL, &[("action", "search_video"), ("term", &term)])?;
    parse(&body)
}

/// `(id, raw label)` pairs in response order.
pub fn parse(body: &str) -> Result<Vec<(String, String)>> {
    let hits: Vec<Hit> = serde_json::from_str(body)?;
    Ok(hits.into_iter().map(|h| (h.id.into_string(), h.value)).collect())
}
