// src/scrape/mod.rs
//! Sequential sweeps over the remote sources. One request at a time with a fixed pause
//! in between; a failed request is logged and skipped.
mod playlists;
mod sources;
mod words;

pub use playlists::{collect_playlists, load_cached_or_fetch};
pub use sources::{Sources, collect_sources, exclude_sources};
pub use words::collect_words;
