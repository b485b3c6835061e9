// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Each spec covers one remote payload and encodes *where the data lives* in it and
//! *how to extract it tolerantly*.
//!
//! ## What lives here
//! - **Pure parsing** of the four payloads the pipeline consumes:
//!   - `search`: the dictionary's `search_video` JSON (id/label pairs per letter).
//!   - `video`: the `get_myvideo` JSON, whose `html` field embeds `<source>` tags.
//!   - `channel`: a saved copy of the YouTube channel's playlists page.
//!   - `playlist`: one YouTube playlist page (ordered video titles).
//! - A thin `fetch` wrapper per remote payload, built on `core::net::Fetch`.
//!
//! ## What does **not** live here
//! - **Sweeps, pauses and caching**: `scrape` decides what to request and when.
//! - **Title cleaning and matching**: `dict::reconcile` owns that; specs return
//!   titles exactly as displayed (entities decoded, whitespace collapsed).
//! - **Persistence**: `store`.
//!
//! ## Conventions
//! - Case-insensitive tag detection through `core::html::Doc`; no full-document regexes.
//! - Rows that do not have the expected shape are skipped, not reported as errors.
//!   Only a payload that is unusable as a whole (bad JSON) is an error.
//! - Parsers are testable offline against inline fixtures.
pub mod channel;
pub mod playlist;
pub mod search;
pub mod video;
