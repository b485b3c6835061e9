// src/dict/mod.rs
//! The word index itself: label normalization, grouping by base word, and the
//! reconciliation of playlist titles against those groups. Everything here is pure;
//! fetching and saving happen in `scrape` and `store`.

pub mod group;
pub mod normalize;
pub mod reconcile;

pub use group::{WordEntry, WordGroups, exclude, group, id_labels, ingest};
pub use normalize::{base_word, normalize, normalized_key};
pub use reconcile::{KeyCollision, Playlist, PlaylistEntry, Reconciliation, reconcile};
