// src/config/mod.rs

pub mod consts;
pub mod curation;
pub mod options;

pub use curation::Curation;
pub use options::AppOptions;
