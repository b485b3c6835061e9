// src/config/curation.rs
//! Hand-maintained data that patches the scraped sources.
//!
//! - `corrections`: raw label → corrected label, applied before the base word is taken.
//! - `excluded_ids`: placeholder or missing-video ids dropped right after ingestion.
//! - `overrides`: cleaned playlist video title → ids, for titles the automatic match
//!   cannot resolve (or resolves wrongly). An empty list means "no dictionary entry".
//!
//! The shipped defaults live in `data/curation.json`; a replacement file can be
//! passed on the command line.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub type CorrectionTable = BTreeMap<String, String>;
pub type OverrideTable = BTreeMap<String, Vec<String>>;

const BUILTIN: &str = include_str!("../../data/curation.json");

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Curation {
    pub corrections: CorrectionTable,
    pub excluded_ids: BTreeSet<String>,
    pub overrides: OverrideTable,
}

impl Curation {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Curation(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInput(format!("curation file {}", path.display())));
        }
        let text = fs::read_to_string(path)?;
        let curation = Self::from_json(&text)?;
        logd!(
            "Curation: {} corrections, {} excluded ids, {} overrides from {}",
            curation.corrections.len(),
            curation.excluded_ids.len(),
            curation.overrides.len(),
            path.display()
        );
        Ok(curation)
    }

    /// Either the file at `path` or the shipped defaults.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Self::builtin(),
        }
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded_ids.contains(id)
    }

    pub fn override_for(&self, title: &str) -> Option<&[String]> {
        self.overrides.get(title).map(Vec::as_slice)
    }
}
