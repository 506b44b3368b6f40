//! Region normalization tables
//!
//! Source records label their administrative area inconsistently. A
//! [`RegionTable`] maps a zone name to a city and renders the canonical
//! region label as `"<prefix> <city>"`.

use crate::model::ZoneKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Explicit name → region table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionTable {
    /// Province-level prefix, e.g. "경기도"
    #[serde(default)]
    pub prefix: String,
    /// Zone name → city
    #[serde(default)]
    pub mapping: BTreeMap<String, String>,
}

impl RegionTable {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            mapping: BTreeMap::new(),
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>, city: impl Into<String>) -> Self {
        self.insert(name, city);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, city: impl Into<String>) {
        self.mapping.insert(name.into(), city.into());
    }

    /// Render the prefixed label for a city
    pub fn label(&self, city: &str) -> String {
        if self.prefix.is_empty() {
            city.to_string()
        } else {
            format!("{} {}", self.prefix, city)
        }
    }

    /// Canonical region for `name`, if the table knows it
    pub fn region_for(&self, name: &str) -> Option<String> {
        self.mapping.get(name).map(|city| self.label(city))
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

/// Kind upgrade for a named zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindOverride {
    pub name: String,
    pub kind: ZoneKind,
    pub restriction: String,
}
