//! Persisted snapshot
//!
//! The on-disk layout is `{updated, total, zones, styles}`. `updated` and
//! `total` are informational and recomputed on save. Writes go to a temporary
//! file in the target directory and are renamed into place, so a reader never
//! observes a half-written snapshot.

use crate::error::{StoreError, StoreResult};
use crate::store::ZoneStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::Path;
use zonekit_core::{Zone, ZoneKind};

/// Presentation attributes for one zone kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneStyle {
    pub fill_color: String,
    pub fill_opacity: f64,
    pub stroke_color: String,
    pub stroke_weight: f64,
    pub stroke_opacity: f64,
}

impl ZoneStyle {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill_color: fill.to_string(),
            fill_opacity: 0.35,
            stroke_color: stroke.to_string(),
            stroke_weight: 2.0,
            stroke_opacity: 0.8,
        }
    }
}

/// Kind → style map, passed through unchanged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleTable(pub BTreeMap<ZoneKind, ZoneStyle>);

impl Default for StyleTable {
    fn default() -> Self {
        let mut styles = BTreeMap::new();
        styles.insert(ZoneKind::Prohibited, ZoneStyle::new("#FF0000", "#CC0000"));
        styles.insert(ZoneKind::Restricted, ZoneStyle::new("#FFA500", "#CC8400"));
        Self(styles)
    }
}

impl StyleTable {
    pub fn get(&self, kind: ZoneKind) -> Option<&ZoneStyle> {
        self.0.get(&kind)
    }
}

/// The persisted form of a [`ZoneStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default = "Utc::now")]
    pub updated: DateTime<Utc>,
    #[serde(default)]
    pub total: usize,
    pub zones: Vec<Zone>,
    #[serde(default)]
    pub styles: StyleTable,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            updated: Utc::now(),
            total: 0,
            zones: Vec::new(),
            styles: StyleTable::default(),
        }
    }
}

impl Snapshot {
    /// Capture a store, stamping the current time
    pub fn from_store(store: &ZoneStore, styles: StyleTable) -> Self {
        Self {
            updated: Utc::now(),
            total: store.len(),
            zones: store.zones().to_vec(),
            styles,
        }
    }

    /// Split into the store and the untouched style table
    pub fn into_store(self) -> (ZoneStore, StyleTable) {
        (ZoneStore::from_zones(self.zones), self.styles)
    }

    /// Check invariants serde cannot express: ids are unique
    pub fn validate(&self) -> StoreResult<()> {
        let mut seen = HashSet::with_capacity(self.zones.len());
        for zone in &self.zones {
            if !seen.insert(zone.id) {
                return Err(StoreError::InvalidSnapshot(format!(
                    "duplicate id {} ({})",
                    zone.id, zone.name
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate snapshot JSON
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a snapshot from disk
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        tracing::info!(
            "Loaded {} zones from {}",
            snapshot.zones.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Load a snapshot, or start empty if the file does not exist yet
    pub fn load_or_default(path: &Path) -> StoreResult<Self> {
        match Self::load(path) {
            Err(StoreError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No snapshot at {}, starting empty", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Atomically write the snapshot to `path`.
    ///
    /// `total` and `updated` are refreshed before writing.
    pub fn save(&mut self, path: &Path) -> StoreResult<()> {
        self.validate()?;
        self.total = self.zones.len();
        self.updated = Utc::now();
        let json = self.to_json()?;

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut temp = tempfile::NamedTempFile::new_in(parent)?;
        temp.write_all(json.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| StoreError::PersistError {
            path: path.display().to_string(),
            reason: e.error.to_string(),
        })?;

        tracing::info!("Saved {} zones to {}", self.total, path.display());
        Ok(())
    }
}
