//! Batch ingestion driver
//!
//! Runs each source batch through normalization, geometry lookup, continuity
//! validation and finally [`ZoneStore::ingest`]. The driver works on a copy of
//! the store and hands back a new value, so a batch abandoned half-way leaves
//! the caller's store (and its snapshot on disk) untouched.

use crate::normalizer::{SchemaNormalizer, SourceDefaults, SourceRecord};
use crate::source::{GeometrySource, NameCandidates, SourceResolver};
use serde::{Deserialize, Serialize};
use std::path::Path;
use zonekit_core::{Result, ZoneDraft};
use zonekit_geometry::validate_geometry;
use zonekit_store::{BatchReport, SkipEntry, ZoneStore};

/// One source record set: `{label, defaults, records}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceBatch {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub defaults: SourceDefaults,
    pub records: Vec<SourceRecord>,
}

impl SourceBatch {
    pub fn new(label: impl Into<String>, records: Vec<SourceRecord>) -> Self {
        Self {
            label: label.into(),
            defaults: SourceDefaults::default(),
            records,
        }
    }

    pub fn with_defaults(mut self, defaults: SourceDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Load a batch file. A missing label falls back to the file stem.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut batch: SourceBatch = serde_json::from_str(&content)?;
        if batch.label.is_empty() {
            batch.label = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(batch)
    }
}

/// Sequential batch ingestion
pub struct IngestionDriver<S: GeometrySource> {
    normalizer: SchemaNormalizer,
    resolver: SourceResolver<S>,
    candidates: NameCandidates,
    max_gap: f64,
}

impl<S: GeometrySource> IngestionDriver<S> {
    pub fn new(
        normalizer: SchemaNormalizer,
        resolver: SourceResolver<S>,
        candidates: NameCandidates,
        max_gap: f64,
    ) -> Self {
        Self {
            normalizer,
            resolver,
            candidates,
            max_gap,
        }
    }

    /// Normalize and validate one record, looking its geometry up if needed
    async fn prepare(
        &mut self,
        record: &SourceRecord,
        defaults: &SourceDefaults,
    ) -> Result<ZoneDraft> {
        let draft = match record.name() {
            Some(name) if record.needs_lookup() => {
                let candidates = self.candidates.build(name);
                let rings = self.resolver.resolve(&candidates).await?;
                let resolved = record.clone().with_resolved(rings);
                self.normalizer.normalize(&resolved, defaults)?
            }
            _ => self.normalizer.normalize(record, defaults)?,
        };
        validate_geometry(&draft.geometry, self.max_gap)?;
        Ok(draft)
    }

    /// Ingest one batch into `store`, recording skips in `report`
    async fn run_batch(
        &mut self,
        store: &mut ZoneStore,
        batch: &SourceBatch,
        report: &mut BatchReport,
    ) {
        tracing::info!("Batch '{}': {} records", batch.label, batch.records.len());
        let mut drafts = Vec::with_capacity(batch.records.len());
        for (position, record) in batch.records.iter().enumerate() {
            match self.prepare(record, &batch.defaults).await {
                Ok(draft) => drafts.push(draft),
                Err(err) => {
                    let name = record
                        .name()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{}#{}", batch.label, position));
                    report.record_skip(SkipEntry::from_error(name, &err));
                }
            }
        }
        report.merge(store.ingest(drafts));
    }

    /// Run every batch in order against a copy of `store`.
    ///
    /// Individual bad records never abort the run; they show up in the
    /// returned report.
    pub async fn run(
        &mut self,
        store: &ZoneStore,
        batches: &[SourceBatch],
    ) -> (ZoneStore, BatchReport) {
        let mut working = store.clone();
        let mut report = BatchReport::new();
        for batch in batches {
            self.run_batch(&mut working, batch, &mut report).await;
        }
        tracing::info!(
            "Ingestion finished: {} zones, {} added, {} skipped",
            working.len(),
            report.added,
            report.skipped_count()
        );
        (working, report)
    }
}
