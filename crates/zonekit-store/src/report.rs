//! Batch report
//!
//! Every batch produces a report alongside the new store: how many zones were
//! added or replaced, every record that was skipped and why, and every
//! same-name collision with the decision taken. Continuity audits land in
//! their own list since nothing was skipped.

use serde::Serialize;
use std::collections::BTreeMap;
use zonekit_core::{Error, GeometryError, ZoneId};

/// Why a record was left out of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipKind {
    SourceUnavailable,
    MalformedRecord,
    DegenerateGeometry,
    IdSpaceExhausted,
}

impl SkipKind {
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Source(_) => Self::SourceUnavailable,
            Error::Geometry(_) => Self::DegenerateGeometry,
            _ => Self::MalformedRecord,
        }
    }
}

impl std::fmt::Display for SkipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SourceUnavailable => write!(f, "source unavailable"),
            Self::MalformedRecord => write!(f, "malformed record"),
            Self::DegenerateGeometry => write!(f, "degenerate geometry"),
            Self::IdSpaceExhausted => write!(f, "id space exhausted"),
        }
    }
}

/// One skipped record: `(name, reason, diagnostic index/distance)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkipEntry {
    pub name: String,
    pub kind: SkipKind,
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl SkipEntry {
    pub fn from_error(name: impl Into<String>, err: &Error) -> Self {
        let diagnostic = match err {
            Error::Geometry(geometry) => geometry.diagnostic(),
            _ => None,
        };
        Self {
            name: name.into(),
            kind: SkipKind::from_error(err),
            reason: err.to_string(),
            index: diagnostic.map(|(index, _)| index),
            distance: diagnostic.map(|(_, distance)| distance),
        }
    }

    pub fn from_geometry(name: impl Into<String>, err: GeometryError) -> Self {
        Self::from_error(name, &Error::Geometry(err))
    }

    /// No id above `max_id` is left to assign
    pub fn id_exhausted(name: impl Into<String>, max_id: ZoneId) -> Self {
        Self {
            name: name.into(),
            kind: SkipKind::IdSpaceExhausted,
            reason: format!("no id left after {}", max_id),
            index: None,
            distance: None,
        }
    }
}

/// Which side of a same-name collision survived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupOutcome {
    KeptExisting,
    ReplacedWithIncoming,
}

/// Audit record for one name collision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DedupDecision {
    pub name: String,
    pub outcome: DedupOutcome,
    /// Id of the surviving zone
    pub kept_id: ZoneId,
    pub existing_count: usize,
    pub incoming_count: usize,
}

/// Result of a batch pass over the store
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchReport {
    pub added: usize,
    pub replaced: usize,
    pub kept_existing: usize,
    pub removed: usize,
    pub updated: usize,
    pub skip_counts: BTreeMap<SkipKind, usize>,
    pub skipped: Vec<SkipEntry>,
    pub collisions: Vec<DedupDecision>,
    /// Zones failing a continuity audit
    pub discontinuous: Vec<SkipEntry>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_skip(&mut self, entry: SkipEntry) {
        tracing::warn!(
            "Skipped {}: {} ({})",
            entry.name,
            entry.reason,
            entry.kind
        );
        *self.skip_counts.entry(entry.kind).or_insert(0) += 1;
        self.skipped.push(entry);
    }

    pub fn record_collision(&mut self, decision: DedupDecision) {
        match decision.outcome {
            DedupOutcome::KeptExisting => self.kept_existing += 1,
            DedupOutcome::ReplacedWithIncoming => self.replaced += 1,
        }
        self.collisions.push(decision);
    }

    pub fn record_discontinuity(&mut self, entry: SkipEntry) {
        tracing::info!("Discontinuous {}: {}", entry.name, entry.reason);
        self.discontinuous.push(entry);
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn skip_count(&self, kind: SkipKind) -> usize {
        self.skip_counts.get(&kind).copied().unwrap_or(0)
    }

    /// Fold another report into this one
    pub fn merge(&mut self, other: BatchReport) {
        self.added += other.added;
        self.replaced += other.replaced;
        self.kept_existing += other.kept_existing;
        self.removed += other.removed;
        self.updated += other.updated;
        for (kind, count) in other.skip_counts {
            *self.skip_counts.entry(kind).or_insert(0) += count;
        }
        self.skipped.extend(other.skipped);
        self.collisions.extend(other.collisions);
        self.discontinuous.extend(other.discontinuous);
    }
}
