//! # Zonekit Store
//!
//! The consolidation engine: an ordered, name-indexed zone store with
//! ingest-time dedup, id management, region reconciliation and range
//! removal, plus the persisted snapshot with atomic writes.

pub mod error;
pub mod report;
pub mod snapshot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use report::{BatchReport, DedupDecision, DedupOutcome, SkipEntry, SkipKind};
pub use snapshot::{Snapshot, StyleTable, ZoneStyle};
pub use store::{IngestAction, StoreState, ZoneStore};
