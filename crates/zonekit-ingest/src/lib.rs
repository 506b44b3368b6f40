//! # Zonekit Ingest
//!
//! Turns heterogeneous source record sets into canonical zones:
//! the schema normalizer, the geometry source with its ordered name
//! fallback, and the batch driver that feeds the consolidation engine.

pub mod normalizer;
pub mod pipeline;
pub mod source;

pub use normalizer::{
    default_reason_rules, RawCoordinates, ReasonRule, SchemaNormalizer, SourceDefaults,
    SourceRecord, DEFAULT_RESTRICTION,
};
pub use pipeline::{IngestionDriver, SourceBatch};
pub use source::{
    default_suffix_rules, GeometrySource, NameCandidates, SourceResolver, StaticGeometrySource,
    SuffixRule,
};
