//! # Zonekit
//!
//! Consolidates fishing-restriction zones from heterogeneous sources into a
//! single canonical dataset:
//! - River centerlines buffered into area polygons
//! - Continuity validation of coordinate runs
//! - Ingest-time dedup by name with deterministic tie-breaking
//! - Region reconciliation, range removal and id compaction
//! - Atomic snapshot persistence
//!
//! ## Architecture
//!
//! Zonekit is organized as a workspace with multiple crates:
//!
//! 1. **zonekit-core** - Zone model, region tables, error types
//! 2. **zonekit-geometry** - Buffering, continuity validation, ring helpers
//! 3. **zonekit-store** - Consolidation engine, batch report, snapshot
//! 4. **zonekit-ingest** - Schema normalizer, geometry source, batch driver
//! 5. **zonekit-settings** - Configuration files and validation
//! 6. **zonekit** - CLI binary that integrates all crates

pub mod cli;
pub mod commands;

pub use zonekit_core::{
    Coordinate, Error, Geometry, GeometryType, KindOverride, RegionTable, Result, Zone,
    ZoneDraft, ZoneId, ZoneKind,
};
pub use zonekit_geometry::{buffer_line, validate_continuity, BufferParams, ContinuityCheck};
pub use zonekit_ingest::{
    GeometrySource, IngestionDriver, SchemaNormalizer, SourceBatch, SourceRecord,
    StaticGeometrySource,
};
pub use zonekit_settings::Config;
pub use zonekit_store::{BatchReport, Snapshot, StyleTable, ZoneStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Pretty formatted output on stderr (stdout carries the JSON report)
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
