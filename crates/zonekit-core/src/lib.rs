//! # Zonekit Core
//!
//! Core types for the fishing-restriction zone dataset.
//! Provides the canonical zone model, region tables, and the error types
//! shared by the geometry, store, and ingestion crates.

pub mod error;
pub mod model;
pub mod region;

pub use error::{Error, GeometryError, RecordError, Result, SourceError};

pub use model::{
    round_to, Coordinate, Geometry, GeometryType, Ring, Zone, ZoneDraft, ZoneId, ZoneKind,
    DEFAULT_PRECISION,
};

pub use region::{KindOverride, RegionTable};
