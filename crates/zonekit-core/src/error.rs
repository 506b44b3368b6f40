//! Error handling for Zonekit
//!
//! Provides the error types shared by every layer of the pipeline:
//! - Record errors (malformed source records)
//! - Geometry errors (degenerate buffers, discontinuous coordinate runs)
//! - Source errors (the external geometry source timing out or failing)
//!
//! None of these abort a batch. The ingestion driver turns them into skip
//! entries in the batch report.

use crate::model::GeometryType;
use thiserror::Error;

/// Malformed source record
///
/// A record that lacks a required field or whose coordinates cannot form the
/// geometry it claims to have.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// A required field is missing or empty
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Not enough distinct points for the geometry type
    #[error("Too few points for {geometry}: found {found}, need at least {required}")]
    TooFewPoints {
        /// The geometry the record was normalized to.
        geometry: GeometryType,
        /// Distinct points found.
        found: usize,
        /// Minimum distinct points required.
        required: usize,
    },

    /// The coordinate nesting does not match the geometry tag
    #[error("Coordinate shape does not match geometry '{geometry}'")]
    CoordinateShape {
        /// The declared geometry.
        geometry: GeometryType,
    },

    /// Unrecognised zone kind
    #[error("Unknown zone type: {0}")]
    UnknownKind(String),

    /// Unrecognised geometry tag
    #[error("Unknown geometry: {0}")]
    UnknownGeometry(String),

    /// Zone ids are positive integers
    #[error("Invalid zone id: {0}")]
    InvalidId(u32),
}

/// Degenerate geometry
///
/// Raised when buffering yields too few vertices or a coordinate run has a
/// gap above the continuity threshold.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The buffer produced nothing (fewer than 2 distinct input points)
    #[error("Buffer produced no vertices")]
    EmptyBuffer,

    /// The buffer produced fewer vertices than the acceptance threshold
    #[error("Buffer produced {found} vertices, minimum is {minimum}")]
    TooFewVertices {
        /// Vertices produced.
        found: usize,
        /// Configured minimum.
        minimum: usize,
    },

    /// Consecutive points are implausibly far apart
    #[error("Gap of {gap:.4} degrees after index {index} exceeds {max_gap}")]
    ContinuityGap {
        /// Index of the first point of the offending pair.
        index: usize,
        /// The gap distance in degrees.
        gap: f64,
        /// The configured threshold.
        max_gap: f64,
    },

    /// Sequences shorter than three points never pass continuity validation
    #[error("Coordinate run too short for continuity check: {found} points")]
    TooShort {
        /// Points found.
        found: usize,
    },
}

impl GeometryError {
    /// Index and distance for diagnostics, when the error carries them
    pub fn diagnostic(&self) -> Option<(usize, f64)> {
        match self {
            Self::ContinuityGap { index, gap, .. } => Some((*index, *gap)),
            _ => None,
        }
    }
}

/// Geometry source error
///
/// Represents failures of the external collaborator that resolves names to
/// coordinate rings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// A single attempt exceeded its timeout
    #[error("Geometry source timed out after {timeout_ms}ms for '{candidate}'")]
    Timeout {
        /// The name candidate being queried.
        candidate: String,
        /// The per-attempt timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The source failed for a single attempt
    #[error("Geometry source request failed: {reason}")]
    Request {
        /// The reason reported by the source.
        reason: String,
    },

    /// Every name candidate failed or came back empty
    #[error("No geometry found for any of: {}", candidates.join(", "))]
    Unavailable {
        /// The candidates that were tried, in order.
        candidates: Vec<String>,
    },
}

/// Main error type for Zonekit
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed record
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Degenerate geometry
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Geometry source failure
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Source(SourceError::Timeout { .. }))
    }

    /// Check if this is a malformed record
    pub fn is_record_error(&self) -> bool {
        matches!(self, Error::Record(_))
    }

    /// Check if this is a degenerate geometry
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }

    /// Check if this is a geometry source failure
    pub fn is_source_error(&self) -> bool {
        matches!(self, Error::Source(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
