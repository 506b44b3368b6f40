//! Zonekit Geometry
//!
//! Pure geometry operations on flat (latitude, longitude) degree space:
//! polyline buffering, continuity validation, and ring utilities.

pub mod buffer;
pub mod continuity;
pub mod ring;

pub use buffer::{accept_buffer, buffer_line, BufferParams};
pub use continuity::{planar_distance, validate_continuity, validate_geometry, ContinuityCheck};
pub use ring::{close_ring, distinct_count, is_closed, round_ring};
