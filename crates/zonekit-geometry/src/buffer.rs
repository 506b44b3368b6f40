//! Line buffering
//!
//! Inflates a polyline (e.g. a river centerline) into a closed polygon ring by
//! offsetting every vertex along the perpendicular of its local tangent.
//!
//! The buffer is planar: `distance` is in the same degree units as the input
//! coordinates, so callers pick a constant calibrated for the latitude they
//! work at. Sharp turns and loops can produce self-overlapping rings; nothing
//! here detects or repairs that.

use crate::ring::{distinct_count, round_ring};
use zonekit_core::{Coordinate, GeometryError, Ring, DEFAULT_PRECISION};

/// Parameters for line buffering
#[derive(Debug, Clone, PartialEq)]
pub struct BufferParams {
    /// Half-width of the buffer in coordinate degrees
    pub distance: f64,
    /// Round emitted vertices to this many decimal digits
    pub precision: Option<u32>,
}

impl Default for BufferParams {
    fn default() -> Self {
        Self {
            // roughly 40m of latitude
            distance: 0.0004,
            precision: Some(DEFAULT_PRECISION),
        }
    }
}

impl BufferParams {
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            ..Self::default()
        }
    }

    pub fn unrounded(mut self) -> Self {
        self.precision = None;
        self
    }
}

/// Tangent at vertex `i`: central difference for interior vertices,
/// forward/backward difference at the ends. Returned as (d_lng, d_lat).
fn tangent(line: &[Coordinate], i: usize) -> (f64, f64) {
    let last = line.len() - 1;
    let (from, to) = if i == 0 {
        (line[0], line[1])
    } else if i == last {
        (line[last - 1], line[last])
    } else {
        (line[i - 1], line[i + 1])
    };
    (to.lng - from.lng, to.lat - from.lat)
}

/// Buffer a polyline into a closed ring.
///
/// Emits a left and a right offset point for every vertex whose tangent is
/// non-degenerate, then assembles `left ++ reverse(right)` and closes the ring
/// with its first point. A vertex with a zero-length tangent contributes no
/// points at all.
///
/// # Arguments
/// * `line` - Ordered polyline vertices
/// * `params` - Buffer distance and output rounding
///
/// # Returns
/// The closed ring, or an empty ring when `line` has fewer than 2 distinct points
pub fn buffer_line(line: &[Coordinate], params: &BufferParams) -> Ring {
    if line.len() < 2 || distinct_count(line) < 2 {
        return Vec::new();
    }

    let d = params.distance;
    let mut left = Vec::with_capacity(line.len());
    let mut right = Vec::with_capacity(line.len());

    for (i, vertex) in line.iter().enumerate() {
        let (dx, dy) = tangent(line, i);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            tracing::trace!("Skipping degenerate vertex {} in buffer", i);
            continue;
        }
        let (dx, dy) = (dx / length, dy / length);

        // Perpendicular (-dy, dx) in (lng, lat) space.
        let (perp_lng, perp_lat) = (-dy, dx);

        left.push(Coordinate::new(
            vertex.lat + perp_lat * d,
            vertex.lng + perp_lng * d,
        ));
        right.push(Coordinate::new(
            vertex.lat - perp_lat * d,
            vertex.lng - perp_lng * d,
        ));
    }

    let mut ring = left;
    ring.extend(right.into_iter().rev());
    if let Some(first) = ring.first().copied() {
        ring.push(first);
    }

    match params.precision {
        Some(digits) => round_ring(&ring, digits),
        None => ring,
    }
}

/// Acceptance policy applied by callers after [`buffer_line`]
pub fn accept_buffer(ring: Ring, min_vertices: usize) -> Result<Ring, GeometryError> {
    if ring.is_empty() {
        return Err(GeometryError::EmptyBuffer);
    }
    if ring.len() < min_vertices {
        return Err(GeometryError::TooFewVertices {
            found: ring.len(),
            minimum: min_vertices,
        });
    }
    Ok(ring)
}
