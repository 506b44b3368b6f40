//! Ring helpers
//!
//! Small utilities shared by the buffer and the normalizer: rounding,
//! closing, and counting distinct coordinates.

use std::collections::HashSet;
use zonekit_core::{Coordinate, Ring};

fn key(c: &Coordinate) -> (u64, u64) {
    // `+ 0.0` folds -0.0 into 0.0 so both hash the same.
    ((c.lat + 0.0).to_bits(), (c.lng + 0.0).to_bits())
}

/// Number of distinct coordinate pairs (exact comparison)
pub fn distinct_count(coords: &[Coordinate]) -> usize {
    coords.iter().map(key).collect::<HashSet<_>>().len()
}

/// First coordinate equals the last and the ring is not empty
pub fn is_closed(ring: &[Coordinate]) -> bool {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) => ring.len() > 1 && first == last,
        _ => false,
    }
}

/// Append the first coordinate when the ring is open
pub fn close_ring(mut ring: Ring) -> Ring {
    if let Some(first) = ring.first().copied() {
        if !is_closed(&ring) {
            ring.push(first);
        }
    }
    ring
}

/// Round every coordinate to `digits` decimal places
pub fn round_ring(ring: &[Coordinate], digits: u32) -> Ring {
    ring.iter().map(|c| c.rounded(digits)).collect()
}
