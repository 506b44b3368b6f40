//! Continuity validation
//!
//! Catches geometries stitched together from disjoint source segments: if two
//! consecutive points are further apart than `max_gap`, the run was almost
//! certainly concatenated by mistake.
//!
//! Distances are planar Euclidean in degree space, not haversine. Every run is
//! compared against the same fixed threshold regardless of latitude.

use zonekit_core::{Coordinate, Geometry, GeometryError};

/// Outcome of a continuity check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuityCheck {
    pub valid: bool,
    /// Index `i` of the first pair `(i, i + 1)` whose gap exceeds the threshold
    pub first_bad_index: Option<usize>,
    /// Magnitude of that gap, 0.0 when there is none
    pub gap: f64,
    /// Number of points checked
    pub points: usize,
}

impl ContinuityCheck {
    pub fn into_result(self, max_gap: f64) -> Result<(), GeometryError> {
        if self.valid {
            return Ok(());
        }
        match self.first_bad_index {
            Some(index) => Err(GeometryError::ContinuityGap {
                index,
                gap: self.gap,
                max_gap,
            }),
            None => Err(GeometryError::TooShort { found: self.points }),
        }
    }
}

/// Planar distance between two coordinates, in degrees
pub fn planar_distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let dlat = a.lat - b.lat;
    let dlng = a.lng - b.lng;
    (dlat * dlat + dlng * dlng).sqrt()
}

/// Validate that no consecutive pair is further apart than `max_gap`.
///
/// A sequence of fewer than 3 points is always invalid.
pub fn validate_continuity(coords: &[Coordinate], max_gap: f64) -> ContinuityCheck {
    let points = coords.len();
    if points < 3 {
        return ContinuityCheck {
            valid: false,
            first_bad_index: None,
            gap: 0.0,
            points,
        };
    }

    for (i, pair) in coords.windows(2).enumerate() {
        let gap = planar_distance(&pair[0], &pair[1]);
        if gap > max_gap {
            return ContinuityCheck {
                valid: false,
                first_bad_index: Some(i),
                gap,
                points,
            };
        }
    }

    ContinuityCheck {
        valid: true,
        first_bad_index: None,
        gap: 0.0,
        points,
    }
}

/// Validate every coordinate run of a geometry; points always pass
pub fn validate_geometry(geometry: &Geometry, max_gap: f64) -> Result<(), GeometryError> {
    if let Geometry::Point(_) = geometry {
        return Ok(());
    }
    for run in geometry.runs() {
        validate_continuity(run, max_gap).into_result(max_gap)?;
    }
    Ok(())
}
