//! Zone data model
//!
//! A [`Zone`] is one canonical restriction record: identity, legal metadata,
//! and a geometry in flat (latitude, longitude) degree space. A [`ZoneDraft`]
//! is the same record before the store has assigned it an id.

use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Decimal digits kept for every coordinate entering the store.
pub const DEFAULT_PRECISION: u32 = 6;

/// Round a value to a fixed number of decimal digits
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// A (latitude, longitude) pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Copy of this coordinate rounded to `digits` decimal places
    pub fn rounded(self, digits: u32) -> Self {
        Self {
            lat: round_to(self.lat, digits),
            lng: round_to(self.lng, digits),
        }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

/// An ordered coordinate sequence (polyline or polygon ring)
pub type Ring = Vec<Coordinate>;

/// Legal status of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Fishing is forbidden
    Prohibited,
    /// Fishing is allowed with restrictions
    Restricted,
}

impl ZoneKind {
    pub fn all() -> &'static [ZoneKind] {
        &[ZoneKind::Prohibited, ZoneKind::Restricted]
    }
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prohibited => write!(f, "prohibited"),
            Self::Restricted => write!(f, "restricted"),
        }
    }
}

impl FromStr for ZoneKind {
    type Err = RecordError;

    /// Accepts the persisted tags as well as the Korean designations used in
    /// the provincial registers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "prohibited" | "금지" | "금지구역" => Ok(Self::Prohibited),
            "restricted" | "제한" | "제한구역" => Ok(Self::Restricted),
            other => Err(RecordError::UnknownKind(other.to_string())),
        }
    }
}

/// Geometry tag of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryType {
    Point,
    Polyline,
    #[default]
    Polygon,
    Multipolygon,
}

impl std::fmt::Display for GeometryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Point => write!(f, "point"),
            Self::Polyline => write!(f, "polyline"),
            Self::Polygon => write!(f, "polygon"),
            Self::Multipolygon => write!(f, "multipolygon"),
        }
    }
}

impl FromStr for GeometryType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "point" => Ok(Self::Point),
            "polyline" | "line" | "linestring" => Ok(Self::Polyline),
            "polygon" => Ok(Self::Polygon),
            "multipolygon" => Ok(Self::Multipolygon),
            other => Err(RecordError::UnknownGeometry(other.to_string())),
        }
    }
}

/// Zone geometry
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    Polyline(Ring),
    /// Closed ring: first coordinate equals the last
    Polygon(Ring),
    MultiPolygon(Vec<Ring>),
}

impl Geometry {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::Polyline(_) => GeometryType::Polyline,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::MultiPolygon(_) => GeometryType::Multipolygon,
        }
    }

    /// Number of coordinates, summed across rings for multipolygons
    pub fn coordinate_count(&self) -> usize {
        match self {
            Self::Point(_) => 1,
            Self::Polyline(ring) | Self::Polygon(ring) => ring.len(),
            Self::MultiPolygon(rings) => rings.iter().map(Vec::len).sum(),
        }
    }

    /// Every coordinate run in this geometry
    pub fn runs(&self) -> Vec<&[Coordinate]> {
        match self {
            Self::Point(c) => vec![std::slice::from_ref(c)],
            Self::Polyline(ring) | Self::Polygon(ring) => vec![ring.as_slice()],
            Self::MultiPolygon(rings) => rings.iter().map(Vec::as_slice).collect(),
        }
    }
}

/// Zone identifier, unique and positive within a store
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

impl std::fmt::Display for ZoneId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDraft {
    pub name: String,
    pub kind: ZoneKind,
    pub restriction: String,
    pub region: String,
    pub geometry: Geometry,
    pub section: Option<String>,
}

impl ZoneDraft {
    pub fn new(name: impl Into<String>, kind: ZoneKind, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            kind,
            restriction: String::new(),
            region: String::new(),
            geometry,
            section: None,
        }
    }

    pub fn with_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.restriction = restriction.into();
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn coordinate_count(&self) -> usize {
        self.geometry.coordinate_count()
    }

    /// Promote to a stored zone under `id`
    pub fn into_zone(self, id: ZoneId) -> Zone {
        Zone {
            id,
            name: self.name,
            kind: self.kind,
            restriction: self.restriction,
            region: self.region,
            geometry: self.geometry,
            section: self.section,
        }
    }
}

/// Canonical restriction record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ZoneRecord", into = "ZoneRecord")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub kind: ZoneKind,
    pub restriction: String,
    pub region: String,
    pub geometry: Geometry,
    pub section: Option<String>,
}

impl Zone {
    pub fn coordinate_count(&self) -> usize {
        self.geometry.coordinate_count()
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry.geometry_type()
    }

    /// Replace everything but the id with the contents of `draft`
    pub fn overwrite_with(&mut self, draft: ZoneDraft) {
        self.name = draft.name;
        self.kind = draft.kind;
        self.restriction = draft.restriction;
        self.region = draft.region;
        self.geometry = draft.geometry;
        self.section = draft.section;
    }
}

/// Persisted field layout: `{id, name, type, restriction, region, geometry, coordinates[, section]}`
#[derive(Serialize, Deserialize)]
struct ZoneRecord {
    id: u32,
    name: String,
    #[serde(rename = "type")]
    kind: ZoneKind,
    #[serde(default)]
    restriction: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    geometry: GeometryType,
    coordinates: CoordinatesRepr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    section: Option<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum CoordinatesRepr {
    Rings(Vec<Ring>),
    Flat(Ring),
}

impl TryFrom<ZoneRecord> for Zone {
    type Error = RecordError;

    fn try_from(record: ZoneRecord) -> Result<Self, Self::Error> {
        if record.id == 0 {
            return Err(RecordError::InvalidId(record.id));
        }

        let shape_error = RecordError::CoordinateShape {
            geometry: record.geometry,
        };
        let geometry = match (record.geometry, record.coordinates) {
            (GeometryType::Multipolygon, CoordinatesRepr::Rings(rings)) => {
                Geometry::MultiPolygon(rings)
            }
            // An empty list parses as an empty list of rings.
            (GeometryType::Polygon, CoordinatesRepr::Rings(rings)) if rings.is_empty() => {
                Geometry::Polygon(Vec::new())
            }
            (GeometryType::Polyline, CoordinatesRepr::Rings(rings)) if rings.is_empty() => {
                Geometry::Polyline(Vec::new())
            }
            (GeometryType::Polygon, CoordinatesRepr::Flat(ring)) => Geometry::Polygon(ring),
            (GeometryType::Polyline, CoordinatesRepr::Flat(ring)) => Geometry::Polyline(ring),
            (GeometryType::Point, CoordinatesRepr::Flat(ring)) if ring.len() == 1 => {
                Geometry::Point(ring[0])
            }
            _ => return Err(shape_error),
        };

        Ok(Zone {
            id: ZoneId(record.id),
            name: record.name,
            kind: record.kind,
            restriction: record.restriction,
            region: record.region,
            geometry,
            section: record.section.filter(|s| !s.is_empty()),
        })
    }
}

impl From<Zone> for ZoneRecord {
    fn from(zone: Zone) -> Self {
        let geometry = zone.geometry.geometry_type();
        let coordinates = match zone.geometry {
            Geometry::Point(c) => CoordinatesRepr::Flat(vec![c]),
            Geometry::Polyline(ring) | Geometry::Polygon(ring) => CoordinatesRepr::Flat(ring),
            Geometry::MultiPolygon(rings) => CoordinatesRepr::Rings(rings),
        };
        ZoneRecord {
            id: zone.id.0,
            name: zone.name,
            kind: zone.kind,
            restriction: zone.restriction,
            region: zone.region,
            geometry,
            coordinates,
            section: zone.section,
        }
    }
}
