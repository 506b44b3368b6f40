//! Schema normalization
//!
//! Maps heterogeneous source records into [`ZoneDraft`]s: resolves the zone
//! kind, restriction text and region label, rounds coordinates, closes
//! polygon rings and buffers line geometry into areas when a batch asks for
//! it.

use serde::{Deserialize, Serialize};
use zonekit_core::{
    Coordinate, Error, Geometry, GeometryType, RecordError, RegionTable, Result, Ring,
    ZoneDraft, ZoneKind, DEFAULT_PRECISION,
};
use zonekit_geometry::{
    accept_buffer, buffer_line, close_ring, distinct_count, round_ring, BufferParams,
};

/// Restriction text used when a record carries neither text nor reason
pub const DEFAULT_RESTRICTION: &str = "낚시 금지";

/// Raw coordinates as they appear in source files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCoordinates {
    Rings(Vec<Ring>),
    Flat(Ring),
}

/// One record from a source file, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    pub name: Option<String>,
    #[serde(rename = "type", alias = "kind")]
    pub kind: Option<String>,
    pub restriction: Option<String>,
    /// Designation reason, translated through the reason rules
    pub reason: Option<String>,
    pub region: Option<String>,
    /// City label, prefixed with the region table prefix
    pub city: Option<String>,
    pub geometry: Option<String>,
    pub coordinates: Option<RawCoordinates>,
    pub section: Option<String>,
}

impl SourceRecord {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_coordinates(mut self, coordinates: RawCoordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    /// Trimmed, non-empty name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }

    /// True when geometry has to come from the geometry source
    pub fn needs_lookup(&self) -> bool {
        match &self.coordinates {
            None => true,
            Some(RawCoordinates::Rings(rings)) => rings.is_empty(),
            Some(RawCoordinates::Flat(ring)) => ring.is_empty(),
        }
    }

    /// Attach rings resolved from the geometry source
    pub fn with_resolved(mut self, rings: Vec<Ring>) -> Self {
        self.coordinates = Some(RawCoordinates::Rings(rings));
        self
    }
}

/// Batch-level values for fields a record omits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceDefaults {
    pub kind: Option<ZoneKind>,
    pub restriction: Option<String>,
    pub region: Option<String>,
    pub section: Option<String>,
    /// Buffer polylines into polygons
    pub as_area: bool,
}

/// Maps a raw reason to restriction text when the reason contains `contains`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasonRule {
    pub contains: String,
    pub restriction: String,
}

impl ReasonRule {
    pub fn new(contains: impl Into<String>, restriction: impl Into<String>) -> Self {
        Self {
            contains: contains.into(),
            restriction: restriction.into(),
        }
    }
}

pub fn default_reason_rules() -> Vec<ReasonRule> {
    vec![
        ReasonRule::new("농업용", "농업용 저수지로 낚시 금지"),
        ReasonRule::new("수질", "수질보전을 위해 낚시 금지"),
        ReasonRule::new("상수원", "상수원보호구역으로 낚시 금지"),
    ]
}

/// Source record → [`ZoneDraft`]
#[derive(Debug, Clone)]
pub struct SchemaNormalizer {
    pub buffer: BufferParams,
    pub min_buffer_vertices: usize,
    pub precision: u32,
    pub reasons: Vec<ReasonRule>,
    pub regions: RegionTable,
}

impl Default for SchemaNormalizer {
    fn default() -> Self {
        Self {
            buffer: BufferParams::default(),
            min_buffer_vertices: 10,
            precision: DEFAULT_PRECISION,
            reasons: default_reason_rules(),
            regions: RegionTable::default(),
        }
    }
}

impl SchemaNormalizer {
    pub fn new(regions: RegionTable) -> Self {
        Self {
            regions,
            ..Self::default()
        }
    }

    /// Restriction text for a raw reason
    pub fn restriction_for_reason(&self, reason: &str) -> String {
        let reason = reason.trim();
        if reason.is_empty() {
            return DEFAULT_RESTRICTION.to_string();
        }
        self.reasons
            .iter()
            .find(|rule| reason.contains(rule.contains.as_str()))
            .map(|rule| rule.restriction.clone())
            .unwrap_or_else(|| reason.to_string())
    }

    fn restriction(&self, record: &SourceRecord, defaults: &SourceDefaults) -> String {
        if let Some(text) = non_empty(&record.restriction) {
            return text.to_string();
        }
        if let Some(reason) = &record.reason {
            return self.restriction_for_reason(reason);
        }
        defaults
            .restriction
            .clone()
            .unwrap_or_else(|| DEFAULT_RESTRICTION.to_string())
    }

    /// Table entry, then explicit region, then prefixed city, then batch default
    fn region(&self, name: &str, record: &SourceRecord, defaults: &SourceDefaults) -> String {
        if let Some(region) = self.regions.region_for(name) {
            return region;
        }
        if let Some(region) = non_empty(&record.region) {
            return region.to_string();
        }
        if let Some(city) = non_empty(&record.city) {
            return self.regions.label(city);
        }
        defaults.region.clone().unwrap_or_default()
    }

    /// Normalize one record. Records that cannot form a valid zone come back
    /// as [`RecordError`] or, for failed buffers, `GeometryError`.
    pub fn normalize(&self, record: &SourceRecord, defaults: &SourceDefaults) -> Result<ZoneDraft> {
        let name = record
            .name()
            .ok_or_else(|| RecordError::MissingField("name".to_string()))?;

        let kind = match non_empty(&record.kind) {
            Some(raw) => raw.parse::<ZoneKind>()?,
            None => defaults.kind.unwrap_or(ZoneKind::Prohibited),
        };

        let declared = non_empty(&record.geometry)
            .map(str::parse::<GeometryType>)
            .transpose()?;

        let rings = match &record.coordinates {
            Some(RawCoordinates::Rings(rings)) if !rings.is_empty() => rings
                .iter()
                .map(|ring| round_ring(ring, self.precision))
                .collect::<Vec<_>>(),
            Some(RawCoordinates::Flat(ring)) if !ring.is_empty() => {
                vec![round_ring(ring, self.precision)]
            }
            _ => return Err(RecordError::MissingField("coordinates".to_string()).into()),
        };

        let geometry = self.build_geometry(declared, rings, defaults.as_area)?;

        let mut draft = ZoneDraft::new(name, kind, geometry)
            .with_restriction(self.restriction(record, defaults))
            .with_region(self.region(name, record, defaults));
        if let Some(section) = non_empty(&record.section).or(defaults.section.as_deref()) {
            draft = draft.with_section(section);
        }
        Ok(draft)
    }

    fn build_geometry(
        &self,
        declared: Option<GeometryType>,
        mut rings: Vec<Ring>,
        as_area: bool,
    ) -> Result<Geometry> {
        let geometry_type = declared.unwrap_or(if rings.len() > 1 {
            GeometryType::Multipolygon
        } else {
            GeometryType::Polygon
        });

        match geometry_type {
            GeometryType::Point => match rings.as_slice() {
                [ring] if ring.len() == 1 => Ok(Geometry::Point(ring[0])),
                _ => Err(RecordError::CoordinateShape {
                    geometry: GeometryType::Point,
                }
                .into()),
            },
            GeometryType::Polyline => {
                if rings.len() != 1 {
                    return Err(RecordError::CoordinateShape {
                        geometry: GeometryType::Polyline,
                    }
                    .into());
                }
                let line = rings.remove(0);
                require_points(&line, GeometryType::Polyline, 2)?;
                if as_area {
                    self.buffer_into_area(&line)
                } else {
                    Ok(Geometry::Polyline(line))
                }
            }
            GeometryType::Polygon if rings.len() == 1 => {
                let ring = rings.remove(0);
                require_points(&ring, GeometryType::Polygon, 3)?;
                Ok(Geometry::Polygon(close_ring(ring)))
            }
            GeometryType::Polygon | GeometryType::Multipolygon => {
                let rings = rings
                    .into_iter()
                    .map(|ring| -> Result<Ring> {
                        require_points(&ring, GeometryType::Multipolygon, 3)?;
                        Ok(close_ring(ring))
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Geometry::MultiPolygon(rings))
            }
        }
    }

    fn buffer_into_area(&self, line: &[Coordinate]) -> Result<Geometry> {
        let ring = buffer_line(line, &self.buffer);
        let ring = accept_buffer(ring, self.min_buffer_vertices).map_err(Error::Geometry)?;
        Ok(Geometry::Polygon(ring))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require_points(ring: &[Coordinate], geometry: GeometryType, required: usize) -> Result<()> {
    let found = distinct_count(ring);
    if found < required {
        return Err(RecordError::TooFewPoints {
            geometry,
            found,
            required,
        }
        .into());
    }
    Ok(())
}
