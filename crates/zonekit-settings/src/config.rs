//! Configuration management for Zonekit
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Geometry settings (buffer distance, continuity threshold, precision)
//! - Source settings (timeouts, pacing, spelling fallbacks)
//! - Region table and kind overrides
//! - Reason rules
//! - Snapshot location

use crate::error::{ConfigError, SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use zonekit_core::{KindOverride, RegionTable, ZoneKind, DEFAULT_PRECISION};
use zonekit_geometry::BufferParams;
use zonekit_ingest::{
    default_reason_rules, default_suffix_rules, GeometrySource, NameCandidates, ReasonRule,
    SchemaNormalizer, SourceResolver, SuffixRule,
};

/// Highest supported coordinate precision
pub const MAX_PRECISION: u32 = 12;

/// Geometry constants, all in coordinate-degree units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometrySettings {
    /// Half-width used to inflate river centerlines
    pub buffer_distance: f64,
    /// Buffers with fewer vertices are rejected
    pub min_buffer_vertices: usize,
    /// Continuity threshold between consecutive points
    pub max_gap: f64,
    /// Decimal digits kept on every coordinate
    pub coordinate_precision: u32,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            buffer_distance: 0.0004,
            min_buffer_vertices: 10,
            max_gap: 0.05,
            coordinate_precision: DEFAULT_PRECISION,
        }
    }
}

impl GeometrySettings {
    pub fn buffer_params(&self) -> BufferParams {
        BufferParams {
            distance: self.buffer_distance,
            precision: Some(self.coordinate_precision),
        }
    }
}

/// External geometry source settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Per-attempt timeout
    pub timeout_ms: u64,
    /// Minimum spacing between consecutive calls
    pub min_delay_ms: u64,
    /// Ordered spelling substitutions
    pub suffix_rules: Vec<SuffixRule>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 60_000,
            min_delay_ms: 1500,
            suffix_rules: default_suffix_rules(),
        }
    }
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }
}

/// Snapshot location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotSettings {
    pub path: PathBuf,
}

impl Default for SnapshotSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fishingZones.json"),
        }
    }
}

/// Kind upgrades applied by the reconcile pass in the Gyeonggi register
fn default_overrides() -> Vec<KindOverride> {
    ["발랑저수지", "마지저수지"]
        .iter()
        .map(|name| KindOverride {
            name: name.to_string(),
            kind: ZoneKind::Restricted,
            restriction: "제한구역 - 일부 낚시만 허용".to_string(),
        })
        .collect()
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Geometry settings
    pub geometry: GeometrySettings,
    /// Geometry source settings
    pub source: SourceSettings,
    /// Snapshot location
    pub snapshot: SnapshotSettings,
    /// Reason → restriction rules, first match wins
    pub reasons: Vec<ReasonRule>,
    /// Kind upgrades by name
    pub overrides: Vec<KindOverride>,
    /// name → region table
    pub regions: RegionTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geometry: GeometrySettings::default(),
            source: SourceSettings::default(),
            snapshot: SnapshotSettings::default(),
            reasons: default_reason_rules(),
            overrides: default_overrides(),
            regions: RegionTable::new("경기도"),
        }
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file: `<config dir>/zonekit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("zonekit").join("config.toml"))
            .ok_or_else(|| {
                ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string()).into()
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.geometry.buffer_distance.is_nan() || self.geometry.buffer_distance <= 0.0 {
            return Err(SettingsError::invalid("geometry.buffer_distance", "must be > 0"));
        }

        if self.geometry.min_buffer_vertices == 0 {
            return Err(SettingsError::invalid(
                "geometry.min_buffer_vertices",
                "must be > 0",
            ));
        }

        if self.geometry.max_gap.is_nan() || self.geometry.max_gap <= 0.0 {
            return Err(SettingsError::invalid("geometry.max_gap", "must be > 0"));
        }

        if self.geometry.coordinate_precision > MAX_PRECISION {
            return Err(SettingsError::invalid(
                "geometry.coordinate_precision",
                format!("must be <= {}", MAX_PRECISION),
            ));
        }

        if self.source.timeout_ms == 0 {
            return Err(SettingsError::invalid("source.timeout_ms", "must be > 0"));
        }

        if self.source.suffix_rules.iter().any(|r| r.suffix.is_empty()) {
            return Err(SettingsError::invalid(
                "source.suffix_rules",
                "suffix must not be empty",
            ));
        }

        if self.snapshot.path.as_os_str().is_empty() {
            return Err(SettingsError::invalid("snapshot.path", "must not be empty"));
        }

        Ok(())
    }

    /// Schema normalizer configured from the geometry, reason and region sections
    pub fn normalizer(&self) -> SchemaNormalizer {
        SchemaNormalizer {
            buffer: self.geometry.buffer_params(),
            min_buffer_vertices: self.geometry.min_buffer_vertices,
            precision: self.geometry.coordinate_precision,
            reasons: self.reasons.clone(),
            regions: self.regions.clone(),
        }
    }

    pub fn name_candidates(&self) -> NameCandidates {
        NameCandidates::new(self.source.suffix_rules.clone())
    }

    pub fn resolver<S: GeometrySource>(&self, source: S) -> SourceResolver<S> {
        SourceResolver::new(source, self.source.timeout(), self.source.min_delay())
            .with_precision(self.geometry.coordinate_precision)
    }
}
