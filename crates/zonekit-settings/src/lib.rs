//! # Zonekit Settings
//!
//! Configuration file handling (JSON or TOML), defaults and validation.

pub mod config;
pub mod error;

pub use config::{
    Config, GeometrySettings, SnapshotSettings, SourceSettings, MAX_PRECISION,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
