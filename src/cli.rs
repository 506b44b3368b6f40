//! Command-line interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fishing-restriction zone consolidation
#[derive(Parser, Debug)]
#[command(name = "zonekit", version)]
#[command(about = "Consolidate fishing-restriction zones into one canonical snapshot")]
pub struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(long, short = 'c', env = "ZONEKIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Snapshot file, overriding the configured path
    #[arg(long, short = 's', env = "ZONEKIT_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Ingest one or more batch files
    Ingest {
        /// Batch files: `{label, defaults, records}`
        #[arg(required = true)]
        batches: Vec<PathBuf>,

        /// Geometry fixture used for records without coordinates
        #[arg(long)]
        fixture: Option<PathBuf>,

        /// Write the batch report here instead of stdout
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Apply the configured region table and kind overrides
    Reconcile,

    /// Remove zones with ids in the inclusive range
    RemoveRange { low: u32, high: u32 },

    /// Remove zones by exact name
    RemoveNames {
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Renumber ids from 1 in current order
    Compact,

    /// Resolve same-name duplicates already in the snapshot
    Dedup,

    /// Report zones whose coordinates fail the continuity check
    Check {
        /// Remove the offending zones
        #[arg(long)]
        prune: bool,
    },
}

impl Command {
    pub fn report_path(&self) -> Option<&PathBuf> {
        match self {
            Command::Ingest { report, .. } => report.as_ref(),
            _ => None,
        }
    }
}
