//! Command execution
//!
//! Every command loads the snapshot (empty if absent), applies one operation
//! to the in-memory store and, when something changed, writes the new
//! snapshot atomically. The batch report is the command's output.

use crate::cli::{Cli, Command};
use anyhow::Context;
use std::path::{Path, PathBuf};
use zonekit_core::ZoneId;
use zonekit_ingest::{IngestionDriver, SourceBatch, StaticGeometrySource};
use zonekit_settings::Config;
use zonekit_store::{BatchReport, Snapshot, ZoneStore};

/// Resolve the configuration: explicit path, then the platform default, then
/// built-in defaults
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(path) => Config::load_or_default(&path)
                .with_context(|| format!("Failed to load config {}", path.display())),
            Err(e) => {
                tracing::debug!("No default config location: {}", e);
                Ok(Config::default())
            }
        },
    }
}

async fn ingest(
    config: &Config,
    store: &ZoneStore,
    batches: &[PathBuf],
    fixture: Option<&Path>,
) -> anyhow::Result<(ZoneStore, BatchReport)> {
    let batches = batches
        .iter()
        .map(|path| {
            SourceBatch::load_from_file(path)
                .with_context(|| format!("Failed to load batch {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let source = match fixture {
        Some(path) => StaticGeometrySource::load_from_file(path)
            .with_context(|| format!("Failed to load fixture {}", path.display()))?,
        None => StaticGeometrySource::new(),
    };

    let mut driver = IngestionDriver::new(
        config.normalizer(),
        config.resolver(source),
        config.name_candidates(),
        config.geometry.max_gap,
    );
    Ok(driver.run(store, &batches).await)
}

/// Run `command` against the snapshot at `snapshot_path`
pub async fn execute(
    config: &Config,
    snapshot_path: &Path,
    command: &Command,
) -> anyhow::Result<BatchReport> {
    let snapshot = Snapshot::load_or_default(snapshot_path)
        .with_context(|| format!("Failed to load snapshot {}", snapshot_path.display()))?;
    let (mut store, styles) = snapshot.into_store();
    let mut report = BatchReport::new();

    let changed = match command {
        Command::Ingest {
            batches, fixture, ..
        } => {
            let (next, batch_report) = ingest(config, &store, batches, fixture.as_deref()).await?;
            store = next;
            report.merge(batch_report);
            report.added + report.replaced > 0
        }
        Command::Reconcile => {
            report.updated = store.reconcile_regions(&config.regions)
                + store.apply_overrides(&config.overrides);
            report.updated > 0
        }
        Command::RemoveRange { low, high } => {
            report.removed = store.remove_range(ZoneId(*low), ZoneId(*high)).len();
            report.removed > 0
        }
        Command::RemoveNames { names } => {
            report.removed = store.remove_names(names).len();
            report.removed > 0
        }
        Command::Compact => {
            store.compact();
            report.updated = store.len();
            true
        }
        Command::Dedup => {
            let decisions = store.dedup();
            report.removed = decisions.len();
            for decision in decisions {
                report.record_collision(decision);
            }
            report.removed > 0
        }
        Command::Check { prune } => {
            let offenders = if *prune {
                store.prune_discontinuous(config.geometry.max_gap)
            } else {
                store.audit_continuity(config.geometry.max_gap)
            };
            if *prune {
                report.removed = offenders.len();
            }
            for entry in offenders {
                report.record_discontinuity(entry);
            }
            report.removed > 0
        }
    };

    if changed {
        Snapshot::from_store(&store, styles)
            .save(snapshot_path)
            .with_context(|| format!("Failed to save snapshot {}", snapshot_path.display()))?;
    } else {
        tracing::info!("No changes; snapshot left as is");
    }

    Ok(report)
}

/// Entry point for the binary
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let snapshot_path = cli
        .snapshot
        .clone()
        .unwrap_or_else(|| config.snapshot.path.clone());

    let report = execute(&config, &snapshot_path, &cli.command).await?;
    let json = serde_json::to_string_pretty(&report)?;
    match cli.command.report_path() {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("Failed to write report {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}
