//! Canonical zone store
//!
//! [`ZoneStore`] owns the ordered zone sequence plus a name index for O(1)
//! dedup lookups. It is a plain value: every operation runs to completion on
//! `&mut self` and never performs I/O.
//!
//! Ids are positive and unique. The next id is always `max(existing) + 1`,
//! never the record count, so sparse ranges left by removals stay sparse
//! until [`ZoneStore::compact`] is called explicitly. Once `u32::MAX` is
//! taken, new names are rejected in the batch report until a compact.

use crate::report::{BatchReport, DedupDecision, DedupOutcome, SkipEntry};
use std::collections::{HashMap, HashSet};
use zonekit_core::{KindOverride, RegionTable, Zone, ZoneDraft, ZoneId};
use zonekit_geometry::validate_geometry;

/// Store lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Empty,
    Populated,
}

/// Outcome of ingesting a single draft
#[derive(Debug, Clone, PartialEq)]
pub enum IngestAction {
    Added(ZoneId),
    Collision(DedupDecision),
    Rejected(SkipEntry),
}

/// The dedup rule: the incoming zone wins only with strictly more coordinates.
fn incoming_wins(existing_count: usize, incoming_count: usize) -> bool {
    incoming_count > existing_count
}

/// Ordered, name-indexed collection of zones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneStore {
    zones: Vec<Zone>,
    /// name -> position of the retained zone in `zones`
    index: HashMap<String, usize>,
    max_id: u32,
}

impl ZoneStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from zones in their existing order.
    ///
    /// Same-name duplicates are kept as-is; the index points at the first
    /// occurrence until [`ZoneStore::dedup`] resolves them.
    pub fn from_zones(zones: Vec<Zone>) -> Self {
        let mut store = Self {
            zones,
            index: HashMap::new(),
            max_id: 0,
        };
        store.rebuild_index();
        store
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for (pos, zone) in self.zones.iter().enumerate() {
            self.index.entry(zone.name.clone()).or_insert(pos);
        }
        self.max_id = self.zones.iter().map(|z| z.id.0).max().unwrap_or(0);
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn into_zones(self) -> Vec<Zone> {
        self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn state(&self) -> StoreState {
        if self.zones.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        }
    }

    /// The retained zone for `name`
    pub fn get(&self, name: &str) -> Option<&Zone> {
        self.index.get(name).map(|&pos| &self.zones[pos])
    }

    pub fn get_by_id(&self, id: ZoneId) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn max_id(&self) -> u32 {
        self.max_id
    }

    /// `None` once `u32::MAX` is in use
    pub fn next_id(&self) -> Option<ZoneId> {
        self.max_id.checked_add(1).map(ZoneId)
    }

    /// Ingest one normalized, validated draft
    pub fn ingest_one(&mut self, draft: ZoneDraft) -> IngestAction {
        match self.index.get(&draft.name).copied() {
            None => {
                let Some(id) = self.next_id() else {
                    return IngestAction::Rejected(SkipEntry::id_exhausted(
                        draft.name,
                        ZoneId(self.max_id),
                    ));
                };
                self.max_id = id.0;
                self.index.insert(draft.name.clone(), self.zones.len());
                tracing::debug!("Added zone {} as id {}", draft.name, id);
                self.zones.push(draft.into_zone(id));
                IngestAction::Added(id)
            }
            Some(pos) => {
                let existing = &mut self.zones[pos];
                let existing_count = existing.coordinate_count();
                let incoming_count = draft.coordinate_count();
                let outcome = if incoming_wins(existing_count, incoming_count) {
                    tracing::debug!(
                        "Replacing {} ({} -> {} coordinates)",
                        draft.name,
                        existing_count,
                        incoming_count
                    );
                    existing.overwrite_with(draft);
                    DedupOutcome::ReplacedWithIncoming
                } else {
                    tracing::debug!(
                        "Keeping existing {} ({} coordinates, incoming {})",
                        existing.name,
                        existing_count,
                        incoming_count
                    );
                    DedupOutcome::KeptExisting
                };
                IngestAction::Collision(DedupDecision {
                    name: existing.name.clone(),
                    outcome,
                    kept_id: existing.id,
                    existing_count,
                    incoming_count,
                })
            }
        }
    }

    /// Ingest a batch of drafts in order.
    ///
    /// New names are appended with `max_id + 1`. A name already present keeps
    /// its position and id; its contents are replaced only when the incoming
    /// draft has strictly more coordinates.
    pub fn ingest(&mut self, drafts: impl IntoIterator<Item = ZoneDraft>) -> BatchReport {
        let mut report = BatchReport::new();
        for draft in drafts {
            match self.ingest_one(draft) {
                IngestAction::Added(_) => report.added += 1,
                IngestAction::Collision(decision) => report.record_collision(decision),
                IngestAction::Rejected(entry) => report.record_skip(entry),
            }
        }
        tracing::info!(
            "Ingest: {} added, {} replaced, {} kept existing",
            report.added,
            report.replaced,
            report.kept_existing
        );
        report
    }

    /// Overwrite `region` for every zone named in `table`; returns zones changed
    pub fn reconcile_regions(&mut self, table: &RegionTable) -> usize {
        let mut updated = 0;
        for zone in &mut self.zones {
            if let Some(region) = table.region_for(&zone.name) {
                if zone.region != region {
                    tracing::debug!("Region for {}: {} -> {}", zone.name, zone.region, region);
                    zone.region = region;
                    updated += 1;
                }
            }
        }
        updated
    }

    /// Apply kind upgrades by name; returns zones changed
    pub fn apply_overrides(&mut self, overrides: &[KindOverride]) -> usize {
        let mut updated = 0;
        for rule in overrides {
            for zone in self.zones.iter_mut().filter(|z| z.name == rule.name) {
                if zone.kind != rule.kind || zone.restriction != rule.restriction {
                    zone.kind = rule.kind;
                    zone.restriction = rule.restriction.clone();
                    updated += 1;
                }
            }
        }
        updated
    }

    fn remove_where(&mut self, predicate: impl Fn(&Zone) -> bool) -> Vec<Zone> {
        let (removed, kept): (Vec<Zone>, Vec<Zone>) =
            std::mem::take(&mut self.zones).into_iter().partition(predicate);
        self.zones = kept;
        self.rebuild_index();
        removed
    }

    /// Remove every zone whose id lies in `[low, high]`; no renumbering.
    ///
    /// Zones ingested afterwards are appended at the end, not spliced back
    /// into the gap the range left behind.
    pub fn remove_range(&mut self, low: ZoneId, high: ZoneId) -> Vec<Zone> {
        let removed = self.remove_where(|z| z.id >= low && z.id <= high);
        tracing::info!("Removed {} zones in id range {}..={}", removed.len(), low, high);
        removed
    }

    /// Remove zones by exact name; no renumbering
    pub fn remove_names<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<Zone> {
        let names: HashSet<&str> = names.iter().map(AsRef::as_ref).collect();
        self.remove_where(|z| names.contains(z.name.as_str()))
    }

    /// Reassign ids 1..=n in current order
    pub fn compact(&mut self) {
        for (zone, id) in self.zones.iter_mut().zip(1..=u32::MAX) {
            zone.id = ZoneId(id);
        }
        self.max_id = u32::try_from(self.zones.len()).unwrap_or(u32::MAX);
    }

    /// Resolve same-name duplicates already present in the store.
    ///
    /// Each group keeps the zone with the most coordinates (first seen on a
    /// tie), placed at the position of the group's first occurrence and
    /// keeping its own id.
    pub fn dedup(&mut self) -> Vec<DedupDecision> {
        let mut decisions = Vec::new();
        let mut retained: Vec<Zone> = Vec::with_capacity(self.zones.len());
        let mut positions: HashMap<String, usize> = HashMap::new();

        for zone in std::mem::take(&mut self.zones) {
            match positions.get(&zone.name).copied() {
                None => {
                    positions.insert(zone.name.clone(), retained.len());
                    retained.push(zone);
                }
                Some(pos) => {
                    let existing_count = retained[pos].coordinate_count();
                    let incoming_count = zone.coordinate_count();
                    let outcome = if incoming_wins(existing_count, incoming_count) {
                        retained[pos] = zone;
                        DedupOutcome::ReplacedWithIncoming
                    } else {
                        DedupOutcome::KeptExisting
                    };
                    decisions.push(DedupDecision {
                        name: retained[pos].name.clone(),
                        outcome,
                        kept_id: retained[pos].id,
                        existing_count,
                        incoming_count,
                    });
                }
            }
        }

        self.zones = retained;
        self.rebuild_index();
        if !decisions.is_empty() {
            tracing::info!("Dedup resolved {} duplicates", decisions.len());
        }
        decisions
    }

    fn discontinuities(&self, max_gap: f64) -> Vec<(ZoneId, SkipEntry)> {
        self.zones
            .iter()
            .filter_map(|zone| {
                validate_geometry(&zone.geometry, max_gap)
                    .err()
                    .map(|err| (zone.id, SkipEntry::from_geometry(zone.name.clone(), err)))
            })
            .collect()
    }

    /// Continuity audit: every zone whose geometry has a gap above `max_gap`
    pub fn audit_continuity(&self, max_gap: f64) -> Vec<SkipEntry> {
        self.discontinuities(max_gap)
            .into_iter()
            .map(|(_, entry)| entry)
            .collect()
    }

    /// Remove every zone that fails [`ZoneStore::audit_continuity`].
    ///
    /// Offenders are removed by id, so a same-name sibling that passes stays.
    pub fn prune_discontinuous(&mut self, max_gap: f64) -> Vec<SkipEntry> {
        let (ids, offenders): (HashSet<ZoneId>, Vec<SkipEntry>) =
            self.discontinuities(max_gap).into_iter().unzip();
        if !ids.is_empty() {
            self.remove_where(|z| ids.contains(&z.id));
        }
        offenders
    }
}
