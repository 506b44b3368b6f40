use crate::common::{draft, polygon};
use proptest::prelude::*;
use zonekit_core::{Zone, ZoneId, ZoneKind};
use zonekit_store::{DedupOutcome, ZoneStore};

#[test]
fn test_larger_record_wins_within_a_batch() {
    let mut store = ZoneStore::new();
    let report = store.ingest(vec![draft("전민저수지", 4), draft("전민저수지", 10)]);

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("전민저수지").unwrap().coordinate_count(), 10);
    assert_eq!(report.added, 1);
    assert_eq!(report.replaced, 1);
    assert_eq!(report.collisions[0].outcome, DedupOutcome::ReplacedWithIncoming);
}

#[test]
fn test_batch_a_then_batch_b() {
    let mut store = ZoneStore::new();
    store.ingest(vec![draft("A", 4)]);
    let report = store.ingest(vec![draft("A", 2), draft("B", 5)]);

    let summary: Vec<(&str, usize, u32)> = store
        .zones()
        .iter()
        .map(|z| (z.name.as_str(), z.coordinate_count(), z.id.0))
        .collect();
    assert_eq!(summary, vec![("A", 4, 1), ("B", 5, 2)]);
    assert_eq!(report.kept_existing, 1);
    assert_eq!(report.collisions[0].kept_id, ZoneId(1));
}

#[test]
fn test_standalone_dedup_keeps_first_position() {
    let zones = vec![
        draft("x", 3).into_zone(ZoneId(1)),
        draft("y", 3).into_zone(ZoneId(2)),
        draft("x", 8).into_zone(ZoneId(3)),
        draft("x", 8).into_zone(ZoneId(4)),
    ];
    let mut store = ZoneStore::from_zones(zones);
    let decisions = store.dedup();

    assert_eq!(decisions.len(), 2);
    let names: Vec<&str> = store.zones().iter().map(|z| z.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y"]);
    // The first larger record wins; the later tie does not displace it.
    assert_eq!(store.get("x").unwrap().id, ZoneId(3));
    assert_eq!(store.next_id(), Some(ZoneId(4)));
}

#[test]
fn test_dedup_is_noop_without_duplicates() {
    let mut store = crate::common::store_of(5);
    let before = store.clone();
    assert!(store.dedup().is_empty());
    assert_eq!(store, before);
}

proptest! {
    #[test]
    fn prop_dedup_is_deterministic(sizes in prop::collection::vec((0usize..4, 0usize..12), 1..30)) {
        let zones: Vec<Zone> = sizes
            .iter()
            .enumerate()
            .map(|(i, (name, n))| {
                zonekit_core::ZoneDraft::new(format!("n{name}"), ZoneKind::Prohibited, polygon(*n))
                    .into_zone(ZoneId(i as u32 + 1))
            })
            .collect();

        let mut first = ZoneStore::from_zones(zones.clone());
        let mut second = ZoneStore::from_zones(zones);
        first.dedup();
        second.dedup();
        prop_assert_eq!(&first, &second);

        // One zone per name, holding the maximum coordinate count for that name.
        for zone in first.zones() {
            let best = sizes
                .iter()
                .filter(|(name, _)| format!("n{name}") == zone.name)
                .map(|(_, n)| *n)
                .max()
                .unwrap();
            prop_assert_eq!(zone.coordinate_count(), best);
        }
        let mut names: Vec<&str> = first.zones().iter().map(|z| z.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), first.len());
    }
}
