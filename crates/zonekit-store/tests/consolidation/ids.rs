use crate::common::{draft, store_of};
use zonekit_core::ZoneId;
use zonekit_store::ZoneStore;

#[test]
fn test_next_id_follows_max_not_count() {
    let zones = vec![
        draft("a", 3).into_zone(ZoneId(7)),
        draft("b", 3).into_zone(ZoneId(50)),
    ];
    let mut store = ZoneStore::from_zones(zones);
    store.ingest((0..10).map(|i| draft(&format!("new-{i}"), 3)));

    assert_eq!(store.get("new-0").unwrap().id, ZoneId(51));
    assert_eq!(store.get("new-9").unwrap().id, ZoneId(60));
}

#[test]
fn test_remove_range_on_120_zones() {
    let mut store = store_of(120);
    let before = store.clone();
    let removed = store.remove_range(ZoneId(99), ZoneId(106));

    assert_eq!(removed.len(), 8);
    assert_eq!(store.len(), 112);
    for zone in store.zones() {
        assert!(zone.id < ZoneId(99) || zone.id > ZoneId(106));
        assert_eq!(before.get_by_id(zone.id), Some(zone));
    }
}

#[test]
fn test_ids_stay_sparse_until_compact() {
    let mut store = store_of(10);
    store.remove_range(ZoneId(3), ZoneId(5));
    store.ingest(vec![draft("late", 3)]);
    assert_eq!(store.get("late").unwrap().id, ZoneId(11));

    store.compact();
    let ids: Vec<u32> = store.zones().iter().map(|z| z.id.0).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    assert_eq!(store.zones().last().unwrap().name, "late");
}

#[test]
fn test_remove_names() {
    let mut store = store_of(4);
    let removed = store.remove_names(&["zone-2", "zone-4", "missing"]);
    assert_eq!(removed.len(), 2);
    assert_eq!(store.next_id(), Some(ZoneId(4)));
    assert!(store.get("zone-2").is_none());
}

#[test]
fn test_replacements_after_range_removal_are_appended() {
    let mut store = store_of(6);
    store.remove_range(ZoneId(2), ZoneId(3));
    store.ingest(vec![draft("section-a", 4), draft("section-b", 4)]);

    let names: Vec<&str> = store.zones().iter().map(|z| z.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["zone-1", "zone-4", "zone-5", "zone-6", "section-a", "section-b"]
    );
    assert_eq!(store.get("section-a").unwrap().id, ZoneId(7));
}
