use crate::common::draft;
use zonekit_core::{RegionTable, ZoneKind};
use zonekit_store::ZoneStore;

fn gyeonggi() -> RegionTable {
    RegionTable::new("경기도")
        .with_entry("원천저수지", "수원시")
        .with_entry("발랑저수지", "파주시")
}

#[test]
fn test_reconcile_only_touches_mapped_names() {
    let mut store = ZoneStore::new();
    store.ingest(vec![
        draft("원천저수지", 3).with_region("수원"),
        draft("갑천", 3).with_region("대전광역시"),
    ]);

    assert_eq!(store.reconcile_regions(&gyeonggi()), 1);
    assert_eq!(store.get("원천저수지").unwrap().region, "경기도 수원시");
    assert_eq!(store.get("갑천").unwrap().region, "대전광역시");
    assert_eq!(store.get("원천저수지").unwrap().kind, ZoneKind::Prohibited);
}

#[test]
fn test_reconcile_twice_is_byte_identical() {
    let mut store = ZoneStore::new();
    store.ingest(vec![draft("원천저수지", 3), draft("발랑저수지", 4)]);

    store.reconcile_regions(&gyeonggi());
    let once = serde_json::to_string(store.zones()).unwrap();
    assert_eq!(store.reconcile_regions(&gyeonggi()), 0);
    let twice = serde_json::to_string(store.zones()).unwrap();
    assert_eq!(once, twice);
}
