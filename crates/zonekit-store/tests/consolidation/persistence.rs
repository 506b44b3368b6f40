use crate::common::store_of;
use tempfile::TempDir;
use zonekit_core::ZoneId;
use zonekit_store::{Snapshot, StyleTable};

#[test]
fn test_mutate_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("fishingZones.json");

    let mut store = store_of(12);
    store.remove_range(ZoneId(2), ZoneId(4));
    Snapshot::from_store(&store, StyleTable::default())
        .save(&path)
        .unwrap();

    let (restored, styles) = Snapshot::load(&path).unwrap().into_store();
    assert_eq!(restored, store);
    assert_eq!(styles, StyleTable::default());
    assert_eq!(restored.next_id(), Some(ZoneId(13)));
}

#[test]
fn test_styles_pass_through() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");

    let mut styles = StyleTable::default();
    if let Some(style) = styles.0.values_mut().next() {
        style.fill_color = "#123456".to_string();
    }
    Snapshot::from_store(&store_of(1), styles.clone())
        .save(&path)
        .unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded.styles, styles);
}
