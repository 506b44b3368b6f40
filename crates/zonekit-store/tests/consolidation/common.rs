use zonekit_core::{Coordinate, Geometry, ZoneDraft, ZoneKind};
use zonekit_store::ZoneStore;

pub fn polygon(n: usize) -> Geometry {
    Geometry::Polygon(
        (0..n)
            .map(|i| {
                Coordinate::new(36.3 + i as f64 * 0.0005, 127.4 + i as f64 * 0.0005).rounded(6)
            })
            .collect(),
    )
}

pub fn draft(name: &str, n: usize) -> ZoneDraft {
    ZoneDraft::new(name, ZoneKind::Prohibited, polygon(n))
}

/// A store holding `count` zones with ids 1..=count
pub fn store_of(count: usize) -> ZoneStore {
    let mut store = ZoneStore::new();
    store.ingest((1..=count).map(|i| draft(&format!("zone-{i}"), 3 + i % 4)));
    store
}
