use std::time::Duration;
use tempfile::TempDir;
use zonekit_core::{Coordinate, GeometryType, RegionTable, Ring, ZoneId};
use zonekit_ingest::{
    default_suffix_rules, IngestionDriver, NameCandidates, RawCoordinates, SchemaNormalizer,
    SourceBatch, SourceDefaults, SourceRecord, SourceResolver, StaticGeometrySource,
};
use zonekit_store::{Snapshot, StyleTable, ZoneStore};

/// `n` distinct points on a small closed loop
fn loop_points(n: usize) -> Ring {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Coordinate::new(36.35 + t.sin() * 0.002, 127.38 + t.cos() * 0.002)
        })
        .collect()
}

fn record(name: &str, points: usize) -> SourceRecord {
    SourceRecord::named(name).with_coordinates(RawCoordinates::Flat(loop_points(points)))
}

fn driver(source: StaticGeometrySource) -> IngestionDriver<StaticGeometrySource> {
    let regions = RegionTable::new("경기도").with_entry("서호", "수원시");
    IngestionDriver::new(
        SchemaNormalizer::new(regions),
        SourceResolver::new(source, Duration::from_secs(1), Duration::from_millis(1)),
        NameCandidates::new(default_suffix_rules()),
        0.05,
    )
}

#[tokio::test]
async fn test_larger_duplicate_wins_across_batches() {
    let store = ZoneStore::new();
    let mut driver = driver(StaticGeometrySource::new());

    let (store, _) = driver
        .run(&store, &[SourceBatch::new("first", vec![record("A", 4)])])
        .await;
    let (store, report) = driver
        .run(
            &store,
            &[SourceBatch::new("second", vec![record("A", 3), record("B", 5)])],
        )
        .await;

    let summary: Vec<(&str, usize, ZoneId)> = store
        .zones()
        .iter()
        .map(|z| (z.name.as_str(), z.coordinate_count(), z.id))
        .collect();
    // Polygon rings are stored closed: n points become n + 1 coordinates.
    assert_eq!(summary, vec![("A", 5, ZoneId(1)), ("B", 6, ZoneId(2))]);
    assert_eq!(report.kept_existing, 1);
    assert_eq!(report.added, 1);
}

#[tokio::test]
async fn test_river_lines_become_areas() {
    let line: Ring = (0..12)
        .map(|i| Coordinate::new(36.36 + i as f64 * 0.0008, 127.37 + i as f64 * 0.0011))
        .collect();
    let mut river = SourceRecord::named("갑천").with_coordinates(RawCoordinates::Flat(line));
    river.geometry = Some("polyline".to_string());
    river.section = Some("만년교 ~ 갑천대교".to_string());

    let batch = SourceBatch::new("rivers", vec![river]).with_defaults(SourceDefaults {
        region: Some("대전광역시".to_string()),
        restriction: Some("하천 낚시 금지".to_string()),
        as_area: true,
        ..SourceDefaults::default()
    });

    let (store, report) = driver(StaticGeometrySource::new())
        .run(&ZoneStore::new(), &[batch])
        .await;
    assert_eq!(report.skipped_count(), 0);

    let zone = store.get("갑천").unwrap();
    assert_eq!(zone.geometry_type(), GeometryType::Polygon);
    assert_eq!(zone.coordinate_count(), 25);
    assert_eq!(zone.region, "대전광역시");
    assert_eq!(zone.restriction, "하천 낚시 금지");
    assert_eq!(zone.section.as_deref(), Some("만년교 ~ 갑천대교"));
}

#[tokio::test]
async fn test_lookup_then_persist() {
    let source = StaticGeometrySource::new()
        .with_entry("서호", vec![loop_points(8)])
        .with_entry("광교", vec![loop_points(6), loop_points(5)]);
    let batch = SourceBatch::new(
        "gyeonggi",
        vec![
            SourceRecord::named("서호"),
            SourceRecord::named("광교저수지"),
            SourceRecord::named("없는저수지"),
        ],
    );

    let (store, report) = driver(source).run(&ZoneStore::new(), &[batch]).await;
    assert_eq!(store.len(), 2);
    assert_eq!(report.skipped_count(), 1);
    assert_eq!(store.get("서호").unwrap().region, "경기도 수원시");
    assert_eq!(
        store.get("광교저수지").unwrap().geometry_type(),
        GeometryType::Multipolygon
    );

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fishingZones.json");
    Snapshot::from_store(&store, StyleTable::default())
        .save(&path)
        .unwrap();
    let (restored, _) = Snapshot::load(&path).unwrap().into_store();
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.next_id(), Some(ZoneId(3)));
}
