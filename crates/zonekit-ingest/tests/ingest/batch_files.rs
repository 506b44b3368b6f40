use std::fs;
use tempfile::TempDir;
use zonekit_core::ZoneKind;
use zonekit_ingest::{RawCoordinates, SourceBatch, StaticGeometrySource};

#[test]
fn test_load_batch_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("daejeon_rivers.json");
    fs::write(
        &path,
        r#"{
            "defaults": {"kind": "restricted", "region": "대전광역시", "as_area": true},
            "records": [
                {
                    "name": "갑천",
                    "geometry": "polyline",
                    "section": "만년교 ~ 갑천대교",
                    "coordinates": [{"lat": 36.36, "lng": 127.37}, {"lat": 36.37, "lng": 127.38}]
                },
                {"name": "유등천"}
            ]
        }"#,
    )
    .unwrap();

    let batch = SourceBatch::load_from_file(&path).unwrap();
    assert_eq!(batch.label, "daejeon_rivers");
    assert_eq!(batch.defaults.kind, Some(ZoneKind::Restricted));
    assert!(batch.defaults.as_area);
    assert_eq!(batch.records.len(), 2);
    assert!(matches!(
        batch.records[0].coordinates,
        Some(RawCoordinates::Flat(ref line)) if line.len() == 2
    ));
    assert!(batch.records[1].needs_lookup());
}

#[test]
fn test_batch_without_records_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.json");
    fs::write(&path, r#"{"label": "x"}"#).unwrap();
    assert!(SourceBatch::load_from_file(&path).is_err());
}

#[tokio::test]
async fn test_fixture_source_from_file() {
    use zonekit_ingest::GeometrySource;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fixture.json");
    fs::write(
        &path,
        r#"{
            "서호": [[{"lat": 37.28, "lng": 126.99}, {"lat": 37.28, "lng": 127.0}, {"lat": 37.29, "lng": 127.0}]]
        }"#,
    )
    .unwrap();

    let source = StaticGeometrySource::load_from_file(&path).unwrap();
    assert_eq!(source.len(), 1);
    let rings = source.query("서호").await.unwrap();
    assert_eq!(rings.len(), 1);
    assert_eq!(rings[0].len(), 3);
}
