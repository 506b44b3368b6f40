use std::fs;
use tempfile::TempDir;
use zonekit::cli::Command;
use zonekit::commands::execute;
use zonekit::{Config, Snapshot, ZoneKind};

/// Write a snapshot holding one small closed square per `(id, name)`
fn seed(path: &std::path::Path, names: &[(u32, &str)]) {
    let zones: Vec<String> = names
        .iter()
        .map(|(id, name)| {
            format!(
                r#"{{"id": {id}, "name": "{name}", "type": "prohibited", "restriction": "낚시 금지",
                   "region": "", "geometry": "polygon",
                   "coordinates": [{{"lat": 37.0, "lng": 127.0}}, {{"lat": 37.0, "lng": 127.01}},
                                   {{"lat": 37.01, "lng": 127.01}}, {{"lat": 37.0, "lng": 127.0}}]}}"#
            )
        })
        .collect();
    fs::write(
        path,
        format!(
            r#"{{"updated": "2025-06-01T00:00:00Z", "total": {}, "zones": [{}]}}"#,
            zones.len(),
            zones.join(",")
        ),
    )
    .unwrap();
}

#[tokio::test]
async fn test_remove_range_then_compact() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");
    let names: Vec<(u32, String)> = (1..=10).map(|i| (i, format!("z{i}"))).collect();
    let names: Vec<(u32, &str)> = names.iter().map(|(i, n)| (*i, n.as_str())).collect();
    seed(&path, &names);
    let config = Config::default();

    let report = execute(&config, &path, &Command::RemoveRange { low: 4, high: 6 })
        .await
        .unwrap();
    assert_eq!(report.removed, 3);
    let ids: Vec<u32> = Snapshot::load(&path)
        .unwrap()
        .zones
        .iter()
        .map(|z| z.id.0)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 7, 8, 9, 10]);

    execute(&config, &path, &Command::Compact).await.unwrap();
    let loaded = Snapshot::load(&path).unwrap();
    let ids: Vec<u32> = loaded.zones.iter().map(|z| z.id.0).collect();
    assert_eq!(ids, (1..=7).collect::<Vec<_>>());
    assert_eq!(loaded.zones[3].name, "z7");
}

#[tokio::test]
async fn test_reconcile_applies_regions_and_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");
    seed(&path, &[(1, "발랑저수지"), (2, "원천저수지")]);

    let mut config = Config::default();
    config.regions.insert("발랑저수지", "파주시");
    config.regions.insert("원천저수지", "수원시");

    let report = execute(&config, &path, &Command::Reconcile).await.unwrap();
    assert_eq!(report.updated, 3);
    let first = fs::read_to_string(&path).unwrap();

    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded.zones[0].region, "경기도 파주시");
    assert_eq!(loaded.zones[0].kind, ZoneKind::Restricted);
    assert_eq!(loaded.zones[1].kind, ZoneKind::Prohibited);

    let report = execute(&config, &path, &Command::Reconcile).await.unwrap();
    assert_eq!(report.updated, 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), first);
}

#[tokio::test]
async fn test_dedup_and_remove_names() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");
    seed(&path, &[(1, "갑천"), (2, "유등천"), (3, "갑천")]);
    let config = Config::default();

    let report = execute(&config, &path, &Command::Dedup).await.unwrap();
    assert_eq!(report.removed, 1);
    assert_eq!(report.kept_existing, 1);

    let report = execute(
        &config,
        &path,
        &Command::RemoveNames {
            names: vec!["유등천".to_string()],
        },
    )
    .await
    .unwrap();
    assert_eq!(report.removed, 1);

    let loaded = Snapshot::load(&path).unwrap();
    assert_eq!(loaded.zones.len(), 1);
    assert_eq!(loaded.zones[0].id.0, 1);
}

#[tokio::test]
async fn test_check_reports_without_mutating() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("zones.json");
    seed(&path, &[(1, "a"), (2, "b")]);
    let before = fs::read_to_string(&path).unwrap();

    let mut config = Config::default();
    config.geometry.max_gap = 0.005;

    let report = execute(&config, &path, &Command::Check { prune: false })
        .await
        .unwrap();
    assert_eq!(report.discontinuous.len(), 2);
    assert_eq!(report.skipped_count(), 0);
    assert!(report.skip_counts.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    let report = execute(&config, &path, &Command::Check { prune: true })
        .await
        .unwrap();
    assert_eq!(report.removed, 2);
    assert_eq!(report.discontinuous.len(), 2);
    assert!(Snapshot::load(&path).unwrap().zones.is_empty());
}
