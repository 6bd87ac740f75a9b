// Integration tests for batch scanning and cleaning of GeoJSON features:
// skip-and-continue behaviour, summary statistics, verification after
// cleaning, and preservation of ids, properties and extra ordinates.

use dupvert::{
    clean_features, read_features, read_features_from_path, scan_features, write_features,
    write_features_to_path, Metric, ScanOptions,
};
use serde_json::{json, Value};

fn collection() -> Vec<u8> {
    serde_json::to_vec(&json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "road-1",
                "properties": { "name": "repeated" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[0, 0, 10], [0, 0, 11], [1, 1, 12], [1, 1, 13], [1, 1, 14], [2, 2, 15]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "clean square" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [4, 0], [4, 4], [0, 4], [0, 0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "broken" },
                "geometry": { "type": "Polygon", "coordinates": "nope" }
            },
            {
                "type": "Feature",
                "properties": { "name": "sliver" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[5, 5], [6, 6], [6, 6], [5, 5]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "name": "self touching" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0, 0], [5, 0], [5, 5], [0, 0], [-5, 0], [-5, -5], [0, 0]]]
                }
            }
        ]
    }))
    .unwrap()
}

#[test]
fn scan_skips_broken_features_and_summarizes_the_rest() {
    let features = read_features(&collection()).unwrap();
    assert_eq!(features.len(), 5);

    let report = scan_features(&features, &ScanOptions::exact()).unwrap();

    // road-1 repeats (0,0) and (1,1); the sliver repeats (6,6); the bow-tie touches at (0,0).
    let indices: Vec<usize> = report.features.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![0, 3, 4]);
    assert_eq!(report.features[0].id, Some(json!("road-1")));
    assert_eq!(report.features[0].geometry_type, "LineString");
    assert_eq!(report.features[0].duplicate_count, 2);
    assert_eq!(report.features[0].duplicate_coordinates, vec![[0., 0.], [1., 1.]]);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 2);

    assert_eq!(report.summary.total_features, 5);
    assert_eq!(report.summary.features_with_duplicates, 3);
    assert_eq!(report.summary.total_duplicate_vertices, 4);
    assert_eq!(report.summary.max_duplicates, 2);
    assert_eq!(report.summary.min_duplicates, 1);
    assert_eq!(report.summary.percentage_with_duplicates, 60.0);
    assert_eq!(report.metric, "exact");
}

#[test]
fn tolerance_scan_catches_near_misses() {
    let bytes = serde_json::to_vec(&json!({
        "type": "LineString",
        "coordinates": [[10.0, 20.0], [11.0, 20.0], [10.0000001, 20.0]]
    }))
    .unwrap();
    let features = read_features(&bytes).unwrap();

    assert!(scan_features(&features, &ScanOptions::exact()).unwrap().features.is_empty());

    let options = ScanOptions::with_tolerance(1e-6).metric(Metric::PerAxis);
    let report = scan_features(&features, &options).unwrap();
    assert_eq!(report.features.len(), 1);
    assert_eq!(report.features[0].duplicate_count, 2);
    assert_eq!(report.metric, "per-axis");
}

#[test]
fn invalid_tolerance_fails_the_batch() {
    let features = read_features(&collection()).unwrap();
    assert!(scan_features(&features, &ScanOptions::with_tolerance(-1.0)).is_err());
    assert!(clean_features(&features, &ScanOptions::with_tolerance(f64::NAN)).is_err());
}

#[test]
fn clean_collapses_runs_and_verifies_the_result() {
    let features = read_features(&collection()).unwrap();
    let report = clean_features(&features, &ScanOptions::exact()).unwrap();

    // The broken feature and the sliver are skipped.
    let indices: Vec<usize> = report.features.iter().map(|f| f.index).collect();
    assert_eq!(indices, vec![0, 1, 4]);
    let skipped: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
    assert_eq!(skipped, vec![2, 3]);

    assert_eq!(report.removed_vertices, 3);

    // Only the legitimate self-touch survives cleaning.
    assert_eq!(report.residual.len(), 1);
    assert_eq!(report.residual[0].index, 4);
    // Skipped features still count towards the total.
    assert_eq!(report.summary.total_features, 5);
    assert_eq!(report.summary.features_with_duplicates, 1);
    assert_eq!(report.summary.percentage_with_duplicates, 20.0);
}

#[test]
fn cleaned_output_keeps_ids_properties_and_z_values() {
    let features = read_features(&collection()).unwrap();
    let report = clean_features(&features, &ScanOptions::exact()).unwrap();

    let written: Value = serde_json::from_slice(&write_features(&report.features).unwrap()).unwrap();
    let road = &written["features"][0];
    assert_eq!(road["id"], json!("road-1"));
    assert_eq!(road["properties"]["name"], json!("repeated"));
    assert_eq!(
        road["geometry"]["coordinates"],
        json!([[0.0, 0.0, 10.0], [1.0, 1.0, 12.0], [2.0, 2.0, 15.0]]),
    );

    let square = &written["features"][1];
    assert_eq!(square["geometry"]["coordinates"], json!([[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]]));
}

#[test]
fn cleaned_features_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("cleaned.geojson");

    let features = read_features(&collection()).unwrap();
    let report = clean_features(&features, &ScanOptions::exact()).unwrap();
    write_features_to_path(&path, &report.features).unwrap();

    let reread = read_features_from_path(&path).unwrap();
    assert_eq!(reread.len(), report.features.len());
    let rescan = scan_features(&reread, &ScanOptions::exact()).unwrap();
    assert_eq!(rescan.summary.features_with_duplicates, 1);
    assert!(rescan.skipped.is_empty());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(read_features_from_path(&dir.path().join("absent.geojson")).is_err());
}
