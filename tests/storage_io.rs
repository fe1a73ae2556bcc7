use std::fs;
use tinychart::models::Cell;
use tinychart::storage;
use tinychart::{ChartSpec, RecordingSurface, RenderMode, render_chart};

fn fixture(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn loads_registry_and_regions() {
    let registry = storage::load_registry_json(fixture("registry.json")).unwrap();
    assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["broken", "visits"]);
    let regions = storage::load_regions_json(fixture("regions.json")).unwrap();
    assert_eq!(regions.len(), 2);
    assert!(regions[0].modes.contains(RenderMode::StackedBars));
    assert!(regions[0].modes.contains(RenderMode::Lines));
}

#[test]
fn csv_spec_renders_like_json() {
    let spec = storage::load_spec_csv(fixture("week.csv"), "Drinks", &["black".into()]).unwrap();
    assert_eq!(spec.data[1][3], Cell::Number(2.5));
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let layout = render_chart(&mut surface, &spec, RenderMode::StackedBars.into()).unwrap();
    assert_eq!(layout.domain.y_max, 4.5);
}

#[test]
fn save_json_and_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let spec = storage::load_spec_json(fixture("blocks.json")).unwrap();

    let json_path = dir.path().join("spec.json");
    storage::save_json(&spec, &json_path).unwrap();
    let back: ChartSpec = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(back, spec);

    let csv_path = dir.path().join("spec.csv");
    storage::save_spec_csv(&spec, &csv_path).unwrap();
    let txt = fs::read_to_string(&csv_path).unwrap();
    assert!(txt.starts_with("Day,01/08,02/08,03/08,04/08"));
    assert_eq!(txt.lines().count(), 3);
    let reread = storage::load_spec_csv(&csv_path, &spec.title, &spec.colors).unwrap();
    assert_eq!(reread.validate().unwrap(), spec.validate().unwrap());
}

#[test]
fn missing_file_reports_its_path() {
    let err = storage::load_spec_json("definitely/not/here.json").unwrap_err();
    assert!(format!("{err:#}").contains("definitely/not/here.json"));
}
