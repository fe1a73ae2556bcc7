use std::collections::HashMap;
use tinychart::host::render_regions_with;
use tinychart::{
    ChartError, ChartSpec, RecordingSurface, Region, RegionStatus, RenderMode, RenderOptions,
    SpecRegistry, render_regions,
};

fn spec() -> ChartSpec {
    serde_json::from_str(
        r##"{"title":"Sales","colors":["black","#1f77b4","orange"],
            "data":[["Month","Jan","Feb","Mar"],["North",3,5,2],["South",1,4,6]]}"##,
    )
    .unwrap()
}

fn recording(r: &Region) -> Result<RecordingSurface, ChartError> {
    Ok(RecordingSurface::new(r.width as f64, r.height as f64))
}

#[test]
fn region_without_spec_is_skipped_and_the_other_renders() {
    let mut registry = SpecRegistry::new();
    registry.insert("sales", spec());
    let regions: Vec<Region> = serde_json::from_str(
        r#"[{"id":"orphan","width":400,"height":300,"modes":"bars"},
            {"id":"sales","width":800,"height":600,"modes":["dots","lines"]}]"#,
    )
    .unwrap();

    let reports = render_regions(&regions, &registry, recording);
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].id, "orphan");
    assert!(matches!(reports[0].status, RegionStatus::Skipped));
    match &reports[1].status {
        RegionStatus::Rendered(layout) => {
            assert_eq!(layout.metrics.width, 800.0);
            assert_eq!(layout.domain.y_max, 6.0);
        }
        other => panic!("expected a rendered region, got {other:?}"),
    }
}

#[test]
fn failing_region_does_not_stop_the_batch() {
    let mut bad = spec();
    bad.data[1].pop();
    let specs: HashMap<String, ChartSpec> =
        [("bad".to_string(), bad), ("good".to_string(), spec())].into();
    let regions = vec![
        Region {
            id: "bad".into(),
            width: 800,
            height: 600,
            modes: RenderMode::Bars.into(),
        },
        Region {
            id: "good".into(),
            width: 800,
            height: 600,
            modes: RenderMode::StackedBars.into(),
        },
    ];

    let reports = render_regions_with(&regions, &specs, recording, &RenderOptions::with_locale("de"));
    assert!(matches!(
        reports[0].status,
        RegionStatus::Failed(ChartError::MalformedSpec(_))
    ));
    assert!(reports[0].is_failure());
    match &reports[1].status {
        RegionStatus::Rendered(layout) => assert_eq!(layout.domain.y_max, 9.0),
        other => panic!("expected a rendered region, got {other:?}"),
    }
}

#[test]
fn unknown_mode_in_manifest_is_rejected_at_load() {
    let err = serde_json::from_str::<Vec<Region>>(
        r#"[{"id":"a","width":10,"height":10,"modes":"bars pie"}]"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("pie"));
}
