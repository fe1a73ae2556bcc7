use tinychart::surface::{DrawOp, PathSegment};
use tinychart::viz::compositor::stacked_bar_tops;
use tinychart::viz::{Domain, Mapper, Metrics};
use tinychart::{ChartError, ChartSpec, ModeSet, RecordingSurface, RenderMode, render_chart};

fn spec(json: &str) -> ChartSpec {
    serde_json::from_str(json).unwrap()
}

/// Mode drawing starts after the last label (legend names are the last text drawn).
fn mode_ops(ops: &[DrawOp]) -> &[DrawOp] {
    let start = ops
        .iter()
        .rposition(|op| matches!(op, DrawOp::FillText { .. }))
        .map_or(0, |i| i + 1);
    &ops[start..]
}

fn rects(ops: &[DrawOp]) -> Vec<(f64, f64, f64, f64)> {
    ops.iter()
        .filter_map(|op| match op {
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                ..
            } => Some((*x, *y, *width, *height)),
            _ => None,
        })
        .collect()
}

#[test]
fn single_series_bars_grow_left_to_right() {
    let s = spec(
        r#"{"title":"T","colors":["k","c"],"data":[["Day","1","2","3"],["A",1,2,3]]}"#,
    );
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let layout = render_chart(&mut surface, &s, RenderMode::Bars.into()).unwrap();

    assert_eq!(layout.domain.y_min, 0.0);
    assert_eq!(layout.domain.y_max, 3.0);
    assert_eq!(layout.origin_y, layout.metrics.plot_bottom());

    let bars = rects(surface.ops());
    assert_eq!(bars.len(), 3);
    let heights: Vec<f64> = bars.iter().map(|b| -b.3).collect();
    assert!(heights.windows(2).all(|w| w[0] < w[1]), "{heights:?}");
    assert!(heights.iter().all(|h| *h > 0.0));
    // the tallest bar reaches the top of the plot
    assert!((bars[2].1 + bars[2].3 - layout.metrics.plot_top()).abs() < 1e-9);
}

#[test]
fn signed_lines_put_zero_above_the_midpoint() {
    let s = spec(
        r#"{"title":"L","colors":["black","red"],"data":[["x","a","b","c","d"],["A",-10,5,1,5]]}"#,
    );
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let layout = render_chart(&mut surface, &s, RenderMode::Lines.into()).unwrap();

    assert_eq!(layout.domain.y_min, -10.0);
    assert_eq!(layout.domain.y_max, 5.0);
    let m = &layout.metrics;
    let mid = m.plot_top() + m.plot_height / 2.0;
    assert!(layout.origin_y < mid);
    assert!(layout.origin_y > m.plot_top());

    let series_line = surface.ops().iter().rev().find_map(|op| match op {
        DrawOp::StrokePath { segments, .. } => Some(segments.clone()),
        _ => None,
    });
    let segments = series_line.unwrap();
    assert_eq!(segments.len(), 4);
    assert!(matches!(segments[0], PathSegment::MoveTo { .. }));
    assert!(segments[1..].iter().all(|s| matches!(s, PathSegment::LineTo { .. })));
}

#[test]
fn extremes_map_onto_plot_edges() {
    let m = Metrics::compute(640.0, 480.0, 5, 2).unwrap();
    for (lo, hi) in [(0.0, 3.0), (-10.0, 5.0), (-0.4, 0.0), (-7.0, 1234.0)] {
        let d = Domain::from_extent(lo, hi);
        let map = Mapper::new(&m, &d);
        assert!((map.y(d.y_max) - (m.margin_y + m.title_gutter)).abs() < 1e-9);
        assert!((map.y(d.y_min) - (m.margin_y + m.title_gutter + m.plot_height)).abs() < 1e-9);
    }
}

#[test]
fn stacked_tops_equal_scaled_category_sums() {
    let s = spec(
        r#"{"colors":["black","red","blue","green"],
            "data":[["x","a","b","c"],["A",1,0,2.5],["B",2,4,0],["C",3,1,1]]}"#,
    );
    let data = s.validate().unwrap();
    let m = Metrics::compute(800.0, 600.0, data.category_count(), data.series_count()).unwrap();
    let d = Domain::compute(&data, true);
    let map = Mapper::new(&m, &d);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let tops = stacked_bar_tops(&mut surface, &data, &map).unwrap();

    let scale = m.plot_height / (d.y_max - d.y_min);
    for (top, sum) in tops.iter().zip(data.category_sums()) {
        assert!((top - (map.origin_y() - sum * scale)).abs() < 1e-9);
    }
    // the tallest stack fills the plot
    assert_eq!(d.y_max, 6.0);
    assert!(tops.iter().any(|t| (t - m.plot_top()).abs() < 1e-9));
}

#[test]
fn short_series_skip_only_the_curve() {
    let s = spec(r#"{"colors":["black","red"],"data":[["x","a","b"],["A",1,2]]}"#);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let modes: ModeSet = "dots bezier".parse().unwrap();
    render_chart(&mut surface, &s, modes).unwrap();

    let ops = mode_ops(surface.ops());
    let curves = ops
        .iter()
        .filter(|op| match op {
            DrawOp::StrokePath { segments, .. } => segments
                .iter()
                .any(|s| matches!(s, PathSegment::CubicTo { .. })),
            _ => false,
        })
        .count();
    assert_eq!(curves, 0);
    let dots = ops
        .iter()
        .filter(|op| matches!(op, DrawOp::FillCircle { .. }))
        .count();
    assert_eq!(dots, 2);
}

#[test]
fn curves_pass_through_every_point() {
    let s = spec(r#"{"colors":["black","red"],"data":[["x","a","b","c","d"],["A",3,1,4,1]]}"#);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    render_chart(&mut surface, &s, RenderMode::SmoothedCurve.into()).unwrap();

    let segments = surface
        .ops()
        .iter()
        .rev()
        .find_map(|op| match op {
            DrawOp::StrokePath { segments, .. } => Some(segments.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(segments.len(), 4);
    let ends: Vec<(f64, f64)> = segments[1..]
        .iter()
        .filter_map(|s| match s {
            PathSegment::CubicTo { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(ends.len(), 3);
    assert!(ends.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn modes_layer_in_fixed_order() {
    let s = spec(r#"{"colors":["black","red"],"data":[["x","a","b","c"],["A",1,2,3]]}"#);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    render_chart(&mut surface, &s, "lines,dots,bars".parse().unwrap()).unwrap();
    let ops = mode_ops(surface.ops());

    let last_rect = ops
        .iter()
        .rposition(|op| matches!(op, DrawOp::FillRect { .. }))
        .unwrap();
    let first_dot = ops
        .iter()
        .position(|op| matches!(op, DrawOp::FillCircle { .. }))
        .unwrap();
    let last_path = ops
        .iter()
        .rposition(|op| matches!(op, DrawOp::StrokePath { .. }))
        .unwrap();
    assert!(last_rect < first_dot);
    assert!(first_dot < last_path);
}

#[test]
fn zero_gridline_is_heavier() {
    let s = spec(r#"{"colors":["black","red"],"data":[["x","a","b"],["A",-10,5]]}"#);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let layout = render_chart(&mut surface, &s, RenderMode::Dots.into()).unwrap();

    let zero_line = surface.ops().iter().find_map(|op| match op {
        DrawOp::StrokePath {
            segments,
            line_width,
            ..
        } => match segments.first() {
            Some(PathSegment::MoveTo { y, .. }) if (*y - layout.origin_y).abs() < 1e-9 => {
                Some(*line_width)
            }
            _ => None,
        },
        _ => None,
    });
    assert_eq!(zero_line, Some(2.0));
}

#[test]
fn malformed_specs_draw_nothing() {
    let ragged = spec(r#"{"data":[["x","a","b"],["A",1]]}"#);
    let mut surface = RecordingSurface::new(800.0, 600.0);
    let err = render_chart(&mut surface, &ragged, RenderMode::Bars.into()).unwrap_err();
    assert!(matches!(err, ChartError::MalformedSpec(_)));
    assert!(surface.ops().is_empty());
}

#[test]
fn zero_width_surface_is_rejected() {
    let s = spec(r#"{"data":[["x","a"],["A",1]]}"#);
    let mut surface = RecordingSurface::new(0.0, 600.0);
    let err = render_chart(&mut surface, &s, RenderMode::Bars.into()).unwrap_err();
    assert!(matches!(err, ChartError::SurfaceTooSmall { .. }));
}

#[test]
fn unrepresentable_ranges_fail_without_drawing() {
    let cases = [
        (r#"{"data":[["x","a","b"],["A",1e308,-1e308]]}"#, "bars"),
        (r#"{"data":[["x","a"],["A",1e-310],["B",0]]}"#, "bars"),
        (r#"{"data":[["x","a"],["A",1e308],["B",1e308]]}"#, "stacked-bars"),
    ];
    for (json, modes) in cases {
        let s = spec(json);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let err = render_chart(&mut surface, &s, modes.parse().unwrap()).unwrap_err();
        assert!(matches!(err, ChartError::MalformedSpec(_)), "{json}: {err}");
        assert!(surface.ops().is_empty());
    }
}

#[test]
fn dense_charts_draw_smaller_dots() {
    fn radii(categories: usize) -> (f64, Vec<f64>) {
        let header: Vec<String> = (0..categories).map(|i| format!("\"c{i}\"")).collect();
        let values: Vec<String> = (0..categories).map(|i| (i % 5 + 1).to_string()).collect();
        let json = format!(
            r#"{{"colors":["black","red"],"data":[["x",{}],["A",{}]]}}"#,
            header.join(","),
            values.join(",")
        );
        let s = spec(&json);
        let mut surface = RecordingSurface::new(800.0, 600.0);
        let layout = render_chart(&mut surface, &s, RenderMode::Dots.into()).unwrap();
        let r = mode_ops(surface.ops())
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillCircle { radius, .. } => Some(*radius),
                _ => None,
            })
            .collect();
        (layout.metrics.text_font_size, r)
    }

    let (t, sparse) = radii(20);
    assert_eq!(sparse.len(), 20);
    assert!(sparse.iter().all(|r| (r - t * 3.0 / 7.0).abs() < 1e-9));

    let (t, dense) = radii(21);
    assert_eq!(dense.len(), 21);
    assert!(dense.iter().all(|r| (r - t * 3.0 / 14.0).abs() < 1e-9));
}
