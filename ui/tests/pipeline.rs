//! End-to-end: text in, chart geometry and tooltips out.

use std::collections::BTreeSet;

use ui::chart::surface::DrawOp;
use ui::chart::{locate, ChartGeometry, ChartSession, HitSettings, Point, RecordingSurface, Size};
use ui::core::config::Config;
use ui::core::dataset::Dataset;
use ui::core::format::ABSENT;
use ui::core::series::{chart_snapshot, comparison_table, SortMode};
use ui::core::state::{ComparatorState, LoadStatus};

const CSV: &str = "\u{feff}instnm,Percent admitted - total (ADM2020),Percent admitted - total (ADM2021),\
\"Total price for in-state students living on campus 2021-22\",Carnegie classification\r\n\
Oakland University,0.81,0.85,\"$28,450\",Doctoral\r\n\
Wayne State University,0.72,,\"$30,112\",\"Doctoral, research\"\r\n\
\r\n\
\"Saginaw Valley State University\",0.9,0.88,,Master's\r\n";

fn dataset() -> Dataset {
    Dataset::from_text(CSV, &Config::default()).unwrap()
}

fn everyone(dataset: &Dataset) -> BTreeSet<String> {
    dataset.institutions().into_iter().collect()
}

#[test]
fn headers_group_into_metrics() {
    let dataset = dataset();
    assert_eq!(
        dataset.metrics,
        vec![
            "Carnegie classification",
            "Percent admitted - total",
            "Total price for in-state students living on campus",
        ]
    );
    assert_eq!(dataset.group("Percent admitted - total").unwrap().years(), vec![2020, 2021]);
    assert_eq!(
        dataset
            .group("Total price for in-state students living on campus")
            .unwrap()
            .years(),
        vec![2021]
    );
    assert!(dataset.group("Carnegie classification").unwrap().is_static());
    assert_eq!(dataset.institutions().len(), 3);
}

#[test]
fn multi_year_metric_renders_lines_and_hits_points() {
    let dataset = dataset();
    let snapshot = chart_snapshot(&dataset, "Percent admitted - total", &everyone(&dataset));
    assert_eq!(snapshot.series[1].values, vec![0.72, ABSENT]);

    let mut surface = RecordingSurface::new(Size::new(472.0, 264.0), 2.0);
    let mut session = ChartSession::new(5, HitSettings::default());
    session.show(Some(snapshot));
    session.redraw(&mut surface);

    let Some(ChartGeometry::Line(line)) = session.geometry().cloned() else {
        panic!("expected a line chart");
    };
    // Wayne State has one present point, so no path, only a marker.
    assert_eq!(surface.polylines().len(), 2);
    assert_eq!(surface.circles().len(), 5);

    let target = line.series[0].points[1].unwrap();
    let hit = locate(target, &ChartGeometry::Line(line.clone()), &HitSettings::default()).unwrap();
    assert_eq!(hit.name, "Oakland University");
    assert_eq!(hit.year, 2021);
    assert_eq!(hit.tooltip_text("Percent admitted - total"), "OU • 2021: 85.00%");

    let tooltip = session
        .pointer_moved(&mut surface, target, Size::new(472.0, 264.0))
        .unwrap();
    assert_eq!(tooltip.text, "OU • 2021: 85.00%");
    assert_eq!(session.hovered(), Some(0));
    assert!(surface.ops.iter().any(|op| matches!(op, DrawOp::Alpha(alpha) if *alpha < 1.0)));
}

#[test]
fn single_year_metric_renders_bars_with_codes() {
    let dataset = dataset();
    let snapshot = chart_snapshot(
        &dataset,
        "Total price for in-state students living on campus",
        &everyone(&dataset),
    );
    let mut surface = RecordingSurface::new(Size::new(472.0, 264.0), 1.0);
    let mut session = ChartSession::new(5, HitSettings::default());
    session.show(Some(snapshot));
    session.redraw(&mut surface);

    let Some(ChartGeometry::Bar(bars)) = session.geometry() else {
        panic!("expected a bar chart");
    };
    assert_eq!(bars.bars.len(), 2);
    assert!(surface.texts().contains(&"OU"));
    assert!(surface.texts().contains(&"WSU"));

    let over_wayne = Point::new(bars.bars[1].rect.center_x(), bars.bars[1].rect.y + 5.0);
    let tooltip = session
        .pointer_moved(&mut surface, over_wayne, Size::new(472.0, 264.0))
        .unwrap();
    assert_eq!(tooltip.text, "WSU • 2021: $30,112");
}

#[test]
fn static_metric_has_no_chart_but_fills_the_table() {
    let dataset = dataset();
    let selection = everyone(&dataset);
    let snapshot = chart_snapshot(&dataset, "Carnegie classification", &selection);
    assert_eq!(snapshot.subtitle, "No year data");

    let mut surface = RecordingSurface::new(Size::new(472.0, 264.0), 1.0);
    let mut session = ChartSession::new(5, HitSettings::default());
    session.show(Some(snapshot));
    session.redraw(&mut surface);
    assert!(session.geometry().is_none());
    assert_eq!(surface.texts(), vec!["No data to display."]);
    assert!(session
        .pointer_moved(&mut surface, Point::new(100.0, 100.0), Size::new(472.0, 264.0))
        .is_none());

    let table = comparison_table(&dataset, "Carnegie classification", &selection, SortMode::Name);
    assert_eq!(table.columns, vec![None]);
    assert_eq!(table.rows[2].cells, vec!["Doctoral, research"]);
}

#[test]
fn latest_value_sort_puts_missing_values_last() {
    let dataset = dataset();
    let table = comparison_table(
        &dataset,
        "Percent admitted - total",
        &everyone(&dataset),
        SortMode::LatestValue,
    );
    let names: Vec<_> = table.rows.iter().map(|row| row.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Saginaw Valley State University", "Oakland University", "Wayne State University"]
    );
    assert_eq!(table.rows[2].cells, vec!["72.00%", "—"]);
}

#[test]
fn state_drives_the_whole_flow() {
    let mut state = ComparatorState::new(Config::default());
    let ticket = state.begin_load("Reading");
    state.finish_load(ticket, Dataset::from_text(CSV, &Config::default()));
    assert!(matches!(state.status(), LoadStatus::Done { institutions: 3, .. }));

    state.select_metric("Percent admitted - total");
    state.select_none();
    state.toggle_institution("Oakland University");

    let mut surface = RecordingSurface::new(Size::new(472.0, 264.0), 1.0);
    state.chart_mut().redraw(&mut surface);
    assert_eq!(surface.polylines().len(), 1);

    let definition = state.definition().unwrap();
    assert!(definition.found);
    assert_eq!(definition.source, "IPEDS Admissions (ADM)");
}
