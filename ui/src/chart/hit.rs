//! Pointer hit-testing and tooltip placement.

use crate::core::format::{format_value, is_absent, FormatOptions};
use crate::core::institutions::code_for;

use super::geometry::{BarGeometry, ChartGeometry, LineGeometry, Point, Size};

const TOOLTIP_OFFSET: f64 = 12.0;
const TOOLTIP_MARGIN: f64 = 8.0;
/// Weight of vertical distance when ranking overlapping bars.
const BAR_VERTICAL_WEIGHT: f64 = 0.2;
/// Vertical aim point inside a bar, as a share of its height from the top.
const BAR_AIM: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitSettings {
    pub line_threshold_px: f64,
    pub bar_padding_px: f64,
}

impl Default for HitSettings {
    fn default() -> Self {
        Self {
            line_threshold_px: 28.0,
            bar_padding_px: 6.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub series_index: usize,
    pub name: String,
    pub year: i32,
    pub value: f64,
    /// Logical pixel the tooltip points at.
    pub anchor: Point,
}

impl Hit {
    pub fn tooltip_text(&self, metric: &str) -> String {
        format!(
            "{} • {}: {}",
            code_for(&self.name),
            self.year,
            format_value(self.value, metric, FormatOptions::default())
        )
    }
}

/// Nearest data point to `pointer` (logical pixels), per chart mode.
pub fn locate(pointer: Point, geometry: &ChartGeometry, settings: &HitSettings) -> Option<Hit> {
    match geometry {
        ChartGeometry::Line(line) => locate_line(pointer, line, settings.line_threshold_px),
        ChartGeometry::Bar(bars) => locate_bar(pointer, bars, settings.bar_padding_px),
    }
}

fn locate_line(pointer: Point, geometry: &LineGeometry, threshold: f64) -> Option<Hit> {
    if geometry.years.is_empty() {
        return None;
    }
    let index = geometry.index_at(pointer.x);

    let (series_index, point, distance) = geometry
        .series
        .iter()
        .enumerate()
        .filter_map(|(series_index, series)| {
            let point = series.points.get(index).copied().flatten()?;
            Some((series_index, point, (point.y - pointer.y).abs()))
        })
        .min_by(|a, b| a.2.total_cmp(&b.2))?;

    if distance >= threshold {
        return None;
    }

    let series = &geometry.series[series_index];
    let value = series.values[index];
    if is_absent(value) {
        return None;
    }
    Some(Hit {
        series_index,
        name: series.name.clone(),
        year: geometry.years[index],
        value,
        anchor: point,
    })
}

fn locate_bar(pointer: Point, geometry: &BarGeometry, padding: f64) -> Option<Hit> {
    geometry
        .bars
        .iter()
        .filter(|bar| pointer.x >= bar.rect.x - padding && pointer.x <= bar.rect.right() + padding)
        .map(|bar| {
            let aim_y = bar.rect.y + BAR_AIM * bar.rect.height;
            let score = (pointer.x - bar.rect.center_x()).abs()
                + BAR_VERTICAL_WEIGHT * (pointer.y - aim_y).abs();
            (bar, score)
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(bar, _)| Hit {
            series_index: bar.series_index,
            name: bar.name.clone(),
            year: bar.year,
            value: bar.value,
            anchor: Point::new(bar.rect.center_x(), bar.rect.y),
        })
}

/// Top-left corner for a tooltip of `tooltip` size pointing at `anchor`.
///
/// Centred above the anchor, kept inside the container horizontally, and
/// flipped below the anchor when there is no room above.
pub fn place_tooltip(anchor: Point, tooltip: Size, container_width: f64) -> Point {
    let max_left = (container_width - tooltip.width - TOOLTIP_MARGIN).max(TOOLTIP_MARGIN);
    let left = (anchor.x - tooltip.width / 2.0).clamp(TOOLTIP_MARGIN, max_left);

    let above = anchor.y - tooltip.height - TOOLTIP_OFFSET;
    let top = if above < TOOLTIP_MARGIN {
        anchor.y + TOOLTIP_OFFSET
    } else {
        above
    };
    Point::new(left, top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::geometry::{Bar, ChartFrame, PlottedSeries, Rect};
    use crate::core::format::ABSENT;
    use crate::core::scale::nice_scale;

    fn line_geometry() -> LineGeometry {
        LineGeometry {
            frame: ChartFrame::new(Size::new(472.0, 264.0)),
            scale: nice_scale(0.0, 100.0, 5),
            years: vec![2019, 2020, 2021],
            series: vec![
                PlottedSeries {
                    name: "Wayne State University".into(),
                    values: vec![10.0, 20.0, ABSENT],
                    points: vec![Some(Point::new(48.0, 204.0)), Some(Point::new(248.0, 184.0)), None],
                },
                PlottedSeries {
                    name: "Unlisted College".into(),
                    values: vec![80.0, 90.0, 95.0],
                    points: vec![
                        Some(Point::new(48.0, 64.0)),
                        Some(Point::new(248.0, 44.0)),
                        Some(Point::new(448.0, 34.0)),
                    ],
                },
            ],
        }
    }

    #[test]
    fn pointer_on_a_point_hits_it() {
        let geometry = ChartGeometry::Line(line_geometry());
        let hit = locate(Point::new(248.0, 184.0), &geometry, &HitSettings::default()).unwrap();
        assert_eq!(hit.series_index, 0);
        assert_eq!(hit.year, 2020);
        assert_eq!(hit.value, 20.0);
        assert_eq!(hit.anchor, Point::new(248.0, 184.0));
    }

    #[test]
    fn nearest_series_by_vertical_distance_wins() {
        let geometry = ChartGeometry::Line(line_geometry());
        let hit = locate(Point::new(60.0, 80.0), &geometry, &HitSettings::default()).unwrap();
        assert_eq!(hit.series_index, 1);
        assert_eq!(hit.year, 2019);
    }

    #[test]
    fn absent_points_are_skipped() {
        let geometry = ChartGeometry::Line(line_geometry());
        let hit = locate(Point::new(440.0, 40.0), &geometry, &HitSettings::default()).unwrap();
        assert_eq!(hit.series_index, 1);
        assert_eq!(hit.year, 2021);
    }

    #[test]
    fn far_pointer_reports_none() {
        let geometry = ChartGeometry::Line(line_geometry());
        assert!(locate(Point::new(248.0, 130.0), &geometry, &HitSettings::default()).is_none());
        assert!(locate(Point::new(248.0, 184.0 + 28.0), &geometry, &HitSettings::default()).is_none());
    }

    fn bar_geometry() -> BarGeometry {
        let bar = |index: usize, x: f64, y: f64, height: f64| Bar {
            rect: Rect { x, y, width: 40.0, height },
            series_index: index,
            name: format!("Inst {index}"),
            year: 2021,
            value: height,
        };
        BarGeometry {
            frame: ChartFrame::new(Size::new(472.0, 264.0)),
            scale: nice_scale(0.0, 200.0, 5),
            year: 2021,
            bars: vec![bar(0, 100.0, 124.0, 100.0), bar(1, 150.0, 24.0, 200.0)],
        }
    }

    #[test]
    fn bar_hit_uses_padded_horizontal_extent() {
        let geometry = ChartGeometry::Bar(bar_geometry());
        let settings = HitSettings::default();
        assert_eq!(locate(Point::new(95.0, 200.0), &geometry, &settings).unwrap().series_index, 0);
        assert!(locate(Point::new(93.0, 200.0), &geometry, &settings).is_none());
        assert!(locate(Point::new(300.0, 200.0), &geometry, &settings).is_none());
    }

    #[test]
    fn overlapping_bars_are_ranked_by_weighted_distance() {
        let geometry = ChartGeometry::Bar(bar_geometry());
        let hit = locate(Point::new(145.0, 60.0), &geometry, &HitSettings::default()).unwrap();
        assert_eq!(hit.series_index, 1);
        assert_eq!(hit.anchor, Point::new(170.0, 24.0));
    }

    #[test]
    fn tooltip_text_uses_code_year_and_formatted_value() {
        let hit = Hit {
            series_index: 0,
            name: "Unlisted College".into(),
            year: 2020,
            value: 0.5,
            anchor: Point::default(),
        };
        assert_eq!(hit.tooltip_text("Admission rate"), "Unlisted College • 2020: 50.00%");
    }

    #[test]
    fn tooltip_is_centred_above_and_clamped() {
        let size = Size::new(100.0, 30.0);
        assert_eq!(place_tooltip(Point::new(200.0, 100.0), size, 472.0), Point::new(150.0, 58.0));
        assert_eq!(place_tooltip(Point::new(10.0, 100.0), size, 472.0).x, 8.0);
        assert_eq!(place_tooltip(Point::new(470.0, 100.0), size, 472.0).x, 364.0);
    }

    #[test]
    fn tooltip_flips_below_near_the_top() {
        let placed = place_tooltip(Point::new(200.0, 30.0), Size::new(100.0, 30.0), 472.0);
        assert_eq!(placed.y, 42.0);
    }
}
