//! Line and bar chart rendering.
//!
//! One year on the axis draws a bar chart, two or more draw a line chart.
//! Rendering is a pure function of the snapshot, the hovered series and the
//! surface size; the returned geometry is what hit-testing works from.

use tracing::debug;

use crate::core::format::{format_value, is_absent, FormatOptions};
use crate::core::institutions::{code_for, color_for};
use crate::core::scale::{nice_scale, AxisScale};
use crate::core::series::ChartSnapshot;

use super::geometry::{
    x_for_index, Bar, BarGeometry, ChartFrame, ChartGeometry, LineGeometry, PlottedSeries, Point,
    Rect, Size,
};
use super::surface::{Stroke, Surface, TextAlign, TextStyle};

/// Used when the surface reports no layout size yet.
pub const FALLBACK_SIZE: Size = Size::new(1000.0, 320.0);

pub const EMPTY_MESSAGE: &str = "No data to display.";

const GRID_COLOR: &str = "#e5e7eb";
const AXIS_COLOR: &str = "#9ca3af";
const LABEL_COLOR: &str = "#4b5563";
const LABEL_FONT: &str = "12px system-ui, sans-serif";
const EMPTY_FONT: &str = "14px system-ui, sans-serif";

const DIMMED_ALPHA: f64 = 0.2;
const LINE_WIDTH: f64 = 2.0;
const HOVER_LINE_WIDTH: f64 = 3.0;
const MARKER_RADIUS: f64 = 3.0;
const HOVER_MARKER_RADIUS: f64 = 4.0;
const BAR_WIDTH_SHARE: f64 = 0.62;
const MIN_BAR_WIDTH: f64 = 8.0;
const MIN_BAR_HEIGHT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub max_ticks: u32,
    pub hovered: Option<usize>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_ticks: 5,
            hovered: None,
        }
    }
}

/// Draw `snapshot` and return its geometry, or `None` after drawing the empty state.
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    snapshot: &ChartSnapshot,
    options: RenderOptions,
) -> Option<ChartGeometry> {
    let frame = begin(surface);

    let Some((min, max)) = value_range(snapshot) else {
        draw_empty(surface, &frame);
        return None;
    };

    let geometry = if snapshot.years.len() == 1 {
        let scale = nice_scale(min.min(0.0), max.max(0.0), options.max_ticks);
        draw_grid(surface, &frame, &scale, &snapshot.metric);
        ChartGeometry::Bar(draw_bars(surface, frame, scale, snapshot, options.hovered))
    } else {
        let scale = nice_scale(min, max, options.max_ticks);
        draw_grid(surface, &frame, &scale, &snapshot.metric);
        ChartGeometry::Line(draw_lines(surface, frame, scale, snapshot, options.hovered))
    };

    debug!(
        metric = %snapshot.metric,
        years = snapshot.years.len(),
        series = snapshot.series.len(),
        "chart rendered"
    );
    Some(geometry)
}

/// Clear the surface and show the placeholder message.
pub fn render_empty<S: Surface + ?Sized>(surface: &mut S) {
    let frame = begin(surface);
    draw_empty(surface, &frame);
}

fn begin<S: Surface + ?Sized>(surface: &mut S) -> ChartFrame {
    let mut size = surface.logical_size();
    if size.is_empty() {
        size = FALLBACK_SIZE;
    }
    let ratio = surface.pixel_ratio();
    surface.begin_frame(size, ratio);
    ChartFrame::new(size)
}

/// Range over present values, `None` when there is nothing to plot.
fn value_range(snapshot: &ChartSnapshot) -> Option<(f64, f64)> {
    if snapshot.years.is_empty() || snapshot.series.is_empty() {
        return None;
    }
    snapshot
        .series
        .iter()
        .flat_map(|series| series.present_values())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}

fn draw_empty<S: Surface + ?Sized>(surface: &mut S, frame: &ChartFrame) {
    let center = Point::new(frame.size.width / 2.0, frame.size.height / 2.0);
    surface.text(
        EMPTY_MESSAGE,
        center,
        TextStyle {
            color: LABEL_COLOR,
            font: EMPTY_FONT,
            align: TextAlign::Center,
        },
    );
}

fn draw_grid<S: Surface + ?Sized>(surface: &mut S, frame: &ChartFrame, scale: &AxisScale, metric: &str) {
    let plot = frame.plot();
    let grid = Stroke {
        color: GRID_COLOR,
        width: 1.0,
    };
    for tick in scale.ticks() {
        let y = scale.to_pixel(tick, plot.y, plot.height);
        surface.line(Point::new(plot.x, y), Point::new(plot.right(), y), grid);
        surface.text(
            &format_value(tick, metric, FormatOptions::default()),
            Point::new(plot.x - 6.0, y),
            TextStyle {
                color: LABEL_COLOR,
                font: LABEL_FONT,
                align: TextAlign::Right,
            },
        );
    }
    let axis = Stroke {
        color: AXIS_COLOR,
        width: 1.0,
    };
    surface.line(Point::new(plot.x, plot.y), Point::new(plot.x, plot.bottom()), axis);
    surface.line(Point::new(plot.x, plot.bottom()), Point::new(plot.right(), plot.bottom()), axis);
}

fn emphasis(hovered: Option<usize>, index: usize) -> (f64, bool) {
    match hovered {
        None => (1.0, false),
        Some(h) if h == index => (1.0, true),
        Some(_) => (DIMMED_ALPHA, false),
    }
}

fn draw_lines<S: Surface + ?Sized>(
    surface: &mut S,
    frame: ChartFrame,
    scale: AxisScale,
    snapshot: &ChartSnapshot,
    hovered: Option<usize>,
) -> LineGeometry {
    let plot = frame.plot();
    let count = snapshot.years.len();
    let label_style = TextStyle {
        color: LABEL_COLOR,
        font: LABEL_FONT,
        align: TextAlign::Center,
    };

    for (index, year) in snapshot.years.iter().enumerate() {
        let x = x_for_index(&plot, index, count);
        surface.text(&year.to_string(), Point::new(x, plot.bottom() + 18.0), label_style);
    }

    let mut plotted = Vec::with_capacity(snapshot.series.len());
    for (index, series) in snapshot.series.iter().enumerate() {
        let points: Vec<Option<Point>> = series
            .values
            .iter()
            .enumerate()
            .map(|(year_index, value)| {
                (!is_absent(*value)).then(|| {
                    Point::new(
                        x_for_index(&plot, year_index, count),
                        scale.to_pixel(*value, plot.y, plot.height),
                    )
                })
            })
            .collect();

        let (alpha, emphasised) = emphasis(hovered, index);
        let color = color_for(&series.name);
        let path: Vec<Point> = points.iter().flatten().copied().collect();

        surface.set_alpha(alpha);
        if path.len() > 1 {
            surface.polyline(
                &path,
                Stroke {
                    color,
                    width: if emphasised { HOVER_LINE_WIDTH } else { LINE_WIDTH },
                },
            );
        }
        let radius = if emphasised { HOVER_MARKER_RADIUS } else { MARKER_RADIUS };
        for point in &path {
            surface.circle(*point, radius, color);
        }

        plotted.push(PlottedSeries {
            name: series.name.clone(),
            values: series.values.clone(),
            points,
        });
    }
    surface.set_alpha(1.0);

    LineGeometry {
        frame,
        scale,
        years: snapshot.years.clone(),
        series: plotted,
    }
}

fn draw_bars<S: Surface + ?Sized>(
    surface: &mut S,
    frame: ChartFrame,
    scale: AxisScale,
    snapshot: &ChartSnapshot,
    hovered: Option<usize>,
) -> BarGeometry {
    let plot = frame.plot();
    let year = snapshot.years[0];
    let present: Vec<(usize, &str, f64)> = snapshot
        .series
        .iter()
        .enumerate()
        .filter_map(|(index, series)| {
            let value = series.values.first().copied()?;
            (!is_absent(value)).then_some((index, series.name.as_str(), value))
        })
        .collect();

    let slot = plot.width / present.len().max(1) as f64;
    let bar_width = (slot * BAR_WIDTH_SHARE).max(MIN_BAR_WIDTH);
    let baseline = scale.to_pixel(0.0_f64.clamp(scale.min, scale.max), plot.y, plot.height);

    let mut bars = Vec::with_capacity(present.len());
    for (slot_index, &(series_index, name, value)) in present.iter().enumerate() {
        let x = plot.x + slot * slot_index as f64 + (slot - bar_width) / 2.0;
        let y = scale.to_pixel(value, plot.y, plot.height);
        let rect = Rect {
            x,
            y: y.min(baseline),
            width: bar_width,
            height: (baseline - y).abs().max(MIN_BAR_HEIGHT),
        };

        let (alpha, emphasised) = emphasis(hovered, series_index);
        let color = color_for(name);
        surface.set_alpha(alpha);
        surface.fill_rect(rect, color);
        if emphasised {
            surface.stroke_rect(rect, Stroke { color: "#111827", width: 2.0 });
        }
        surface.set_alpha(1.0);
        surface.text(
            code_for(name),
            Point::new(rect.center_x(), plot.bottom() + 18.0),
            TextStyle {
                color: LABEL_COLOR,
                font: LABEL_FONT,
                align: TextAlign::Center,
            },
        );

        bars.push(Bar {
            rect,
            series_index,
            name: name.to_string(),
            year,
            value,
        });
    }

    BarGeometry {
        frame,
        scale,
        year,
        bars,
    }
}
