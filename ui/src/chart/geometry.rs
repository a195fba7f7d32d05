//! Geometry recorded by the renderer and consumed by hit-testing.

use crate::core::scale::AxisScale;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

pub const CHART_PADDING: Padding = Padding {
    top: 24.0,
    right: 24.0,
    bottom: 40.0,
    left: 48.0,
};

/// Logical surface size plus the padding around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub size: Size,
    pub padding: Padding,
}

impl ChartFrame {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            padding: CHART_PADDING,
        }
    }

    pub fn plot(&self) -> Rect {
        Rect {
            x: self.padding.left,
            y: self.padding.top,
            width: (self.size.width - self.padding.left - self.padding.right).max(1.0),
            height: (self.size.height - self.padding.top - self.padding.bottom).max(1.0),
        }
    }
}

/// One plotted series in line mode. `points[i]` is `None` where the value is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlottedSeries {
    pub name: String,
    pub values: Vec<f64>,
    pub points: Vec<Option<Point>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineGeometry {
    pub frame: ChartFrame,
    pub scale: AxisScale,
    pub years: Vec<i32>,
    pub series: Vec<PlottedSeries>,
}

impl LineGeometry {
    /// Horizontal pixel of year index `index`. Years are evenly spaced.
    pub fn x_at(&self, index: usize) -> f64 {
        x_for_index(&self.frame.plot(), index, self.years.len())
    }

    /// Nearest year index for a horizontal pixel, clamped to the axis.
    pub fn index_at(&self, x: f64) -> usize {
        let count = self.years.len();
        if count < 2 {
            return 0;
        }
        let plot = self.frame.plot();
        let step = plot.width / (count - 1) as f64;
        let raw = ((x - plot.x) / step).round();
        raw.clamp(0.0, (count - 1) as f64) as usize
    }
}

pub(crate) fn x_for_index(plot: &Rect, index: usize, count: usize) -> f64 {
    if count < 2 {
        return plot.center_x();
    }
    plot.x + plot.width * index as f64 / (count - 1) as f64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub rect: Rect,
    pub series_index: usize,
    pub name: String,
    pub year: i32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub frame: ChartFrame,
    pub scale: AxisScale,
    pub year: i32,
    pub bars: Vec<Bar>,
}

/// What the last render drew, per chart mode.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartGeometry {
    Line(LineGeometry),
    Bar(BarGeometry),
}

impl ChartGeometry {
    pub fn frame(&self) -> &ChartFrame {
        match self {
            ChartGeometry::Line(line) => &line.frame,
            ChartGeometry::Bar(bar) => &bar.frame,
        }
    }

    pub fn scale(&self) -> &AxisScale {
        match self {
            ChartGeometry::Line(line) => &line.scale,
            ChartGeometry::Bar(bar) => &bar.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scale::nice_scale;

    fn line(years: usize) -> LineGeometry {
        LineGeometry {
            frame: ChartFrame::new(Size::new(472.0, 264.0)),
            scale: nice_scale(0.0, 1.0, 5),
            years: (0..years as i32).map(|i| 2019 + i).collect(),
            series: Vec::new(),
        }
    }

    #[test]
    fn plot_area_excludes_padding() {
        let plot = ChartFrame::new(Size::new(472.0, 264.0)).plot();
        assert_eq!(plot, Rect { x: 48.0, y: 24.0, width: 400.0, height: 200.0 });
    }

    #[test]
    fn index_lookup_inverts_even_spacing() {
        let geometry = line(5);
        for index in 0..5 {
            assert_eq!(geometry.index_at(geometry.x_at(index)), index);
        }
        assert_eq!(geometry.x_at(4), 448.0);
        assert_eq!(geometry.index_at(-50.0), 0);
        assert_eq!(geometry.index_at(10_000.0), 4);
        assert_eq!(geometry.index_at(48.0 + 49.0), 0);
        assert_eq!(geometry.index_at(48.0 + 51.0), 1);
    }
}
