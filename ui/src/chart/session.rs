//! Chart state between renders: the snapshot on display, the hovered series
//! and the geometry of the last draw.

use tracing::trace;

use crate::core::series::ChartSnapshot;

use super::geometry::{ChartGeometry, Point, Size};
use super::hit::{locate, place_tooltip, HitSettings};
use super::render::{render, render_empty, RenderOptions};
use super::surface::Surface;

/// Rough glyph width used to size the tooltip before it is laid out.
const TOOLTIP_CHAR_WIDTH: f64 = 7.0;
const TOOLTIP_HEIGHT: f64 = 28.0;
const TOOLTIP_INSET: f64 = 16.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub text: String,
    /// Top-left corner in displayed pixels.
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSession {
    snapshot: Option<ChartSnapshot>,
    hovered: Option<usize>,
    geometry: Option<ChartGeometry>,
    max_ticks: u32,
    hit: HitSettings,
}

impl ChartSession {
    pub fn new(max_ticks: u32, hit: HitSettings) -> Self {
        Self {
            snapshot: None,
            hovered: None,
            geometry: None,
            max_ticks,
            hit,
        }
    }

    pub fn snapshot(&self) -> Option<&ChartSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn geometry(&self) -> Option<&ChartGeometry> {
        self.geometry.as_ref()
    }

    /// Replace what is on display. Hover state does not carry over to a
    /// different snapshot; an identical one keeps the current hover and geometry.
    pub fn show(&mut self, snapshot: Option<ChartSnapshot>) {
        if snapshot == self.snapshot {
            return;
        }
        self.snapshot = snapshot;
        self.hovered = None;
        self.geometry = None;
    }

    /// Draw the current snapshot, e.g. after `show` or a resize.
    pub fn redraw<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.geometry = match &self.snapshot {
            Some(snapshot) => render(
                surface,
                snapshot,
                RenderOptions {
                    max_ticks: self.max_ticks,
                    hovered: self.hovered,
                },
            ),
            None => {
                render_empty(surface);
                None
            }
        };
    }

    /// Hit-test a pointer given in displayed pixels of a surface currently
    /// shown at `displayed` size. Redraws when the hovered series changes.
    pub fn pointer_moved<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        pointer: Point,
        displayed: Size,
    ) -> Option<Tooltip> {
        let geometry = self.geometry.as_ref()?;
        let logical = geometry.frame().size;
        let ratio = if logical.width > 0.0 && displayed.width > 0.0 {
            displayed.width / logical.width
        } else {
            1.0
        };

        let hit = locate(pointer.scaled(1.0 / ratio), geometry, &self.hit);
        let hovered = hit.as_ref().map(|hit| hit.series_index);
        let tooltip = match (&hit, &self.snapshot) {
            (Some(hit), Some(snapshot)) => {
                let text = hit.tooltip_text(&snapshot.metric);
                let size = Size::new(
                    text.chars().count() as f64 * TOOLTIP_CHAR_WIDTH + TOOLTIP_INSET,
                    TOOLTIP_HEIGHT,
                );
                let position = place_tooltip(hit.anchor.scaled(ratio), size, displayed.width);
                Some(Tooltip { text, position })
            }
            _ => None,
        };

        if hovered != self.hovered {
            trace!(?hovered, "hover changed");
            self.hovered = hovered;
            self.redraw(surface);
        }
        tooltip
    }

    /// Pointer left the surface: clear emphasis.
    pub fn pointer_left<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        if self.hovered.take().is_some() {
            self.redraw(surface);
        }
    }
}
