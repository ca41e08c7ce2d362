//! Coordinate transforms between data and screen space.
//!
//! The viewport is a uniform scale plus the screen position of the data
//! origin. Data Y grows upward, screen Y grows downward.

use crate::geom::{Point, ScreenPoint};
use crate::path::PathEntry;
use crate::view::{BoundingBox, Range};

/// Fraction of each data span added on both sides when framing.
pub const DEFAULT_DATA_PADDING: f64 = 0.1;

/// Fraction of each canvas side left empty around the framed data.
pub const DEFAULT_CANVAS_PADDING: f64 = 0.1;

/// Framing box for the points of `entries`.
///
/// With `visible_only`, hidden entries are ignored. Falls back to
/// [`BoundingBox::DEFAULT`] when no considered entry has a point.
pub fn compute_bounding_box(entries: &[PathEntry], visible_only: bool) -> BoundingBox {
    let points = entries
        .iter()
        .filter(|entry| !visible_only || entry.is_visible())
        .flat_map(|entry| entry.points());
    BoundingBox::enclosing(points, DEFAULT_DATA_PADDING)
}

/// Mapping from data coordinates into screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    origin_x: f64,
    origin_y: f64,
    scale: f64,
}

impl Viewport {
    /// Create a viewport from the screen position of the data origin and
    /// a scale in pixels per data unit.
    ///
    /// Non-positive or non-finite scales are replaced by 1.0.
    pub fn new(origin_x: f64, origin_y: f64, scale: f64) -> Self {
        Self {
            origin_x,
            origin_y,
            scale: sanitize_scale(scale),
        }
    }

    /// Fit `bbox` into a canvas, leaving `padding` of each side empty.
    ///
    /// The scale is uniform so the aspect ratio is preserved; the tighter
    /// axis decides. The box center lands on the canvas center.
    pub fn fit(bbox: BoundingBox, canvas_width: f32, canvas_height: f32, padding: f64) -> Self {
        let width = canvas_width as f64;
        let height = canvas_height as f64;
        let effective_width = width * (1.0 - padding * 2.0);
        let effective_height = height * (1.0 - padding * 2.0);

        let scale_x = if bbox.x.is_valid() {
            effective_width / bbox.width()
        } else {
            1.0
        };
        let scale_y = if bbox.y.is_valid() {
            effective_height / bbox.height()
        } else {
            1.0
        };
        let scale = sanitize_scale(scale_x.min(scale_y));

        let center = bbox.center();
        let viewport = Self {
            origin_x: width / 2.0 - center.x * scale,
            origin_y: height / 2.0 + center.y * scale,
            scale,
        };
        tracing::debug!(
            origin_x = viewport.origin_x,
            origin_y = viewport.origin_y,
            scale,
            "fitted viewport"
        );
        viewport
    }

    /// Screen X of the data origin.
    pub fn origin_x(&self) -> f64 {
        self.origin_x
    }

    /// Screen Y of the data origin.
    pub fn origin_y(&self) -> f64 {
        self.origin_y
    }

    /// Pixels per data unit. Always strictly positive.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Map a data point into screen space.
    pub fn to_screen(&self, point: Point) -> ScreenPoint {
        let sx = self.origin_x + point.x * self.scale;
        let sy = self.origin_y - point.y * self.scale;
        ScreenPoint::new(sx as f32, sy as f32)
    }

    /// Data X range covered by a canvas of the given width.
    pub fn visible_range_x(&self, canvas_width: f32) -> Range {
        Range::new(
            -self.origin_x / self.scale,
            (canvas_width as f64 - self.origin_x) / self.scale,
        )
    }

    /// Data Y range covered by a canvas of the given height.
    pub fn visible_range_y(&self, canvas_height: f32) -> Range {
        Range::new(
            -(canvas_height as f64 - self.origin_y) / self.scale,
            self.origin_y / self.scale,
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

fn sanitize_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
