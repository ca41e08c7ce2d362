//! Data ranges and bounding boxes.

use crate::geom::Point;

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the range.
    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Grow a zero-width range by one unit on each side.
    pub fn widened(&self) -> Self {
        if self.min == self.max {
            Self {
                min: self.min - 1.0,
                max: self.max + 1.0,
            }
        } else {
            *self
        }
    }

    /// Add `frac` of the span on both sides.
    pub fn padded(&self, frac: f64) -> Self {
        let padding = self.span() * frac;
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}

/// Axis-aligned data-space box enclosing a set of points.
///
/// Boxes produced by [`BoundingBox::enclosing`] always have a strictly
/// positive extent on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// X extent.
    pub x: Range,
    /// Y extent.
    pub y: Range,
}

impl BoundingBox {
    /// The box used when there is nothing to frame.
    pub const DEFAULT: Self = Self {
        x: Range { min: -1.0, max: 1.0 },
        y: Range { min: -1.0, max: 1.0 },
    };

    /// Create a box from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Box from explicit bounds.
    pub fn from_bounds(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self::new(Range::new(min_x, max_x), Range::new(min_y, max_y))
    }

    /// Tight bounds of the given points, or `None` when there are none.
    pub fn tight<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut bounds: Option<Self> = None;
        for point in points {
            if !point.x.is_finite() || !point.y.is_finite() {
                continue;
            }
            match bounds.as_mut() {
                None => {
                    bounds = Some(Self::new(
                        Range::new(point.x, point.x),
                        Range::new(point.y, point.y),
                    ));
                }
                Some(existing) => {
                    existing.x.expand_to_include(point.x);
                    existing.y.expand_to_include(point.y);
                }
            }
        }
        bounds
    }

    /// Framing box for the given points: tight bounds, widened when
    /// degenerate, then padded by `padding` of the span on every side.
    ///
    /// Widening happens before padding, so a single point `(5, 5)` yields
    /// `[3.8, 6.2] x [3.8, 6.2]` with the default 10% padding.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Point>, padding: f64) -> Self {
        match Self::tight(points) {
            Some(tight) => Self::new(
                tight.x.widened().padded(padding),
                tight.y.widened().padded(padding),
            ),
            None => Self::DEFAULT,
        }
    }

    /// Data-space center of the box.
    pub fn center(&self) -> Point {
        Point::new(self.x.center(), self.y.center())
    }

    /// Width in data units.
    pub fn width(&self) -> f64 {
        self.x.span()
    }

    /// Height in data units.
    pub fn height(&self) -> f64 {
        self.y.span()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::DEFAULT
    }
}
