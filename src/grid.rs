//! Adaptive coordinate grid with sticky axis labels.
//!
//! One tick interval, picked from a fixed set of "nice" steps, is shared by
//! both axes. Grid lines cover the whole canvas; the line through the data
//! origin is drawn heavier. Labels follow the axes but stay on screen when
//! the origin is panned out of view.

use std::sync::Arc;

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{LineSegment, LineStyle, RenderCommand, RenderList, TextAlign, TextStyle};
use crate::style::Theme;
use crate::transform::Viewport;

/// Candidate tick intervals in data units, ascending.
pub const NICE_STEPS: [f64; 15] = [
    0.1, 0.2, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0, 5000.0,
];

/// Upper bound on grid lines per axis regardless of canvas size.
const MAX_LINES_PER_AXIS: f64 = 2000.0;

/// Multipliers used when thinning a grid that is too dense to draw.
const THINNING_STEPS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// Pick the tick interval for a viewport scale.
///
/// Aims for roughly one tick every `min_pixel_spacing` pixels across
/// `canvas_width`. Returns the smallest nice step at least as large as the
/// rough interval, or the largest step when none is.
pub fn choose_tick_interval(scale: f64, min_pixel_spacing: f64, canvas_width: f64) -> f64 {
    let approx_tick_count = (canvas_width / min_pixel_spacing).floor();
    if approx_tick_count.is_nan() || approx_tick_count < 1.0 {
        return 1.0;
    }
    let rough_interval = (canvas_width / scale) / approx_tick_count;
    NICE_STEPS
        .iter()
        .copied()
        .find(|step| *step >= rough_interval)
        .unwrap_or(NICE_STEPS[NICE_STEPS.len() - 1])
}

/// Decimal digits needed to print `interval` exactly.
///
/// Integers need none. Steps below `1e-6` use the magnitude of their
/// exponent (`1.5e-7` gives 7); otherwise this counts the fractional digits
/// of the shortest decimal representation (`0.25` needs 2).
pub fn precision_for_interval(interval: f64) -> usize {
    if !interval.is_finite() || interval.fract() == 0.0 {
        return 0;
    }
    let abs = interval.abs();
    if abs < 1e-6 {
        let text = format!("{abs:e}");
        return text
            .split_once("e-")
            .and_then(|(_, exponent)| exponent.parse().ok())
            .unwrap_or(0);
    }
    let text = abs.to_string();
    text.split_once('.')
        .map(|(_, fraction)| fraction.len())
        .unwrap_or(0)
}

/// Formatter for grid tick labels.
#[derive(Clone, Default)]
pub enum TickFormatter {
    /// Fixed-point with just enough decimals for the tick interval.
    #[default]
    Default,
    /// Custom callback receiving the value and the suggested precision.
    Custom(Arc<dyn Fn(f64, usize) -> String + Send + Sync>),
}

impl TickFormatter {
    /// Format a tick value.
    pub fn format(&self, value: f64, precision: usize) -> String {
        match self {
            Self::Default => format!("{value:.precision$}"),
            Self::Custom(formatter) => formatter(value, precision),
        }
    }
}

impl std::fmt::Debug for TickFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "TickFormatter::Default"),
            Self::Custom(_) => write!(f, "TickFormatter::Custom(..)"),
        }
    }
}

/// Grid spacing and label placement settings.
#[derive(Debug, Clone)]
pub struct GridStyle {
    /// Target spacing between ticks in pixels.
    pub min_tick_spacing: f32,
    /// Distance between an axis line and its labels.
    pub label_offset: f32,
    /// Label inset from the top, bottom and left edges when pinned.
    pub sticky_inset: f32,
    /// Y-label inset from the right edge when pinned.
    pub sticky_inset_right: f32,
    /// Y-labels closer than this to the left edge are left-aligned.
    pub left_align_below: f32,
    /// Label font size in pixels.
    pub label_size: f32,
    /// Regular grid line width.
    pub line_width: f32,
    /// Width of the lines through the origin.
    pub axis_width: f32,
    /// Tick label formatter.
    pub formatter: TickFormatter,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            min_tick_spacing: 50.0,
            label_offset: 15.0,
            sticky_inset: 15.0,
            sticky_inset_right: 25.0,
            left_align_below: 30.0,
            label_size: 10.0,
            line_width: 1.0,
            axis_width: 2.0,
            formatter: TickFormatter::Default,
        }
    }
}

/// A single grid tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Value in data units.
    pub value: f64,
    /// Screen coordinate along the axis (X for vertical lines, Y for
    /// horizontal ones).
    pub screen: f32,
    /// Whether this is the line through the data origin.
    pub is_axis: bool,
}

/// Ticks for both axes of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTicks {
    /// Shared tick interval in data units.
    pub interval: f64,
    /// Decimals used for labels.
    pub precision: usize,
    /// Vertical grid lines, left to right.
    pub x: Vec<Tick>,
    /// Horizontal grid lines, bottom to top in data space.
    pub y: Vec<Tick>,
}

impl GridTicks {
    /// Compute the ticks visible on `canvas`.
    pub fn compute(viewport: &Viewport, canvas: ScreenRect, style: &GridStyle) -> Self {
        let width = canvas.width();
        let height = canvas.height();
        let scale = viewport.scale();
        let interval = choose_tick_interval(scale, style.min_tick_spacing as f64, width as f64);

        let x_range = viewport.visible_range_x(width);
        let y_range = viewport.visible_range_y(height);
        let x = axis_ticks(
            x_range.min,
            x_range.max,
            interval,
            max_lines(width, style),
            |value| (viewport.origin_x() + value * scale) as f32,
        )
        .into_iter()
        .filter(|tick| tick.screen >= -1.0 && tick.screen <= width + 1.0)
        .collect();
        let y = axis_ticks(
            y_range.min,
            y_range.max,
            interval,
            max_lines(height, style),
            |value| (viewport.origin_y() - value * scale) as f32,
        )
        .into_iter()
        .filter(|tick| tick.screen >= -1.0 && tick.screen <= height + 1.0)
        .collect();

        Self {
            interval,
            precision: precision_for_interval(interval),
            x,
            y,
        }
    }
}

/// Most lines an axis of `size` pixels may carry before it is thinned.
fn max_lines(size: f32, style: &GridStyle) -> f64 {
    let spacing = (style.min_tick_spacing as f64).max(1.0);
    let per_canvas = (size as f64 / spacing).ceil() * 2.0 + 2.0;
    per_canvas.clamp(2.0, MAX_LINES_PER_AXIS)
}

/// Keep every `stride`-th tick so at most `max_lines` remain.
///
/// The stride is a 1-2-5 multiple of a power of ten, so thinned values stay
/// round.
fn thinning_stride(count: f64, max_lines: f64) -> f64 {
    if count <= max_lines {
        return 1.0;
    }
    let raw = count / max_lines;
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    THINNING_STEPS
        .iter()
        .map(|step| step * magnitude)
        .find(|stride| *stride >= raw)
        .unwrap_or(magnitude * 10.0)
}

fn axis_ticks(
    min: f64,
    max: f64,
    interval: f64,
    max_lines: f64,
    to_screen: impl Fn(f64) -> f32,
) -> Vec<Tick> {
    let start = (min / interval).floor();
    let end = (max / interval).ceil();
    if !start.is_finite() || !end.is_finite() {
        return Vec::new();
    }
    let stride = thinning_stride(end - start, max_lines);
    if stride > 1.0 {
        tracing::debug!(interval, stride, "thinning dense grid axis");
    }
    // Tick indices are multiples of the stride, so index 0 (the origin)
    // survives thinning whenever it is in range.
    let first = (start / stride).ceil();
    let last = (end / stride).floor();
    if last < first {
        return Vec::new();
    }
    let count = (last - first) as u64;
    (0..=count)
        .map(|i| {
            let value = (first + i as f64) * stride * interval;
            Tick {
                value,
                screen: to_screen(value),
                is_axis: value.abs() < interval / 1000.0,
            }
        })
        .collect()
}

/// Vertical position of the X-axis labels.
///
/// Follows the axis at `origin_y` and is pinned near the top or bottom edge
/// once the axis leaves the canvas.
pub fn x_label_baseline(origin_y: f64, canvas_height: f32, style: &GridStyle) -> f32 {
    if origin_y < 0.0 {
        style.sticky_inset
    } else if origin_y > canvas_height as f64 {
        canvas_height - style.sticky_inset
    } else {
        origin_y as f32 + style.label_offset
    }
}

/// Horizontal position and alignment of the Y-axis labels.
pub fn y_label_anchor(origin_x: f64, canvas_width: f32, style: &GridStyle) -> (f32, TextAlign) {
    let x = if origin_x < 0.0 {
        style.sticky_inset
    } else if origin_x > canvas_width as f64 {
        canvas_width - style.sticky_inset_right
    } else {
        origin_x as f32 - style.label_offset
    };
    let align = if x < style.left_align_below {
        TextAlign::Left
    } else {
        TextAlign::Right
    };
    (x, align)
}

/// Draw grid lines and sticky labels for `viewport` into `render`.
pub fn build_grid(
    render: &mut RenderList,
    viewport: &Viewport,
    canvas: ScreenRect,
    style: &GridStyle,
    theme: &Theme,
) -> GridTicks {
    let ticks = GridTicks::compute(viewport, canvas, style);
    let mut grid = Vec::new();
    let mut axes = Vec::new();

    for tick in &ticks.x {
        let segment = LineSegment::new(
            ScreenPoint::new(tick.screen, canvas.min.y),
            ScreenPoint::new(tick.screen, canvas.max.y),
        );
        if tick.is_axis {
            axes.push(segment);
        } else {
            grid.push(segment);
        }
    }
    for tick in &ticks.y {
        let segment = LineSegment::new(
            ScreenPoint::new(canvas.min.x, tick.screen),
            ScreenPoint::new(canvas.max.x, tick.screen),
        );
        if tick.is_axis {
            axes.push(segment);
        } else {
            grid.push(segment);
        }
    }

    if !grid.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: grid,
            style: LineStyle {
                color: theme.grid,
                width: style.line_width,
            },
        });
    }
    if !axes.is_empty() {
        render.push(RenderCommand::LineSegments {
            segments: axes,
            style: LineStyle {
                color: theme.axis,
                width: style.axis_width,
            },
        });
    }

    let width = canvas.width();
    let height = canvas.height();

    let label_y = x_label_baseline(viewport.origin_y(), height, style);
    let x_label_style = TextStyle {
        color: theme.text,
        size: style.label_size,
        align: TextAlign::Center,
    };
    for tick in ticks.x.iter().filter(|tick| !tick.is_axis) {
        if tick.screen < 0.0 || tick.screen > width {
            continue;
        }
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(tick.screen, label_y),
            text: style.formatter.format(tick.value, ticks.precision),
            style: x_label_style,
        });
    }

    let (label_x, align) = y_label_anchor(viewport.origin_x(), width, style);
    let y_label_style = TextStyle {
        color: theme.text,
        size: style.label_size,
        align,
    };
    for tick in ticks.y.iter().filter(|tick| !tick.is_axis) {
        if tick.screen < 0.0 || tick.screen > height {
            continue;
        }
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(label_x, tick.screen),
            text: style.formatter.format(tick.value, ticks.precision),
            style: y_label_style,
        });
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::transform::DEFAULT_DATA_PADDING;
    use crate::view::BoundingBox;
    use proptest::prelude::*;

    fn label_texts(render: &RenderList) -> Vec<(String, ScreenPoint, TextAlign)> {
        render
            .commands()
            .iter()
            .filter_map(|command| match command {
                RenderCommand::Text {
                    text,
                    position,
                    style,
                } => Some((text.clone(), *position, style.align)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn unit_scale_on_700px_canvas_picks_50() {
        assert_eq!(choose_tick_interval(1.0, 50.0, 700.0), 50.0);
    }

    #[test]
    fn narrow_canvas_falls_back_to_unit_interval() {
        assert_eq!(choose_tick_interval(1.0, 50.0, 40.0), 1.0);
    }

    #[test]
    fn extreme_zoom_clamps_to_step_set() {
        assert_eq!(choose_tick_interval(1e-6, 50.0, 700.0), 5000.0);
        assert_eq!(choose_tick_interval(1e6, 50.0, 700.0), 0.1);
    }

    #[test]
    fn precision_counts_fraction_digits() {
        assert_eq!(precision_for_interval(50.0), 0);
        assert_eq!(precision_for_interval(0.0), 0);
        assert_eq!(precision_for_interval(0.1), 1);
        assert_eq!(precision_for_interval(0.25), 2);
        assert_eq!(precision_for_interval(1e-7), 7);
        assert_eq!(precision_for_interval(1.5e-7), 7);
        assert_eq!(precision_for_interval(0.000125), 6);
    }

    #[test]
    fn default_formatter_uses_precision() {
        let formatter = TickFormatter::default();
        assert_eq!(formatter.format(0.30000000000000004, 1), "0.3");
        assert_eq!(formatter.format(-150.0, 0), "-150");
    }

    #[test]
    fn origin_tick_is_marked_as_axis() {
        let viewport = Viewport::new(350.0, 250.0, 1.0);
        let canvas = ScreenRect::from_size(700.0, 500.0);
        let ticks = GridTicks::compute(&viewport, canvas, &GridStyle::default());
        assert_eq!(ticks.interval, 50.0);
        let axes: Vec<f64> = ticks.x.iter().filter(|t| t.is_axis).map(|t| t.value).collect();
        assert_eq!(axes, [0.0]);
        assert!(ticks.y.iter().any(|t| t.is_axis && t.screen == 250.0));
        assert!(ticks.x.iter().all(|t| t.screen >= -1.0 && t.screen <= 701.0));
    }

    #[test]
    fn labels_follow_visible_axis() {
        let style = GridStyle::default();
        assert_eq!(x_label_baseline(200.0, 500.0, &style), 215.0);
        assert_eq!(y_label_anchor(300.0, 700.0, &style), (285.0, TextAlign::Right));
    }

    #[test]
    fn labels_stick_to_nearest_edge() {
        let style = GridStyle::default();
        assert_eq!(x_label_baseline(-40.0, 500.0, &style), 15.0);
        assert_eq!(x_label_baseline(900.0, 500.0, &style), 485.0);
        assert_eq!(y_label_anchor(-40.0, 700.0, &style), (15.0, TextAlign::Left));
        assert_eq!(y_label_anchor(900.0, 700.0, &style), (675.0, TextAlign::Right));
    }

    #[test]
    fn build_grid_skips_zero_label_and_uses_clamped_baseline() {
        // Origin far above the canvas: X labels pin to the top inset.
        let viewport = Viewport::new(350.0, -1000.0, 1.0);
        let mut render = RenderList::new();
        let canvas = ScreenRect::from_size(700.0, 500.0);
        build_grid(&mut render, &viewport, canvas, &GridStyle::default(), &Theme::light());
        let labels = label_texts(&render);
        assert!(labels.iter().all(|(text, _, _)| text != "0"));
        let x_labels: Vec<_> = labels
            .iter()
            .filter(|(_, _, align)| *align == TextAlign::Center)
            .collect();
        assert!(!x_labels.is_empty());
        assert!(x_labels.iter().all(|(_, position, _)| position.y == 15.0));
        assert!(x_labels.iter().any(|(text, _, _)| text == "-50"));
    }

    #[test]
    fn origin_lines_use_axis_width() {
        let viewport = Viewport::new(350.0, 250.0, 1.0);
        let mut render = RenderList::new();
        let theme = Theme::light();
        build_grid(
            &mut render,
            &viewport,
            ScreenRect::from_size(700.0, 500.0),
            &GridStyle::default(),
            &theme,
        );
        let axis_segments = render.commands().iter().find_map(|command| match command {
            RenderCommand::LineSegments { segments, style } if style.color == theme.axis => {
                Some((segments.len(), style.width))
            }
            _ => None,
        });
        assert_eq!(axis_segments, Some((2, 2.0)));
    }

    #[test]
    fn widely_spread_data_keeps_a_thinned_grid_and_axes() {
        let style = GridStyle::default();
        let canvas = ScreenRect::from_size(700.0, 500.0);
        let points = [Point::new(0.0, 0.0), Point::new(1e9, 1e9)];
        let bbox = BoundingBox::enclosing(&points, DEFAULT_DATA_PADDING);
        let viewport = Viewport::fit(bbox, canvas.width(), canvas.height(), 0.1);

        let mut render = RenderList::new();
        let ticks = build_grid(&mut render, &viewport, canvas, &style, &Theme::light());
        assert_eq!(ticks.interval, 5000.0);
        for (axis, size) in [(&ticks.x, canvas.width()), (&ticks.y, canvas.height())] {
            assert!(!axis.is_empty());
            assert!(axis.iter().any(|tick| tick.is_axis));
            assert!(axis.len() as f64 <= max_lines(size, &style));
            for pair in axis.windows(2) {
                let gap = (pair[1].screen - pair[0].screen).abs();
                assert!(gap >= style.min_tick_spacing / 2.0, "gap {gap}");
            }
        }
        assert!(!label_texts(&render).is_empty());
    }

    #[test]
    fn thinning_stride_is_round() {
        assert_eq!(thinning_stride(10.0, 30.0), 1.0);
        assert_eq!(thinning_stride(420_000.0, 30.0), 20_000.0);
        assert_eq!(thinning_stride(31.0, 30.0), 2.0);
        assert_eq!(thinning_stride(100.0, 30.0), 5.0);
    }

    proptest! {
        #[test]
        fn zooming_out_never_shrinks_interval(
            scale in 1e-4f64..1e4,
            factor in 1.0f64..100.0,
            width in 50f64..4000.0,
        ) {
            let near = choose_tick_interval(scale, 50.0, width);
            let far = choose_tick_interval(scale / factor, 50.0, width);
            prop_assert!(far >= near);
        }
    }
}
