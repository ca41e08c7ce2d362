//! Path strokes and vertex labels.
//!
//! Vertex labels are pushed away from the adjacent segments: the label
//! direction is the negated bisector of the unit vectors toward the
//! neighboring vertices, measured in screen space.

use crate::geom::ScreenPoint;
use crate::path::PathRef;
use crate::transform::Viewport;

use super::{Color, LineStyle, RenderCommand, RenderList, TextAlign, TextStyle};

/// Sums shorter than this on both axes count as a straight angle.
const COLLINEAR_EPSILON: f32 = 1e-3;

/// Direction used when a vertex has no neighbors.
const UP: ScreenPoint = ScreenPoint { x: 0.0, y: -1.0 };

/// Vertex marker and index label styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Distance in pixels from the vertex to the label anchor.
    pub offset: f32,
    /// Label font size in pixels.
    pub size: f32,
    /// Marker radius in excess of half the stroke width.
    pub marker_padding: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            offset: 15.0,
            size: 16.0,
            marker_padding: 2.0,
        }
    }
}

/// Placement of one vertex index label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexLabel {
    /// Zero-based vertex index.
    pub index: usize,
    /// Vertex position on screen.
    pub vertex: ScreenPoint,
    /// Unit direction from the vertex to the label.
    pub direction: ScreenPoint,
    /// Label anchor (text center).
    pub anchor: ScreenPoint,
}

impl VertexLabel {
    /// Text shown for the vertex (1-based).
    pub fn text(&self) -> String {
        (self.index + 1).to_string()
    }
}

/// Outward label direction for vertex `index` of a projected path.
///
/// Neighbors wrap around for closed paths. Always returns a unit vector:
/// straight up when the vertex has no neighbors or every neighbor sits on
/// the vertex itself.
pub fn label_direction(points: &[ScreenPoint], index: usize, closed: bool) -> ScreenPoint {
    let len = points.len();
    if len < 2 || index >= len {
        return UP;
    }
    let (prev, next) = if closed {
        (Some((index + len - 1) % len), Some((index + 1) % len))
    } else {
        (
            index.checked_sub(1),
            (index + 1 < len).then_some(index + 1),
        )
    };

    let curr = points[index];
    let toward = |neighbor: usize| curr.to(points[neighbor]).normalized();

    let direction = match (prev.map(toward), next.map(toward)) {
        (Some(prev), Some(next)) => {
            let sum = ScreenPoint::new(prev.x + next.x, prev.y + next.y);
            if sum.x.abs() < COLLINEAR_EPSILON && sum.y.abs() < COLLINEAR_EPSILON {
                ScreenPoint::new(-prev.y, prev.x)
            } else {
                -sum.normalized()
            }
        }
        (Some(prev), None) => -prev,
        (None, Some(next)) => -next,
        (None, None) => UP,
    };
    if direction.length() == 0.0 {
        UP
    } else {
        direction
    }
}

/// Label placements for every vertex of `path`.
pub fn vertex_labels(path: PathRef<'_>, viewport: &Viewport, offset: f32) -> Vec<VertexLabel> {
    let screen: Vec<ScreenPoint> = path
        .points
        .iter()
        .map(|point| viewport.to_screen(*point))
        .collect();
    (0..screen.len())
        .map(|index| {
            let direction = label_direction(&screen, index, path.closed);
            VertexLabel {
                index,
                vertex: screen[index],
                direction,
                anchor: screen[index].offset(direction, offset),
            }
        })
        .collect()
}

/// Stroke `path` and, with `labels`, mark and number each vertex.
///
/// Vertex markers are drawn only together with labels; `None` strokes the
/// path alone. Paths with fewer than two points produce no commands.
pub fn render_path(
    render: &mut RenderList,
    path: PathRef<'_>,
    style: LineStyle,
    viewport: &Viewport,
    labels: Option<&LabelStyle>,
) {
    if path.points.len() < 2 {
        return;
    }

    render.push(RenderCommand::Polyline {
        points: path
            .points
            .iter()
            .map(|point| viewport.to_screen(*point))
            .collect(),
        closed: path.closed,
        style,
    });

    let Some(label_style) = labels else {
        return;
    };
    let radius = style.width / 2.0 + label_style.marker_padding;
    let text_style = TextStyle {
        color: style.color,
        size: label_style.size,
        align: TextAlign::Center,
    };
    for label in vertex_labels(path, viewport, label_style.offset) {
        render.push(marker(label.vertex, radius, style.color));
        render.push(RenderCommand::Text {
            position: label.anchor,
            text: label.text(),
            style: text_style,
        });
    }
}

fn marker(center: ScreenPoint, radius: f32, color: Color) -> RenderCommand {
    RenderCommand::Circle {
        center,
        radius,
        color,
    }
}
