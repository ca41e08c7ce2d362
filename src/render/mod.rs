//! Rendering primitives and the drawing-surface abstraction.
//!
//! Renderers append [`RenderCommand`]s to a [`RenderList`]. A frame is always
//! complete: it starts with [`RenderCommand::Clear`] and redraws everything.
//! Backends implement [`DrawSurface`] and call [`RenderList::replay`].

mod path;

pub use path::{LabelStyle, VertexLabel, label_direction, render_path, vertex_labels};

use crate::geom::{ScreenPoint, ScreenRect};

/// RGBA color in linear space.
///
/// All components are expected to be in the 0.0..=1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` value.
    pub const fn rgb(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xff) as f32 / 255.0,
            ((hex >> 8) & 0xff) as f32 / 255.0,
            (hex & 0xff) as f32 / 255.0,
            1.0,
        )
    }

    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

/// Line stroke styling.
///
/// The width is expressed in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

/// Rectangle styling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectStyle {
    /// Fill color.
    pub fill: Color,
    /// Stroke color.
    pub stroke: Color,
    /// Stroke width.
    pub stroke_width: f32,
}

impl Default for RectStyle {
    fn default() -> Self {
        Self {
            fill: Color::new(0.0, 0.0, 0.0, 0.0),
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Horizontal text alignment relative to the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    #[default]
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Text styling.
///
/// Text is always vertically centered on its anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub size: f32,
    /// Horizontal alignment.
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            size: 12.0,
            align: TextAlign::Center,
        }
    }
}

/// A line segment in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    /// Segment start.
    pub start: ScreenPoint,
    /// Segment end.
    pub end: ScreenPoint,
}

impl LineSegment {
    /// Create a new line segment.
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        Self { start, end }
    }
}

/// A single drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Fill the whole canvas.
    Clear(Color),
    /// Stroke independent segments (grid lines).
    LineSegments {
        /// Segments to draw.
        segments: Vec<LineSegment>,
        /// Styling for the segments.
        style: LineStyle,
    },
    /// Stroke a connected polyline.
    Polyline {
        /// Vertices in order.
        points: Vec<ScreenPoint>,
        /// Connect the last vertex back to the first.
        closed: bool,
        /// Stroke styling.
        style: LineStyle,
    },
    /// Fill a circle.
    Circle {
        /// Circle center.
        center: ScreenPoint,
        /// Radius in pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Draw a rectangle.
    Rect {
        /// Rectangle bounds.
        rect: ScreenRect,
        /// Rectangle styling.
        style: RectStyle,
    },
    /// Draw text.
    Text {
        /// Text anchor.
        position: ScreenPoint,
        /// Text content.
        text: String,
        /// Text styling.
        style: TextStyle,
    },
}

impl RenderCommand {
    /// Number of straight segments this command strokes.
    pub fn segment_count(&self) -> usize {
        match self {
            Self::LineSegments { segments, .. } => segments.len(),
            Self::Polyline { points, closed, .. } => match points.len() {
                0 | 1 => 0,
                n if *closed => n,
                n => n - 1,
            },
            _ => 0,
        }
    }
}

/// Drawing capability a backend provides.
///
/// Mirrors an immediate-mode 2D context: a path is built with
/// `move_to`/`line_to` and finished with `stroke`.
pub trait DrawSurface {
    /// Fill the whole surface.
    fn clear(&mut self, color: Color);
    /// Start a new subpath.
    fn move_to(&mut self, point: ScreenPoint);
    /// Extend the current subpath.
    fn line_to(&mut self, point: ScreenPoint);
    /// Connect the current subpath back to its start.
    fn close_path(&mut self);
    /// Stroke and reset the current path.
    fn stroke(&mut self, style: LineStyle);
    /// Fill a circle.
    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color);
    /// Fill and outline a rectangle.
    fn fill_rect(&mut self, rect: ScreenRect, style: RectStyle);
    /// Draw text vertically centered on `position`.
    fn fill_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle);
}

/// Aggregated render commands for one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    /// Create an empty render list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Access all render commands.
    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Check whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drive a surface with every command in order.
    pub fn replay(&self, surface: &mut impl DrawSurface) {
        for command in &self.commands {
            match command {
                RenderCommand::Clear(color) => surface.clear(*color),
                RenderCommand::LineSegments { segments, style } => {
                    if segments.is_empty() {
                        continue;
                    }
                    for segment in segments {
                        surface.move_to(segment.start);
                        surface.line_to(segment.end);
                    }
                    surface.stroke(*style);
                }
                RenderCommand::Polyline {
                    points,
                    closed,
                    style,
                } => {
                    let Some((first, rest)) = points.split_first() else {
                        continue;
                    };
                    surface.move_to(*first);
                    for point in rest {
                        surface.line_to(*point);
                    }
                    if *closed {
                        surface.close_path();
                    }
                    surface.stroke(*style);
                }
                RenderCommand::Circle {
                    center,
                    radius,
                    color,
                } => surface.fill_circle(*center, *radius, *color),
                RenderCommand::Rect { rect, style } => surface.fill_rect(*rect, *style),
                RenderCommand::Text {
                    position,
                    text,
                    style,
                } => surface.fill_text(text, *position, style),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Surface that records the segments it strokes.
    #[derive(Default)]
    pub(crate) struct SegmentRecorder {
        pub(crate) stroked: Vec<LineSegment>,
        pub(crate) texts: Vec<String>,
        pub(crate) circles: usize,
        current: Vec<ScreenPoint>,
        subpath_start: Option<ScreenPoint>,
        pending: Vec<LineSegment>,
    }

    impl DrawSurface for SegmentRecorder {
        fn clear(&mut self, _color: Color) {}

        fn move_to(&mut self, point: ScreenPoint) {
            self.current.clear();
            self.current.push(point);
            self.subpath_start = Some(point);
        }

        fn line_to(&mut self, point: ScreenPoint) {
            if let Some(last) = self.current.last().copied() {
                self.pending.push(LineSegment::new(last, point));
            }
            self.current.push(point);
        }

        fn close_path(&mut self) {
            if let (Some(last), Some(start)) = (self.current.last().copied(), self.subpath_start) {
                self.pending.push(LineSegment::new(last, start));
            }
        }

        fn stroke(&mut self, _style: LineStyle) {
            self.stroked.append(&mut self.pending);
            self.current.clear();
            self.subpath_start = None;
        }

        fn fill_circle(&mut self, _center: ScreenPoint, _radius: f32, _color: Color) {
            self.circles += 1;
        }

        fn fill_rect(&mut self, _rect: ScreenRect, _style: RectStyle) {}

        fn fill_text(&mut self, text: &str, _position: ScreenPoint, _style: &TextStyle) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn rgb_hex_unpacks_channels() {
        let color = Color::rgb(0xff8000);
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn replay_closes_closed_polylines() {
        let points = vec![
            ScreenPoint::new(0.0, 0.0),
            ScreenPoint::new(10.0, 0.0),
            ScreenPoint::new(10.0, 10.0),
        ];
        let mut list = RenderList::new();
        list.push(RenderCommand::Polyline {
            points: points.clone(),
            closed: true,
            style: LineStyle::default(),
        });
        let mut surface = SegmentRecorder::default();
        list.replay(&mut surface);
        assert_eq!(surface.stroked.len(), 3);
        assert_eq!(
            surface.stroked[2],
            LineSegment::new(points[2], points[0])
        );
        assert_eq!(list.commands()[0].segment_count(), 3);
    }
}
