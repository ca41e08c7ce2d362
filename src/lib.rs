//! gpui_pathplot draws 2D polylines auto-framed on a Cartesian grid.
//!
//! Paths are parsed from JSON, fitted into the canvas with a uniform scale,
//! and drawn over an adaptive grid with optional vertex labels that point
//! away from the path. Rendering produces backend-agnostic
//! [`RenderCommand`]s; the optional `gpui` feature paints them in a GPUI view.

#![forbid(unsafe_code)]

pub mod config;
pub mod geom;
pub mod grid;
pub mod input;
pub mod interaction;
pub mod path;
pub mod plot;
pub mod render;
pub mod style;
pub mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use config::PlotConfig;
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use grid::{GridStyle, GridTicks, Tick, TickFormatter, build_grid, choose_tick_interval};
pub use input::{InputError, ParsedPaths, RejectedPath, parse_paths};
pub use interaction::{HoverResult, HoverTracker, hit_test};
pub use path::{PathCollection, PathEntry, PathId, PathRef};
pub use plot::{PathPlot, PathPlotBuilder, PlotFrame, render_scene};
pub use render::{
    Color, DrawSurface, LabelStyle, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList,
    TextAlign, TextStyle, VertexLabel, label_direction, render_path, vertex_labels,
};
pub use style::Theme;
pub use transform::{Viewport, compute_bounding_box};
pub use view::{BoundingBox, Range};

#[cfg(feature = "gpui")]
pub use gpui_backend::{GpuiPathView, PathPlotHandle};
