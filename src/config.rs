//! Plot configuration.

use crate::grid::GridStyle;
use crate::interaction::DEFAULT_HOVER_THRESHOLD_PX;
use crate::path::PathEntry;
use crate::render::LabelStyle;
use crate::transform::DEFAULT_CANVAS_PADDING;

/// Layout and interaction settings shared by every frame.
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Fraction of each canvas side left empty around the framed paths.
    pub canvas_padding: f64,
    /// Pixel radius for hover hit testing.
    pub hover_threshold_px: f32,
    /// Stroke width given to newly loaded paths.
    pub default_thickness: f32,
    /// Highlight the hovered vertex and show its coordinates.
    pub show_hover_readout: bool,
    /// Hover readout font size in pixels.
    pub readout_size: f32,
    /// Grid spacing and label placement.
    pub grid: GridStyle,
    /// Vertex marker and index label styling.
    pub labels: LabelStyle,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            canvas_padding: DEFAULT_CANVAS_PADDING,
            hover_threshold_px: DEFAULT_HOVER_THRESHOLD_PX,
            default_thickness: PathEntry::DEFAULT_THICKNESS,
            show_hover_readout: true,
            readout_size: 12.0,
            grid: GridStyle::default(),
            labels: LabelStyle::default(),
        }
    }
}
