//! Plot state and frame assembly.
//!
//! [`render_scene`] is the stateless pipeline: frame the visible paths,
//! draw the grid, then draw each visible path. [`PathPlot`] owns the path
//! collection and the view flags, and tracks whether a redraw is due.

use crate::config::PlotConfig;
use crate::geom::{Point, ScreenPoint, ScreenRect};
use crate::grid::{GridTicks, build_grid};
use crate::input::{InputError, RejectedPath, parse_paths};
use crate::interaction::{HoverResult, HoverTracker, hit_test};
use crate::path::{PathCollection, PathEntry, PathId};
use crate::render::{
    Color, LineStyle, RectStyle, RenderCommand, RenderList, TextAlign, TextStyle, render_path,
};
use crate::style::Theme;
use crate::transform::{Viewport, compute_bounding_box};

/// A fully assembled frame.
#[derive(Debug, Clone)]
pub struct PlotFrame {
    /// Drawing commands, starting with a clear.
    pub render: RenderList,
    /// Viewport the frame was drawn with.
    pub viewport: Viewport,
    /// Grid ticks drawn in the frame.
    pub ticks: GridTicks,
}

/// Fit the visible entries into `canvas` and draw grid and paths.
pub fn render_scene(
    canvas: ScreenRect,
    entries: &[PathEntry],
    show_labels: bool,
    theme: &Theme,
    config: &PlotConfig,
) -> PlotFrame {
    let viewport = fit_entries(canvas, entries, config);
    let mut render = RenderList::new();
    render.push(RenderCommand::Clear(theme.background));
    let ticks = build_grid(&mut render, &viewport, canvas, &config.grid, theme);

    let labels = show_labels.then_some(&config.labels);
    for entry in entries.iter().filter(|entry| entry.is_visible()) {
        let style = LineStyle {
            color: entry.color(),
            width: entry.thickness(),
        };
        render_path(&mut render, entry.as_path(), style, &viewport, labels);
    }

    PlotFrame {
        render,
        viewport,
        ticks,
    }
}

fn fit_entries(canvas: ScreenRect, entries: &[PathEntry], config: &PlotConfig) -> Viewport {
    let bbox = compute_bounding_box(entries, true);
    Viewport::fit(bbox, canvas.width(), canvas.height(), config.canvas_padding)
}

/// Main plot state: paths, canvas size, label flag and hover.
///
/// Every mutation that changes what is on screen marks a redraw as pending;
/// [`PathPlot::take_redraw`] consumes it. Hover movement only marks a
/// redraw when the hovered vertex changes.
#[derive(Debug, Clone)]
pub struct PathPlot {
    theme: Theme,
    config: PlotConfig,
    paths: PathCollection,
    canvas: ScreenRect,
    show_labels: bool,
    viewport: Viewport,
    hover: HoverTracker,
    needs_redraw: bool,
}

impl PathPlot {
    /// Create a plot with default configuration and an empty canvas.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> PathPlotBuilder {
        PathPlotBuilder::default()
    }

    /// Access the current theme.
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Access the configuration.
    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// Access the path collection.
    pub fn paths(&self) -> &PathCollection {
        &self.paths
    }

    /// Canvas bounds in pixels.
    pub fn canvas(&self) -> ScreenRect {
        self.canvas
    }

    /// Whether vertex labels are drawn.
    pub fn show_labels(&self) -> bool {
        self.show_labels
    }

    /// Viewport fitted to the visible paths and current canvas.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Currently hovered vertex.
    pub fn hovered(&self) -> Option<HoverResult> {
        self.hover.current()
    }

    /// Parse `text` and replace all paths with the valid entries.
    ///
    /// On a batch-level error the current paths are kept. Otherwise the
    /// rejected entries are returned.
    pub fn load_str(&mut self, text: &str) -> Result<Vec<RejectedPath>, InputError> {
        let parsed = parse_paths(text)?;
        self.replace_paths(parsed.paths);
        Ok(parsed.rejected)
    }

    /// Replace all paths with a new batch.
    pub fn replace_paths(&mut self, batch: impl IntoIterator<Item = Vec<Point>>) {
        self.paths
            .replace(batch, &self.theme.palette, self.config.default_thickness);
        self.hover.clear();
        self.invalidate();
    }

    /// Show or hide a path. Returns false if the id is unknown.
    pub fn set_visible(&mut self, id: PathId, visible: bool) -> bool {
        if !self.paths.set_visible(id, visible) {
            return false;
        }
        if !visible && self.hover.current().is_some_and(|hover| hover.path_id == id) {
            self.hover.clear();
        }
        self.invalidate();
        true
    }

    /// Open or close a path. Returns false if the id is unknown.
    pub fn set_closed(&mut self, id: PathId, closed: bool) -> bool {
        if !self.paths.set_closed(id, closed) {
            return false;
        }
        self.invalidate();
        true
    }

    /// Toggle vertex labels.
    pub fn set_show_labels(&mut self, show: bool) {
        self.show_labels = show;
        self.needs_redraw = true;
    }

    /// Resize the canvas.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.canvas = ScreenRect::from_size(width.max(0.0), height.max(0.0));
        self.invalidate();
    }

    /// Update hover state for a cursor position in canvas pixels.
    ///
    /// Returns true when the hovered vertex changed.
    pub fn hover(&mut self, cursor: ScreenPoint) -> bool {
        let hit = if self.canvas.is_valid() && self.canvas.contains(cursor) {
            hit_test(
                cursor,
                self.paths.entries(),
                &self.viewport,
                self.config.hover_threshold_px,
            )
        } else {
            None
        };
        let changed = self.hover.update(hit);
        self.needs_redraw |= changed;
        changed
    }

    /// Clear hover state when the cursor leaves the canvas.
    pub fn hover_exit(&mut self) -> bool {
        let changed = self.hover.clear();
        self.needs_redraw |= changed;
        changed
    }

    /// Whether a redraw is pending, without consuming it.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Consume the pending redraw flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Assemble the current frame.
    pub fn render(&self) -> PlotFrame {
        let mut frame = render_scene(
            self.canvas,
            self.paths.entries(),
            self.show_labels,
            &self.theme,
            &self.config,
        );
        if self.config.show_hover_readout {
            self.build_hover(&mut frame.render, &frame.viewport);
        }
        frame
    }

    fn build_hover(&self, render: &mut RenderList, viewport: &Viewport) {
        let Some(hover) = self.hover.current() else {
            return;
        };
        let Some(entry) = self.paths.get(hover.path_id).filter(|entry| entry.is_visible()) else {
            return;
        };

        let center = viewport.to_screen(Point::new(hover.x, hover.y));
        let highlight = self.theme.hover;
        render.push(RenderCommand::Circle {
            center,
            radius: entry.thickness() / 2.0 + self.config.labels.marker_padding + 4.0,
            color: Color { a: 0.35, ..highlight },
        });

        let text = hover.to_string();
        let size = self.config.readout_size;
        let padding = 6.0;
        // No text shaping here; approximate the glyph advance.
        let width = text.chars().count() as f32 * size * 0.6 + padding * 2.0;
        let height = size + padding * 2.0;
        let origin = ScreenPoint::new(padding, padding);
        render.push(RenderCommand::Rect {
            rect: ScreenRect::new(
                origin,
                ScreenPoint::new(origin.x + width, origin.y + height),
            ),
            style: RectStyle {
                fill: self.theme.readout_background,
                stroke: highlight,
                stroke_width: 1.0,
            },
        });
        render.push(RenderCommand::Text {
            position: ScreenPoint::new(origin.x + padding, origin.y + height / 2.0),
            text,
            style: TextStyle {
                color: self.theme.text,
                size,
                align: TextAlign::Left,
            },
        });
    }

    fn invalidate(&mut self) {
        self.viewport = fit_entries(self.canvas, self.paths.entries(), &self.config);
        self.needs_redraw = true;
    }
}

impl Default for PathPlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for configuring a plot before construction.
#[derive(Debug, Default)]
pub struct PathPlotBuilder {
    theme: Theme,
    config: PlotConfig,
    size: (f32, f32),
    show_labels: bool,
}

impl PathPlotBuilder {
    /// Set the theme used by the plot.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the plot configuration.
    pub fn config(mut self, config: PlotConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial canvas size in pixels.
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.size = (width, height);
        self
    }

    /// Draw vertex labels from the start.
    pub fn show_labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Build the plot.
    pub fn build(self) -> PathPlot {
        let mut plot = PathPlot {
            theme: self.theme,
            config: self.config,
            paths: PathCollection::new(),
            canvas: ScreenRect::from_size(0.0, 0.0),
            show_labels: self.show_labels,
            viewport: Viewport::default(),
            hover: HoverTracker::new(),
            needs_redraw: false,
        };
        plot.resize(self.size.0, self.size.1);
        plot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::SegmentRecorder;

    const SAMPLE: &str = r#"[[{"x":10,"y":10},{"x":20,"y":30},{"x":30,"y":10}],
        [{"x":-5,"y":0},{"x":5,"y":-5},{"x":0,"y":-10}]]"#;

    fn sample_plot() -> PathPlot {
        let mut plot = PathPlot::builder().size(700.0, 500.0).build();
        let rejected = plot.load_str(SAMPLE).expect("sample parses");
        assert!(rejected.is_empty());
        plot.take_redraw();
        plot
    }

    fn count<F: Fn(&RenderCommand) -> bool>(frame: &PlotFrame, pred: F) -> usize {
        frame.render.commands().iter().filter(|c| pred(*c)).count()
    }

    #[test]
    fn frame_starts_with_clear_and_draws_visible_paths() {
        let plot = sample_plot();
        let frame = plot.render();
        assert_eq!(
            frame.render.commands().first(),
            Some(&RenderCommand::Clear(plot.theme().background))
        );
        assert_eq!(
            count(&frame, |c| matches!(c, RenderCommand::Polyline { .. })),
            2
        );
        assert_eq!(count(&frame, |c| matches!(c, RenderCommand::Circle { .. })), 0);
    }

    #[test]
    fn labels_add_markers_and_numbers() {
        let mut plot = sample_plot();
        plot.set_show_labels(true);
        assert!(plot.take_redraw());
        let frame = plot.render();
        assert_eq!(count(&frame, |c| matches!(c, RenderCommand::Circle { .. })), 6);

        let mut surface = SegmentRecorder::default();
        frame.render.replay(&mut surface);
        assert_eq!(surface.circles, 6);
        assert!(surface.texts.iter().filter(|text| *text == "3").count() >= 2);
    }

    #[test]
    fn hiding_a_path_refits_and_schedules_one_redraw() {
        let mut plot = sample_plot();
        let before = plot.viewport();
        let id = plot.paths().entries()[1].id();
        assert!(plot.set_visible(id, false));
        assert!(plot.take_redraw());
        assert!(!plot.take_redraw());
        assert_ne!(plot.viewport(), before);
        let frame = plot.render();
        assert_eq!(
            count(&frame, |c| matches!(c, RenderCommand::Polyline { .. })),
            1
        );
    }

    #[test]
    fn unknown_ids_do_not_schedule_redraw() {
        let mut plot = sample_plot();
        assert!(!plot.set_closed(PathId::new(42), true));
        assert!(!plot.take_redraw());
    }

    #[test]
    fn closing_a_path_adds_one_stroked_segment() {
        let mut plot = sample_plot();
        let mut open = SegmentRecorder::default();
        plot.render().render.replay(&mut open);

        let id = plot.paths().entries()[0].id();
        plot.set_closed(id, true);
        let mut closed = SegmentRecorder::default();
        plot.render().render.replay(&mut closed);

        assert_eq!(closed.stroked.len(), open.stroked.len() + 1);
    }

    #[test]
    fn hover_redraws_only_on_target_change() {
        let mut plot = sample_plot();
        let vertex = plot.viewport().to_screen(Point::new(20.0, 30.0));

        assert!(plot.hover(vertex));
        assert!(plot.take_redraw());
        let hovered = plot.hovered().expect("vertex hovered");
        assert_eq!(hovered.index, 1);
        assert_eq!(hovered.path_id, plot.paths().entries()[0].id());

        assert!(!plot.hover(ScreenPoint::new(vertex.x + 1.0, vertex.y)));
        assert!(!plot.take_redraw());

        assert!(plot.hover(ScreenPoint::new(1.0, 1.0)));
        assert!(plot.hovered().is_none());
        assert!(plot.take_redraw());
    }

    #[test]
    fn hover_readout_is_drawn_for_hovered_vertex() {
        let mut plot = sample_plot();
        let vertex = plot.viewport().to_screen(Point::new(-5.0, 0.0));
        plot.hover(vertex);
        let frame = plot.render();
        let readout = frame.render.commands().iter().any(|command| {
            matches!(command, RenderCommand::Text { text, .. } if text.contains("point 1"))
        });
        assert!(readout);
    }

    #[test]
    fn leaving_the_canvas_clears_hover() {
        let mut plot = sample_plot();
        let vertex = plot.viewport().to_screen(Point::new(30.0, 10.0));
        plot.hover(vertex);
        plot.take_redraw();
        assert!(plot.hover_exit());
        assert!(plot.take_redraw());
        assert!(!plot.hover_exit());

        plot.hover(vertex);
        assert!(plot.hover(ScreenPoint::new(-5.0, vertex.y)));
        assert!(plot.hovered().is_none());
    }

    #[test]
    fn empty_canvas_never_hovers() {
        let mut plot = PathPlot::new();
        plot.load_str(SAMPLE).expect("sample parses");
        plot.take_redraw();
        let vertex = plot.viewport().to_screen(Point::new(0.0, 0.0));
        assert!(!plot.hover(vertex));
        assert!(!plot.hover(ScreenPoint::default()));
        assert!(plot.hovered().is_none());
    }

    #[test]
    fn hiding_hovered_path_clears_hover() {
        let mut plot = sample_plot();
        let vertex = plot.viewport().to_screen(Point::new(10.0, 10.0));
        plot.hover(vertex);
        let id = plot.hovered().expect("hovered").path_id;
        plot.set_visible(id, false);
        assert!(plot.hovered().is_none());
    }

    #[test]
    fn failed_parse_keeps_existing_paths() {
        let mut plot = sample_plot();
        assert!(plot.load_str("not json").is_err());
        assert_eq!(plot.paths().len(), 2);
        assert!(!plot.take_redraw());
    }

    #[test]
    fn empty_scene_uses_default_box() {
        let frame = render_scene(
            ScreenRect::from_size(100.0, 100.0),
            &[],
            true,
            &Theme::light(),
            &PlotConfig::default(),
        );
        // Default box spans 2 units; 80px of usable canvas.
        assert!((frame.viewport.scale() - 40.0).abs() < 1e-9);
        assert_eq!(frame.viewport.origin_x(), 50.0);
    }
}
