use std::sync::{Arc, RwLock};

use gpui::prelude::*;
use gpui::{MouseMoveEvent, Pixels, Point, Window, canvas, div};

use crate::geom::ScreenPoint;
use crate::plot::PathPlot;

use super::paint::{paint_frame, to_hsla};

/// A GPUI view that paints a [`PathPlot`] and tracks the hovered vertex.
///
/// Pointer moves run a hit test on every event but only repaint when the
/// hovered vertex changes.
#[derive(Clone)]
pub struct GpuiPathView {
    plot: Arc<RwLock<PathPlot>>,
    canvas_origin: Arc<RwLock<ScreenPoint>>,
}

impl GpuiPathView {
    /// Create a new GPUI view for the given plot.
    pub fn new(plot: PathPlot) -> Self {
        Self {
            plot: Arc::new(RwLock::new(plot)),
            canvas_origin: Arc::new(RwLock::new(ScreenPoint::default())),
        }
    }

    /// Get a handle for reading or mutating the underlying plot.
    pub fn plot_handle(&self) -> PathPlotHandle {
        PathPlotHandle {
            plot: Arc::clone(&self.plot),
        }
    }

    /// Mutate the plot and repaint if the change needs it.
    pub fn update_plot<R>(
        &mut self,
        cx: &mut Context<Self>,
        f: impl FnOnce(&mut PathPlot) -> R,
    ) -> R {
        let mut plot = self.plot.write().expect("plot lock");
        let result = f(&mut plot);
        if plot.needs_redraw() {
            cx.notify();
        }
        result
    }

    fn on_mouse_move(&mut self, ev: &MouseMoveEvent, cx: &mut Context<Self>) {
        let origin = *self.canvas_origin.read().expect("canvas origin lock");
        let pos = screen_point(ev.position);
        let local = ScreenPoint::new(pos.x - origin.x, pos.y - origin.y);
        let mut plot = self.plot.write().expect("plot lock");
        if plot.hover(local) {
            cx.notify();
        }
    }
}

impl Render for GpuiPathView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let canvas_origin = Arc::clone(&self.canvas_origin);
        let background = plot.read().expect("plot lock").theme().background;

        div()
            .size_full()
            .bg(to_hsla(background))
            .child(
                canvas(
                    move |bounds, _, _| {
                        *canvas_origin.write().expect("canvas origin lock") =
                            screen_point(bounds.origin);
                        let mut plot = plot.write().expect("plot lock");
                        let width = f32::from(bounds.size.width);
                        let height = f32::from(bounds.size.height);
                        let canvas = plot.canvas();
                        if canvas.width() != width || canvas.height() != height {
                            plot.resize(width, height);
                        }
                        plot.take_redraw();
                        plot.render()
                    },
                    move |bounds, frame, window, cx| {
                        paint_frame(&frame, bounds, window, cx);
                    },
                )
                .size_full(),
            )
            .on_mouse_move(cx.listener(|this, ev, _, cx| {
                this.on_mouse_move(ev, cx);
            }))
    }
}

/// A handle for mutating a [`PathPlot`] held inside a `GpuiPathView`.
///
/// Changes made through the handle are painted on the view's next frame;
/// use [`GpuiPathView::update_plot`] to repaint immediately.
#[derive(Clone)]
pub struct PathPlotHandle {
    plot: Arc<RwLock<PathPlot>>,
}

impl PathPlotHandle {
    /// Read the plot state.
    pub fn read<R>(&self, f: impl FnOnce(&PathPlot) -> R) -> R {
        let plot = self.plot.read().expect("plot lock");
        f(&plot)
    }

    /// Mutate the plot state.
    pub fn write<R>(&self, f: impl FnOnce(&mut PathPlot) -> R) -> R {
        let mut plot = self.plot.write().expect("plot lock");
        f(&mut plot)
    }
}

fn screen_point(point: Point<Pixels>) -> ScreenPoint {
    ScreenPoint::new(f32::from(point.x), f32::from(point.y))
}
