//! GPUI integration for gpui_pathplot.
//!
//! This module provides a GPUI view that paints a [`PathPlot`](crate::plot::PathPlot)
//! and routes pointer movement through the hover pipeline.

mod paint;
mod view;

pub use view::{GpuiPathView, PathPlotHandle};
