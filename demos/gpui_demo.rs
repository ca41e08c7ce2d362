use gpui::{AppContext, Application, Bounds, WindowBounds, WindowOptions, px, size};
use tracing_subscriber::EnvFilter;

use gpui_pathplot::{GpuiPathView, PathPlot, Theme};

const PATHS: &str = r#"[
    [{"x": 10, "y": 10}, {"x": 20, "y": 30}, {"x": 30, "y": 10}],
    [{"x": -5, "y": 0}, {"x": 5, "y": -5}, {"x": 0, "y": -10}]
]"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(700.0), px(500.0)),
                cx,
            ))),
            ..Default::default()
        };

        let theme = if std::env::args().any(|arg| arg == "--dark") {
            Theme::dark()
        } else {
            Theme::light()
        };

        cx.open_window(options, move |_window, cx| {
            let mut plot = PathPlot::builder()
                .theme(theme)
                .size(700.0, 500.0)
                .show_labels(true)
                .build();
            for rejected in plot.load_str(PATHS).unwrap() {
                eprintln!("skipped {rejected}");
            }

            let view = GpuiPathView::new(plot);
            let handle = view.plot_handle();
            handle.write(|plot| {
                let second = plot.paths().entries()[1].id();
                plot.set_closed(second, true);
            });
            cx.new(|_| view)
        })
        .unwrap();
    });
}
