use gpui::{
    App, BorderStyle, Bounds, Corners, Edges, PathBuilder, Pixels, TextRun, Window, font, point,
    px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::plot::PlotFrame;
use crate::render::{Color, DrawSurface, LineStyle, RectStyle, TextAlign, TextStyle};

/// Paint a frame whose coordinates are relative to the canvas origin.
pub(crate) fn paint_frame(
    frame: &PlotFrame,
    bounds: Bounds<Pixels>,
    window: &mut Window,
    cx: &mut App,
) {
    let mut surface = GpuiSurface {
        window,
        cx,
        bounds,
        subpaths: Vec::new(),
    };
    frame.render.replay(&mut surface);
}

struct GpuiSurface<'a> {
    window: &'a mut Window,
    cx: &'a mut App,
    bounds: Bounds<Pixels>,
    subpaths: Vec<Vec<ScreenPoint>>,
}

impl GpuiSurface<'_> {
    fn to_window(&self, pt: ScreenPoint) -> gpui::Point<Pixels> {
        point(
            self.bounds.origin.x + px(pt.x),
            self.bounds.origin.y + px(pt.y),
        )
    }

    fn to_bounds(&self, rect: ScreenRect) -> Bounds<Pixels> {
        Bounds::from_corners(self.to_window(rect.min), self.to_window(rect.max))
    }
}

impl DrawSurface for GpuiSurface<'_> {
    fn clear(&mut self, color: Color) {
        self.window.paint_quad(quad(
            self.bounds,
            Corners::all(px(0.0)),
            to_rgba(color),
            Edges::all(px(0.0)),
            to_rgba(color),
            BorderStyle::default(),
        ));
    }

    fn move_to(&mut self, point: ScreenPoint) {
        self.subpaths.push(vec![point]);
    }

    fn line_to(&mut self, point: ScreenPoint) {
        match self.subpaths.last_mut() {
            Some(subpath) => subpath.push(point),
            None => self.subpaths.push(vec![point]),
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.subpaths.last_mut() {
            if let Some(first) = subpath.first().copied() {
                subpath.push(first);
            }
        }
    }

    fn stroke(&mut self, style: LineStyle) {
        let subpaths = std::mem::take(&mut self.subpaths);
        if subpaths.iter().all(|subpath| subpath.len() < 2) {
            return;
        }
        let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
        for subpath in &subpaths {
            let Some((first, rest)) = subpath.split_first() else {
                continue;
            };
            builder.move_to(self.to_window(*first));
            for pt in rest {
                builder.line_to(self.to_window(*pt));
            }
        }
        if let Ok(path) = builder.build() {
            self.window.paint_path(path, to_rgba(style.color));
        }
    }

    fn fill_circle(&mut self, center: ScreenPoint, radius: f32, color: Color) {
        let bounds = self.to_bounds(ScreenRect::new(
            ScreenPoint::new(center.x - radius, center.y - radius),
            ScreenPoint::new(center.x + radius, center.y + radius),
        ));
        self.window.paint_quad(quad(
            bounds,
            Corners::all(px(radius)),
            to_rgba(color),
            Edges::all(px(0.0)),
            to_rgba(color),
            BorderStyle::default(),
        ));
    }

    fn fill_rect(&mut self, rect: ScreenRect, style: RectStyle) {
        let bounds = self.to_bounds(rect);
        self.window.paint_quad(quad(
            bounds,
            Corners::all(px(0.0)),
            to_rgba(style.fill),
            Edges::all(px(style.stroke_width)),
            to_rgba(style.stroke),
            BorderStyle::default(),
        ));
    }

    fn fill_text(&mut self, text: &str, position: ScreenPoint, style: &TextStyle) {
        if text.is_empty() {
            return;
        }
        let run = TextRun {
            len: text.len(),
            font: font(".SystemUIFont"),
            color: to_hsla(style.color),
            background_color: None,
            underline: None,
            strikethrough: None,
        };
        let shaped = self.window.text_system().shape_line(
            text.to_string().into(),
            px(style.size),
            &[run],
            None,
        );
        let width = f32::from(shaped.width);
        let line_height = shaped.ascent + shaped.descent;
        let x = match style.align {
            TextAlign::Left => position.x,
            TextAlign::Center => position.x - width / 2.0,
            TextAlign::Right => position.x - width,
        };
        let y = position.y - f32::from(line_height) / 2.0;
        let origin = self.to_window(ScreenPoint::new(x, y));
        let _ = shaped.paint(origin, line_height, self.window, self.cx);
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}
