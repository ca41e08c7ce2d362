//! Themes and the path color palette.

use crate::render::Color;

/// Visual theme for plots.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Canvas clear color.
    pub background: Color,
    /// Regular grid lines.
    pub grid: Color,
    /// Grid lines through the data origin.
    pub axis: Color,
    /// Grid label text.
    pub text: Color,
    /// Ring drawn around the hovered vertex.
    pub hover: Color,
    /// Hover readout background.
    pub readout_background: Color,
    /// Colors assigned to paths in load order.
    pub palette: Vec<Color>,
}

impl Theme {
    /// Light theme matching a plain white canvas.
    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            grid: Color::rgb(0xe0e0e0),
            axis: Color::rgb(0x666666),
            text: Color::rgb(0x333333),
            hover: Color::rgb(0x1890ff),
            readout_background: Color::rgb(0xe6f7ff),
            palette: default_palette(),
        }
    }

    /// Dark theme.
    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x1e1e1e),
            grid: Color::rgb(0x333333),
            axis: Color::rgb(0x888888),
            text: Color::rgb(0xcccccc),
            hover: Color::rgb(0x40a9ff),
            readout_background: Color::rgb(0x2a3a4a),
            palette: default_palette(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

fn default_palette() -> Vec<Color> {
    vec![
        Color::rgb(0x0000ff), // blue
        Color::rgb(0xff0000), // red
        Color::rgb(0x008000), // green
        Color::rgb(0x800080), // purple
        Color::rgb(0xffa500), // orange
        Color::rgb(0x008b8b), // darkcyan
        Color::rgb(0xff00ff), // magenta
        Color::rgb(0xa52a2a), // brown
    ]
}

/// Hands out palette colors in order, wrapping around.
#[derive(Debug, Clone)]
pub struct ColorCycle<'a> {
    palette: &'a [Color],
    next: usize,
}

impl<'a> ColorCycle<'a> {
    /// Start cycling at the first palette entry.
    pub fn new(palette: &'a [Color]) -> Self {
        Self { palette, next: 0 }
    }

    /// Next color; black when the palette is empty.
    pub fn next_color(&mut self) -> Color {
        if self.palette.is_empty() {
            return Color::BLACK;
        }
        let color = self.palette[self.next % self.palette.len()];
        self.next += 1;
        color
    }
}
