//! Path entries and the owned path collection.

use std::fmt;

use crate::geom::Point;
use crate::render::Color;
use crate::style::ColorCycle;

/// Opaque identifier for a loaded path.
///
/// Ids are allocated by a [`PathCollection`] and never reused, so an id held
/// across a reparse will not match any entry of the new batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathId(u64);

impl PathId {
    /// Wrap a raw id.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path-{}", self.0)
    }
}

/// Borrowed view of a path: ordered points plus the closed flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRef<'a> {
    /// Vertices in drawing order.
    pub points: &'a [Point],
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

impl<'a> PathRef<'a> {
    /// Borrow an open path.
    pub fn open(points: &'a [Point]) -> Self {
        Self {
            points,
            closed: false,
        }
    }

    /// Borrow a closed path.
    pub fn closed(points: &'a [Point]) -> Self {
        Self {
            points,
            closed: true,
        }
    }

    /// Number of segments a stroke of this path contains.
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.closed => n,
            n => n - 1,
        }
    }
}

/// A loaded path together with its display flags.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    id: PathId,
    points: Vec<Point>,
    color: Color,
    thickness: f32,
    visible: bool,
    closed: bool,
}

impl PathEntry {
    /// Default stroke width in pixels.
    pub const DEFAULT_THICKNESS: f32 = 3.0;

    /// Create a visible, open entry.
    pub fn new(id: PathId, points: Vec<Point>, color: Color) -> Self {
        Self {
            id,
            points,
            color,
            thickness: Self::DEFAULT_THICKNESS,
            visible: true,
            closed: false,
        }
    }

    /// Set the stroke width. Non-positive widths keep the default.
    pub fn with_thickness(mut self, thickness: f32) -> Self {
        if thickness > 0.0 && thickness.is_finite() {
            self.thickness = thickness;
        }
        self
    }

    /// Set the closed flag.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = closed;
        self
    }

    /// Set the visibility flag.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Access the path identifier.
    pub fn id(&self) -> PathId {
        self.id
    }

    /// Access the vertices.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Access the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Access the stroke width in pixels.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Check if the path is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the path is closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Borrow as a [`PathRef`].
    pub fn as_path(&self) -> PathRef<'_> {
        PathRef {
            points: &self.points,
            closed: self.closed,
        }
    }
}

/// Ordered, wholesale-replaceable set of path entries.
///
/// The collection is created empty and replaced as a whole on every reparse.
/// Between reparses only the per-entry visibility and closed flags change.
#[derive(Debug, Clone, Default)]
pub struct PathCollection {
    entries: Vec<PathEntry>,
    next_id: u64,
}

impl PathCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every entry with a new batch.
    ///
    /// Ids continue from the previous batch; colors restart at the first
    /// palette entry.
    pub fn replace(
        &mut self,
        batch: impl IntoIterator<Item = Vec<Point>>,
        palette: &[Color],
        thickness: f32,
    ) -> &[PathEntry] {
        let mut colors = ColorCycle::new(palette);
        self.entries.clear();
        for points in batch {
            let id = PathId(self.next_id);
            self.next_id += 1;
            self.entries
                .push(PathEntry::new(id, points, colors.next_color()).with_thickness(thickness));
        }
        tracing::debug!(count = self.entries.len(), "replaced path batch");
        &self.entries
    }

    /// Access all entries in load order.
    pub fn entries(&self) -> &[PathEntry] {
        &self.entries
    }

    /// Find an entry by id.
    pub fn get(&self, id: PathId) -> Option<&PathEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Set the visibility flag. Returns false if the id is unknown.
    pub fn set_visible(&mut self, id: PathId, visible: bool) -> bool {
        self.entry_mut(id)
            .map(|entry| entry.visible = visible)
            .is_some()
    }

    /// Set the closed flag. Returns false if the id is unknown.
    pub fn set_closed(&mut self, id: PathId, closed: bool) -> bool {
        self.entry_mut(id).map(|entry| entry.closed = closed).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, id: PathId) -> Option<&mut PathEntry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }
}
