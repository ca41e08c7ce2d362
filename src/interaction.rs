//! Hover hit-testing against rendered path vertices.

use std::fmt;

use crate::geom::{ScreenPoint, distance_sq};
use crate::path::{PathEntry, PathId};
use crate::transform::Viewport;

/// Default hover radius in pixels.
pub const DEFAULT_HOVER_THRESHOLD_PX: f32 = 8.0;

/// The vertex under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverResult {
    /// Path containing the vertex.
    pub path_id: PathId,
    /// Zero-based vertex index.
    pub index: usize,
    /// Vertex X in data coordinates.
    pub x: f64,
    /// Vertex Y in data coordinates.
    pub y: f64,
}

impl HoverResult {
    /// Identity of the hovered vertex, ignoring its coordinates.
    pub fn target(&self) -> (PathId, usize) {
        (self.path_id, self.index)
    }
}

impl fmt::Display for HoverResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "path {} | point {} | (x: {}, y: {})",
            self.path_id.get(),
            self.index + 1,
            self.x,
            self.y
        )
    }
}

/// Find the vertex under `cursor`.
///
/// Entries are searched from last to first so the path drawn on top wins;
/// hidden entries are skipped. Within an entry vertices are checked in
/// order and the first one strictly closer than `threshold_px` is returned.
pub fn hit_test(
    cursor: ScreenPoint,
    entries: &[PathEntry],
    viewport: &Viewport,
    threshold_px: f32,
) -> Option<HoverResult> {
    let threshold_sq = threshold_px * threshold_px;
    entries
        .iter()
        .rev()
        .filter(|entry| entry.is_visible())
        .find_map(|entry| {
            entry
                .points()
                .iter()
                .enumerate()
                .find(|(_, point)| distance_sq(viewport.to_screen(**point), cursor) < threshold_sq)
                .map(|(index, point)| HoverResult {
                    path_id: entry.id(),
                    index,
                    x: point.x,
                    y: point.y,
                })
        })
}

/// Remembers the hovered vertex between pointer moves.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    current: Option<HoverResult>,
}

impl HoverTracker {
    /// Create a tracker with nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered vertex.
    pub fn current(&self) -> Option<HoverResult> {
        self.current
    }

    /// Record the latest hit-test result.
    ///
    /// Returns true when the hovered target changed (by path id and index),
    /// which is the only case that needs a redraw.
    pub fn update(&mut self, next: Option<HoverResult>) -> bool {
        let changed = self.current.map(|hover| hover.target()) != next.map(|hover| hover.target());
        self.current = next;
        if changed {
            tracing::trace!(hover = ?next.map(|hover| hover.target()), "hover target changed");
        }
        changed
    }

    /// Forget the hovered vertex. Returns true if one was hovered.
    pub fn clear(&mut self) -> bool {
        self.update(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Point;
    use crate::render::Color;

    fn entry(raw: u64, points: &[(f64, f64)]) -> PathEntry {
        PathEntry::new(
            PathId::new(raw),
            points.iter().map(|&(x, y)| Point::new(x, y)).collect(),
            Color::BLACK,
        )
    }

    #[test]
    fn exact_projection_hits_vertex() {
        let viewport = Viewport::new(40.0, 300.0, 7.5);
        let entries = [entry(0, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])];
        let cursor = viewport.to_screen(Point::new(10.0, 0.0));
        let hit = hit_test(cursor, &entries, &viewport, 8.0).expect("vertex under cursor");
        assert_eq!(hit.target(), (PathId::new(0), 1));
        assert_eq!((hit.x, hit.y), (10.0, 0.0));
    }

    #[test]
    fn far_cursor_misses() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        let entries = [entry(0, &[(0.0, 0.0)])];
        assert!(hit_test(ScreenPoint::new(100.0, 100.0), &entries, &viewport, 8.0).is_none());
    }

    #[test]
    fn threshold_is_strict() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        let entries = [entry(0, &[(0.0, 0.0)])];
        assert!(hit_test(ScreenPoint::new(8.0, 0.0), &entries, &viewport, 8.0).is_none());
        assert!(hit_test(ScreenPoint::new(7.9, 0.0), &entries, &viewport, 8.0).is_some());
    }

    #[test]
    fn later_entries_win_overlaps() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        let entries = [entry(0, &[(0.0, 0.0)]), entry(1, &[(1.0, 0.0)])];
        let hit = hit_test(ScreenPoint::new(0.0, 0.0), &entries, &viewport, 8.0).unwrap();
        assert_eq!(hit.path_id, PathId::new(1));
    }

    #[test]
    fn first_vertex_in_order_wins_not_nearest() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        let entries = [entry(0, &[(5.0, 0.0), (0.0, 0.0)])];
        let hit = hit_test(ScreenPoint::new(0.0, 0.0), &entries, &viewport, 8.0).unwrap();
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn hidden_entries_are_skipped() {
        let viewport = Viewport::new(0.0, 0.0, 1.0);
        let entries = [
            entry(0, &[(0.0, 0.0)]),
            entry(1, &[(0.0, 0.0)]).with_visible(false),
        ];
        let hit = hit_test(ScreenPoint::new(0.0, 0.0), &entries, &viewport, 8.0).unwrap();
        assert_eq!(hit.path_id, PathId::new(0));
    }

    #[test]
    fn tracker_reports_only_target_changes() {
        let a = HoverResult {
            path_id: PathId::new(0),
            index: 2,
            x: 1.0,
            y: 2.0,
        };
        let mut tracker = HoverTracker::new();
        assert!(tracker.update(Some(a)));
        assert!(!tracker.update(Some(a)));
        assert!(tracker.update(Some(HoverResult { index: 3, ..a })));
        assert!(tracker.clear());
        assert!(!tracker.update(None));
    }

    #[test]
    fn display_uses_one_based_index() {
        let hover = HoverResult {
            path_id: PathId::new(4),
            index: 0,
            x: 10.0,
            y: -2.5,
        };
        assert_eq!(hover.to_string(), "path 4 | point 1 | (x: 10, y: -2.5)");
    }
}
