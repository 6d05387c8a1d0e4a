//! Static wall rectangles that suppress propagation.
//!
//! Walls never touch the field themselves; the integrator consults
//! [`ObstacleSet::contains`] and forces amplitude and velocity to zero in
//! covered cells, making walls hard zero sinks rather than reflectors.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in cell coordinates.
///
/// Bounds are inclusive on all four sides: a cell at `x + w` (or `y + h`)
/// is still inside. Two rectangles sharing an edge therefore both claim the
/// shared cells. This is kept deliberately, since it determines exactly
/// which boundary cells the integrator zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Leftmost covered column.
    pub x: usize,
    /// Topmost covered row.
    pub y: usize,
    /// Horizontal extent in cells beyond `x`.
    pub w: usize,
    /// Vertical extent in cells beyond `y`.
    pub h: usize,
}

impl Obstacle {
    /// Create a rectangle covering columns `x..=x + w`, rows `y..=y + h`.
    pub fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Inclusive containment test.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        col >= self.x && col <= self.x + self.w && row >= self.y && row <= self.y + self.h
    }
}

/// The set of wall rectangles consulted by the integrator.
///
/// Lookup is a linear scan; wall counts stay in the tens, so no spatial
/// index is warranted. Rectangles are static after construction, only the
/// enable flag changes at runtime.
#[derive(Debug, Clone)]
pub struct ObstacleSet {
    rects: Vec<Obstacle>,
    enabled: bool,
}

impl ObstacleSet {
    /// Create a set from a fixed rectangle list.
    pub fn new(rects: Vec<Obstacle>, enabled: bool) -> Self {
        Self { rects, enabled }
    }

    /// True iff walls are enabled and the cell falls inside any rectangle.
    /// When disabled, every cell integrates normally.
    pub fn contains(&self, col: usize, row: usize) -> bool {
        self.enabled && self.rects.iter().any(|r| r.contains(col, row))
    }

    /// Whether walls currently affect the integrator.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Flip the enable flag.
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// The static rectangle list.
    pub fn rects(&self) -> &[Obstacle] {
        &self.rects
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inclusive_on_all_four_sides() {
        let rect = Obstacle::new(10, 20, 4, 6);
        assert!(rect.contains(10, 20), "top-left corner is inside");
        assert!(rect.contains(14, 26), "bottom-right corner is inside");
        assert!(!rect.contains(9, 20));
        assert!(!rect.contains(15, 20));
        assert!(!rect.contains(10, 27));
    }

    #[test]
    fn test_adjacent_rects_both_claim_shared_edge() {
        // Rect A ends at column 14, rect B starts there.
        let a = Obstacle::new(10, 0, 4, 4);
        let b = Obstacle::new(14, 0, 4, 4);
        assert!(a.contains(14, 2));
        assert!(b.contains(14, 2));
    }

    #[test]
    fn test_disabled_set_contains_nothing() {
        let mut set = ObstacleSet::new(vec![Obstacle::new(0, 0, 100, 100)], false);
        assert!(!set.contains(5, 5));

        set.toggle();
        assert!(set.contains(5, 5));
    }

    #[test]
    fn test_linear_scan_over_all_rects() {
        let set = ObstacleSet::new(
            vec![Obstacle::new(0, 0, 1, 1), Obstacle::new(50, 50, 1, 1)],
            true,
        );
        assert!(set.contains(0, 0));
        assert!(set.contains(51, 51));
        assert!(!set.contains(25, 25));
    }
}
