//! Hex grid coordinate mapping
//!
//! The board is an "odd-r" offset layout: odd rows are shoved right by one
//! bubble radius. Rows are `ROW_HEIGHT` apart so neighboring bubbles touch.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Even-row neighbor offsets: up-left, up-right, left, right, down-left, down-right
const EVEN_ROW_DIRS: [(i32, i32); 6] = [(-1, -1), (0, -1), (-1, 0), (1, 0), (-1, 1), (0, 1)];
/// Odd-row neighbor offsets, same order
const ODD_ROW_DIRS: [(i32, i32); 6] = [(0, -1), (1, -1), (-1, 0), (1, 0), (0, 1), (1, 1)];

/// A (column, row) cell on the hex board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexCell {
    pub col: i32,
    pub row: i32,
}

impl HexCell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Odd rows carry the half-cell offset (works for negative rows too)
    #[inline]
    pub fn is_odd_row(&self) -> bool {
        self.row.rem_euclid(2) == 1
    }

    /// Pixel position of the cell center
    #[inline]
    pub fn to_pixel(self) -> Vec2 {
        grid_to_pixel(self.col, self.row)
    }

    /// The 6 adjacent cells (no bounds checking)
    pub fn neighbors(self) -> [HexCell; 6] {
        neighbors(self.col, self.row)
    }

    /// Inside the playable columns and at or below the ceiling
    #[inline]
    pub fn is_in_bounds(&self) -> bool {
        (0..GRID_COLS).contains(&self.col) && self.row >= 0
    }
}

/// Horizontal shift for a row
#[inline]
fn row_offset(row: i32) -> f32 {
    if row.rem_euclid(2) == 0 { 0.0 } else { BUBBLE_RADIUS }
}

/// Convert grid (col, row) to the pixel center of that cell
pub fn grid_to_pixel(col: i32, row: i32) -> Vec2 {
    Vec2::new(
        col as f32 * (BUBBLE_RADIUS * 2.0) + BUBBLE_RADIUS + row_offset(row),
        row as f32 * ROW_HEIGHT + BUBBLE_RADIUS,
    )
}

/// Convert a pixel position to the nearest grid cell
pub fn pixel_to_grid(pos: Vec2) -> HexCell {
    let row = ((pos.y - BUBBLE_RADIUS) / ROW_HEIGHT).round() as i32;
    let col = ((pos.x - BUBBLE_RADIUS - row_offset(row)) / (BUBBLE_RADIUS * 2.0)).round() as i32;
    HexCell { col, row }
}

/// The six neighbors of (col, row), ordered up-left, up-right, left, right,
/// down-left, down-right
pub fn neighbors(col: i32, row: i32) -> [HexCell; 6] {
    let dirs = if row.rem_euclid(2) == 0 {
        EVEN_ROW_DIRS
    } else {
        ODD_ROW_DIRS
    };
    dirs.map(|(dc, dr)| HexCell::new(col + dc, row + dr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_grid_to_pixel_origin() {
        let p = grid_to_pixel(0, 0);
        assert_eq!(p, Vec2::new(BUBBLE_RADIUS, BUBBLE_RADIUS));

        // Odd row is shifted right by one radius
        let p = grid_to_pixel(0, 1);
        assert!((p.x - 2.0 * BUBBLE_RADIUS).abs() < 0.001);
        assert!((p.y - (ROW_HEIGHT + BUBBLE_RADIUS)).abs() < 0.001);
    }

    #[test]
    fn test_adjacent_cells_touch() {
        // Every neighbor center sits one bubble diameter away
        let center = grid_to_pixel(4, 3);
        for n in neighbors(4, 3) {
            let d = (n.to_pixel() - center).length();
            assert!((d - 2.0 * BUBBLE_RADIUS).abs() < 0.01, "neighbor {n:?} at {d}");
        }
    }

    #[test]
    fn test_neighbor_offsets_by_parity() {
        let even = neighbors(3, 2);
        assert_eq!(even[0], HexCell::new(2, 1));
        assert_eq!(even[5], HexCell::new(3, 3));

        let odd = neighbors(3, 1);
        assert_eq!(odd[0], HexCell::new(3, 0));
        assert_eq!(odd[1], HexCell::new(4, 0));
        assert_eq!(odd[5], HexCell::new(4, 2));
    }

    #[test]
    fn test_pixel_to_grid_nearest() {
        // Slightly off-center still maps to the same cell
        let p = grid_to_pixel(5, 4) + Vec2::new(6.0, -7.0);
        assert_eq!(pixel_to_grid(p), HexCell::new(5, 4));
    }

    #[test]
    fn test_bounds() {
        assert!(HexCell::new(0, 0).is_in_bounds());
        assert!(HexCell::new(GRID_COLS - 1, 7).is_in_bounds());
        assert!(!HexCell::new(-1, 2).is_in_bounds());
        assert!(!HexCell::new(GRID_COLS, 2).is_in_bounds());
        assert!(!HexCell::new(3, -1).is_in_bounds());
    }

    proptest! {
        #[test]
        fn prop_pixel_round_trip(col in -40i32..40, row in 0i32..200) {
            prop_assert_eq!(pixel_to_grid(grid_to_pixel(col, row)), HexCell::new(col, row));
        }

        #[test]
        fn prop_neighbors_symmetric(col in -40i32..40, row in -40i32..200) {
            let cell = HexCell::new(col, row);
            let ns = cell.neighbors();
            prop_assert_eq!(ns.len(), 6);
            for n in ns {
                prop_assert!(n.neighbors().contains(&cell));
            }
        }
    }
}
