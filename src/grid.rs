//! Flat occupancy grid for a rectangular region, and text rendering.
//!
//! Cells are stored row-major, so the cell at `(row, col)` lives at index
//! `row * width + col`. That same linear index is the anchor position the
//! solver uses to order interchangeable pieces.

use crate::geometry::Variant;
use crate::pieces::{BACKGROUND, FILLED};
use crate::solver::Packing;

/// Occupancy of one region during a search.
///
/// Allocated once per region evaluation and mutated in place: a placement
/// marks its cells, backtracking clears exactly the same cells.
#[derive(Debug, Clone)]
pub struct Occupancy {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Occupancy {
    /// Creates an empty `width x height` grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Linear index of a cell.
    #[inline(always)]
    pub const fn position(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Returns whether every cell of `variant` anchored at `(row, col)` is free.
    ///
    /// The caller guarantees the variant's bounding box lies inside the grid.
    #[inline]
    pub fn is_free(&self, variant: &Variant, row: usize, col: usize) -> bool {
        variant
            .cells
            .iter()
            .all(|&(dr, dc)| !self.cells[self.position(row + dr, col + dc)])
    }

    /// Marks the cells of `variant` anchored at `(row, col)` as occupied.
    #[inline]
    pub fn place(&mut self, variant: &Variant, row: usize, col: usize) {
        self.set(variant, row, col, true);
    }

    /// Clears the cells previously marked by [`Occupancy::place`].
    #[inline]
    pub fn remove(&mut self, variant: &Variant, row: usize, col: usize) {
        self.set(variant, row, col, false);
    }

    fn set(&mut self, variant: &Variant, row: usize, col: usize, occupied: bool) {
        for &(dr, dc) in &variant.cells {
            let index = self.position(row + dr, col + dc);
            self.cells[index] = occupied;
        }
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&occupied| occupied).count()
    }
}

/// Labels for placed pieces, in placement order.
const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Label shown once every entry of `LABELS` is used.
const OVERFLOW_LABEL: char = '*';

fn placement_label(order: usize) -> char {
    LABELS.get(order).map_or(OVERFLOW_LABEL, |&b| char::from(b))
}

/// Formats a packing as a grid of letters.
///
/// Each placed piece gets its own letter (A, B, C, ... in placement order),
/// empty cells show as '.'.
pub fn format_packing(packing: &Packing) -> String {
    let (width, height) = (packing.width, packing.height);
    let mut canvas = vec![BACKGROUND; width * height];

    for (order, placement) in packing.placements.iter().enumerate() {
        let label = placement_label(order);
        for &(dr, dc) in &placement.variant.cells {
            canvas[(placement.row + dr) * width + placement.col + dc] = label;
        }
    }

    let mut output = String::with_capacity(height * (width + 1));
    for row in canvas.chunks(width.max(1)).take(height) {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Formats a single variant as its bounding box of `#` and `.`.
pub fn format_variant(variant: &Variant) -> String {
    let mut canvas = vec![BACKGROUND; variant.rows * variant.cols];
    for &(row, col) in &variant.cells {
        canvas[row * variant.cols + col] = FILLED;
    }

    let mut output = String::with_capacity(variant.rows * (variant.cols + 1));
    for row in canvas.chunks(variant.cols.max(1)).take(variant.rows) {
        output.extend(row);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domino() -> Variant {
        Variant {
            shape_index: 0,
            cells: vec![(0, 0), (0, 1)],
            rows: 1,
            cols: 2,
        }
    }

    #[test]
    fn test_place_and_remove_restore_grid() {
        let mut grid = Occupancy::new(3, 2);
        let piece = domino();

        assert!(grid.is_free(&piece, 1, 1));
        grid.place(&piece, 1, 1);
        assert_eq!(grid.occupied_count(), 2);
        assert!(!grid.is_free(&piece, 1, 0));
        assert!(grid.is_free(&piece, 0, 1));

        grid.remove(&piece, 1, 1);
        assert_eq!(grid.occupied_count(), 0);
        assert!(grid.is_free(&piece, 1, 0));
    }

    #[test]
    fn test_position_is_row_major() {
        let grid = Occupancy::new(4, 3);
        assert_eq!(grid.position(0, 0), 0);
        assert_eq!(grid.position(0, 3), 3);
        assert_eq!(grid.position(2, 1), 9);
        assert_eq!((grid.width(), grid.height()), (4, 3));
    }

    #[test]
    fn test_placement_labels() {
        assert_eq!(placement_label(0), 'A');
        assert_eq!(placement_label(26), 'a');
        assert_eq!(placement_label(61), '9');
        assert_eq!(placement_label(62), OVERFLOW_LABEL);
    }

    #[test]
    fn test_format_variant() {
        let variant = Variant {
            shape_index: 4,
            cells: vec![(0, 0), (1, 0), (1, 1)],
            rows: 2,
            cols: 2,
        };
        assert_eq!(format_variant(&variant), "#.\n##\n");
    }
}
