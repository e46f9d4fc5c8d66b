//! Rotation and reflection of shape grids.
//!
//! A planar shape has at most 8 orientations: 4 rotations, each optionally
//! mirrored. Shapes with inherent symmetry produce fewer distinct ones, which
//! are removed by comparing a textual key of each grid.

use rustc_hash::FxHashSet;

use crate::pieces::{Shape, ShapeGrid, BACKGROUND, FILLED};

/// One orientation of a shape, ready to be anchored into a region.
///
/// `cells` are the filled cells relative to the top-left corner of the
/// variant's bounding box, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub shape_index: usize,
    pub cells: Vec<(usize, usize)>,
    pub rows: usize,
    pub cols: usize,
}

impl Variant {
    fn from_grid(shape_index: usize, grid: &ShapeGrid) -> Self {
        Self {
            shape_index,
            cells: grid.filled_cells(),
            rows: grid.rows(),
            cols: grid.cols(),
        }
    }
}

/// Rotates a grid by 90 degrees clockwise.
///
/// An `h x w` grid becomes `w x h`; old cell `(i, j)` moves to `(j, h - 1 - i)`.
pub fn rotate_90(grid: &ShapeGrid) -> ShapeGrid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let mut cells = vec![false; rows * cols];
    for i in 0..rows {
        for j in 0..cols {
            // the rotated grid has `rows` columns
            cells[j * rows + (rows - 1 - i)] = grid.get(i, j);
        }
    }
    ShapeGrid::from_cells(cols, rows, cells)
}

/// Mirrors a grid horizontally by reversing the column order of every row.
pub fn flip_horizontal(grid: &ShapeGrid) -> ShapeGrid {
    let (rows, cols) = (grid.rows(), grid.cols());
    let cells = (0..rows)
        .flat_map(|i| (0..cols).rev().map(move |j| (i, j)))
        .map(|(i, j)| grid.get(i, j))
        .collect();
    ShapeGrid::from_cells(rows, cols, cells)
}

/// Row-major text serialization of a grid, one `\n`-terminated line per row.
///
/// Two grids have the same key exactly when they have the same dimensions and
/// the same filled cells.
pub fn grid_key(grid: &ShapeGrid) -> String {
    let mut key = String::with_capacity(grid.rows() * (grid.cols() + 1));
    for i in 0..grid.rows() {
        for j in 0..grid.cols() {
            key.push(if grid.get(i, j) { FILLED } else { BACKGROUND });
        }
        key.push('\n');
    }
    key
}

/// Generates all distinct orientations of a shape.
///
/// Expands depth-first from the canonical grid, applying the three non-trivial
/// rotations and the four mirrored orientations at every step, and stops any
/// branch whose key has been seen before. The canonical orientation is always
/// first. The result holds between 1 and 8 variants.
pub fn all_variants(shape: &Shape) -> Vec<Variant> {
    let mut seen = FxHashSet::default();
    let mut variants = Vec::new();
    expand(shape.index, &shape.grid, &mut seen, &mut variants);
    variants
}

fn expand(
    shape_index: usize,
    grid: &ShapeGrid,
    seen: &mut FxHashSet<String>,
    variants: &mut Vec<Variant>,
) {
    if !seen.insert(grid_key(grid)) {
        return;
    }
    variants.push(Variant::from_grid(shape_index, grid));

    let quarter = rotate_90(grid);
    let half = rotate_90(&quarter);
    let three_quarter = rotate_90(&half);
    expand(shape_index, &quarter, seen, variants);
    expand(shape_index, &half, seen, variants);
    expand(shape_index, &three_quarter, seen, variants);

    let flipped = flip_horizontal(grid);
    let flipped_quarter = rotate_90(&flipped);
    let flipped_half = rotate_90(&flipped_quarter);
    let flipped_three_quarter = rotate_90(&flipped_half);
    expand(shape_index, &flipped, seen, variants);
    expand(shape_index, &flipped_quarter, seen, variants);
    expand(shape_index, &flipped_half, seen, variants);
    expand(shape_index, &flipped_three_quarter, seen, variants);
}
