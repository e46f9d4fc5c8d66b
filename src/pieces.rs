//! Shape definitions and the shape catalogue.
//!
//! A shape is parsed from a rectangular diagram of `#` (filled) and any other
//! character (background). The catalogue owns every shape together with its
//! precomputed variant orbit, so the search never recomputes orientations.

use tracing::warn;

use crate::error::ShapeError;
use crate::geometry::{all_variants, Variant};

/// Character marking a filled cell in a shape diagram.
pub const FILLED: char = '#';

/// Character used for background cells when a grid is rendered back to text.
pub const BACKGROUND: char = '.';

/// Largest shape index the catalogue stores. The catalogue is a dense table,
/// so indices are bounded.
pub const MAX_SHAPE_INDEX: usize = u16::MAX as usize;

/// Rectangular boolean occupancy matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl ShapeGrid {
    /// Builds a grid from row-major cells. `cells.len()` must equal `rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    /// Number of rows (bounding-box height).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (bounding-box width).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns whether the cell at `(row, col)` is filled.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    /// Number of filled cells.
    pub fn cell_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Filled cells as `(row, col)` pairs in row-major order.
    pub fn filled_cells(&self) -> Vec<(usize, usize)> {
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .filter(|&(row, col)| self.get(row, col))
            .collect()
    }
}

/// A catalogue shape: its index and canonical occupancy grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub index: usize,
    pub grid: ShapeGrid,
    pub cell_count: usize,
}

impl Shape {
    /// Normalizes a diagram into a shape.
    ///
    /// Every row must have the same length as the first, which must not be
    /// empty.
    pub fn from_rows<S: AsRef<str>>(index: usize, rows: &[S]) -> Result<Self, ShapeError> {
        let Some(first) = rows.first() else {
            return Err(ShapeError::Empty { index });
        };
        let cols = first.as_ref().chars().count();
        if cols == 0 {
            return Err(ShapeError::Empty { index });
        }

        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != cols {
                return Err(ShapeError::RaggedRow {
                    index,
                    row: row_index,
                    expected: cols,
                    found,
                });
            }
            cells.extend(row.chars().map(|marker| marker == FILLED));
        }

        let grid = ShapeGrid::from_cells(rows.len(), cols, cells);
        let cell_count = grid.cell_count();
        Ok(Self {
            index,
            grid,
            cell_count,
        })
    }
}

/// Every shape of a run, indexed by shape index, with cached variant sets.
///
/// Indices that were never defined have no shape and an empty variant set.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    shapes: Vec<Option<Shape>>,
    variants: Vec<Vec<Variant>>,
}

impl Catalogue {
    /// Builds the catalogue and generates each shape's variants once.
    ///
    /// When an index is defined more than once the later definition wins.
    /// Shapes above [`MAX_SHAPE_INDEX`] are skipped.
    pub fn new(shapes: impl IntoIterator<Item = Shape>) -> Self {
        let mut slots: Vec<Option<Shape>> = Vec::new();
        for shape in shapes {
            let index = shape.index;
            if index > MAX_SHAPE_INDEX {
                warn!(index, "shape index out of range, skipping");
                continue;
            }
            if slots.len() <= index {
                slots.resize(index + 1, None);
            }
            if slots[index].is_some() {
                warn!(index, "shape index defined twice, keeping the later definition");
            }
            slots[index] = Some(shape);
        }

        let variants = slots
            .iter()
            .map(|slot| slot.as_ref().map(all_variants).unwrap_or_default())
            .collect();

        Self {
            shapes: slots,
            variants,
        }
    }

    /// Looks up a shape by index.
    pub fn shape(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index).and_then(Option::as_ref)
    }

    /// Cell count of a shape, or zero for an undefined index.
    pub fn cell_count(&self, index: usize) -> usize {
        self.shape(index).map_or(0, |shape| shape.cell_count)
    }

    /// Variant orbit of a shape; empty for an undefined index.
    pub fn variants(&self, index: usize) -> &[Variant] {
        self.variants.get(index).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the defined shapes in index order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().flatten()
    }

    /// One past the largest defined index.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rows_counts_filled_cells() {
        let shape = Shape::from_rows(0, &["###", "##.", "##."]).unwrap();
        assert_eq!(shape.grid.rows(), 3);
        assert_eq!(shape.grid.cols(), 3);
        assert_eq!(shape.cell_count, 7);
        assert!(shape.grid.get(0, 2));
        assert!(!shape.grid.get(1, 2));
    }

    #[test]
    fn test_from_rows_treats_other_markers_as_background() {
        let shape = Shape::from_rows(3, &["#x", " #"]).unwrap();
        assert_eq!(shape.cell_count, 2);
        assert_eq!(shape.grid.filled_cells(), vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_from_rows_rejects_empty_input() {
        let rows: [&str; 0] = [];
        assert_eq!(Shape::from_rows(2, &rows), Err(ShapeError::Empty { index: 2 }));
        assert_eq!(Shape::from_rows(2, &[""]), Err(ShapeError::Empty { index: 2 }));
    }

    #[test]
    fn test_from_rows_rejects_ragged_rows() {
        assert_eq!(
            Shape::from_rows(1, &["##", "#", "##"]),
            Err(ShapeError::RaggedRow {
                index: 1,
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_catalogue_tolerates_gaps() {
        let square = Shape::from_rows(2, &["##", "##"]).unwrap();
        let catalogue = Catalogue::new([square]);

        assert_eq!(catalogue.len(), 3);
        assert!(catalogue.shape(0).is_none());
        assert!(catalogue.variants(0).is_empty());
        assert!(catalogue.variants(7).is_empty());
        assert_eq!(catalogue.cell_count(1), 0);
        assert_eq!(catalogue.cell_count(2), 4);
        assert_eq!(catalogue.variants(2).len(), 1);
        assert_eq!(catalogue.shapes().count(), 1);
    }

    #[test]
    fn test_catalogue_later_definition_wins() {
        let first = Shape::from_rows(0, &["#"]).unwrap();
        let second = Shape::from_rows(0, &["###"]).unwrap();
        let catalogue = Catalogue::new([first, second]);

        assert_eq!(catalogue.cell_count(0), 3);
        assert_eq!(catalogue.variants(0).len(), 2);
    }

    #[test]
    fn test_catalogue_skips_out_of_range_index() {
        let huge = Shape::from_rows(usize::MAX, &["#"]).unwrap();
        let above = Shape::from_rows(MAX_SHAPE_INDEX + 1, &["#"]).unwrap();
        let small = Shape::from_rows(1, &["##"]).unwrap();
        let catalogue = Catalogue::new([huge, above, small]);

        assert_eq!(catalogue.len(), 2);
        assert_eq!(catalogue.cell_count(1), 2);
        assert!(catalogue.shape(usize::MAX).is_none());
        assert!(catalogue.variants(usize::MAX).is_empty());
        assert!(Catalogue::new(Vec::<Shape>::new()).is_empty());
    }
}
