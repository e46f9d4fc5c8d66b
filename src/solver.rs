//! Backtracking region packer.
//!
//! Answers whether a multiset of shapes can be placed into a rectangular
//! region without overlap, allowing every rotation and reflection.
//!
//! Key points:
//! - Area pre-check rejects regions that cannot hold the required cells
//! - Pieces with the fewest orientations are placed first
//! - Interchangeable instances of one shape are only tried at non-decreasing
//!   anchor positions, so each set of positions is explored once
//! - One occupancy grid per region, mutated in place and undone on backtrack
//! - The search stops at the first complete placement

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::geometry::Variant;
use crate::grid::Occupancy;
use crate::pieces::Catalogue;

/// A rectangular region and the number of instances required per shape.
///
/// `counts[i]` is the count for shape index `i`; indices past the end of
/// `counts` are not required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub width: usize,
    pub height: usize,
    pub counts: Vec<usize>,
}

impl Region {
    pub fn new(width: usize, height: usize, counts: Vec<usize>) -> Self {
        Self {
            width,
            height,
            counts,
        }
    }

    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Total cells the required pieces cover.
    pub fn required_cells(&self, catalogue: &Catalogue) -> usize {
        self.counts
            .iter()
            .enumerate()
            .map(|(index, &count)| count.saturating_mul(catalogue.cell_count(index)))
            .fold(0, usize::saturating_add)
    }
}

/// One required instance of a shape.
///
/// `ordinal` numbers the instances of the same shape from 0 and only serves
/// to order interchangeable pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Obligation {
    pub shape_index: usize,
    pub ordinal: usize,
}

/// Search tuning that never changes a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only try anchors at or after the previous instance of the same shape.
    pub ordering_pruning: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            ordering_pruning: true,
        }
    }
}

/// A piece placed at an anchor within a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub shape_index: usize,
    pub variant: Variant,
    pub row: usize,
    pub col: usize,
}

/// The first complete placement found for a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    pub width: usize,
    pub height: usize,
    pub placements: Vec<Placement>,
}

/// Expands required counts into one obligation per instance, most
/// constrained shape first.
///
/// Sorted by number of variants, then shape index, then ordinal, which keeps
/// all instances of one shape adjacent and in ordinal order.
pub fn obligations(region: &Region, catalogue: &Catalogue) -> Vec<Obligation> {
    let mut obligations: Vec<Obligation> = region
        .counts
        .iter()
        .enumerate()
        .flat_map(|(shape_index, &count)| {
            (0..count).map(move |ordinal| Obligation {
                shape_index,
                ordinal,
            })
        })
        .collect();

    obligations.sort_by_key(|obligation| {
        (
            catalogue.variants(obligation.shape_index).len(),
            obligation.shape_index,
            obligation.ordinal,
        )
    });
    obligations
}

/// Evaluates regions against a shared, read-only catalogue.
#[derive(Debug, Clone, Copy)]
pub struct Packer<'a> {
    catalogue: &'a Catalogue,
    options: SearchOptions,
}

impl<'a> Packer<'a> {
    pub fn new(catalogue: &'a Catalogue) -> Self {
        Self::with_options(catalogue, SearchOptions::default())
    }

    pub fn with_options(catalogue: &'a Catalogue, options: SearchOptions) -> Self {
        Self { catalogue, options }
    }

    /// Returns whether all required pieces fit into the region.
    pub fn fits(&self, region: &Region) -> bool {
        self.find_packing(region).is_some()
    }

    /// Finds one non-overlapping placement of every required piece.
    ///
    /// Returns `None` when the required cells exceed the area, when a required
    /// shape is missing from the catalogue, or when the search is exhausted.
    /// A region that requires nothing is packed by an empty placement list.
    pub fn find_packing(&self, region: &Region) -> Option<Packing> {
        let required_cells = region.required_cells(self.catalogue);
        if required_cells > region.area() {
            trace!(
                width = region.width,
                height = region.height,
                required_cells,
                "required cells exceed region area"
            );
            return None;
        }

        let obligations = obligations(region, self.catalogue);
        if obligations.is_empty() {
            return Some(Packing {
                width: region.width,
                height: region.height,
                placements: Vec::new(),
            });
        }
        if let Some(missing) = obligations
            .iter()
            .find(|obligation| self.catalogue.variants(obligation.shape_index).is_empty())
        {
            debug!(shape = missing.shape_index, "required shape is not in the catalogue");
            return None;
        }

        let mut search = Search {
            catalogue: self.catalogue,
            options: self.options,
            obligations: &obligations,
            grid: Occupancy::new(region.width, region.height),
            last_position: vec![0; self.catalogue.len()],
            placed: Vec::with_capacity(obligations.len()),
        };
        let found = search.place_from(0);
        debug_assert_eq!(
            search.grid.occupied_count(),
            if found { required_cells } else { 0 },
            "backtracking must leave exactly the placed cells occupied"
        );

        debug!(
            width = region.width,
            height = region.height,
            pieces = obligations.len(),
            found,
            "region evaluated"
        );

        found.then(|| Packing {
            width: region.width,
            height: region.height,
            placements: search
                .placed
                .iter()
                .map(|&(variant, row, col)| Placement {
                    shape_index: variant.shape_index,
                    variant: variant.clone(),
                    row,
                    col,
                })
                .collect(),
        })
    }
}

/// Mutable state of one region evaluation.
///
/// Owned by a single `find_packing` call and dropped when it returns.
struct Search<'a> {
    catalogue: &'a Catalogue,
    options: SearchOptions,
    obligations: &'a [Obligation],
    grid: Occupancy,
    /// Anchor position of the most recently placed instance, per shape index.
    last_position: Vec<usize>,
    /// Placements on the current branch, in obligation order.
    placed: Vec<(&'a Variant, usize, usize)>,
}

impl<'a> Search<'a> {
    /// Tries to satisfy obligations `next..`, leaving the successful placements
    /// in `self.placed` and the grid filled on success.
    fn place_from(&mut self, next: usize) -> bool {
        let Some(&obligation) = self.obligations.get(next) else {
            return true;
        };

        let shape = obligation.shape_index;
        let min_position = if self.options.ordering_pruning && obligation.ordinal > 0 {
            self.last_position[shape]
        } else {
            0
        };

        let catalogue = self.catalogue;
        for variant in catalogue.variants(shape) {
            let (Some(max_row), Some(max_col)) = (
                self.grid.height().checked_sub(variant.rows),
                self.grid.width().checked_sub(variant.cols),
            ) else {
                continue;
            };

            for row in 0..=max_row {
                for col in 0..=max_col {
                    let position = self.grid.position(row, col);
                    if position < min_position || !self.grid.is_free(variant, row, col) {
                        continue;
                    }

                    self.grid.place(variant, row, col);
                    let previous = std::mem::replace(&mut self.last_position[shape], position);
                    self.placed.push((variant, row, col));

                    if self.place_from(next + 1) {
                        return true;
                    }

                    self.placed.pop();
                    self.last_position[shape] = previous;
                    self.grid.remove(variant, row, col);
                }
            }
        }

        false
    }
}

/// Counts the packable regions, one after another.
pub fn count_packable(catalogue: &Catalogue, regions: &[Region], options: SearchOptions) -> usize {
    let packer = Packer::with_options(catalogue, options);
    regions.iter().filter(|region| packer.fits(region)).count()
}

/// Counts the packable regions on the rayon thread pool.
///
/// Each region gets its own search state; only the catalogue is shared.
pub fn count_packable_parallel(
    catalogue: &Catalogue,
    regions: &[Region],
    options: SearchOptions,
) -> usize {
    let packer = Packer::with_options(catalogue, options);
    regions.par_iter().filter(|region| packer.fits(region)).count()
}
