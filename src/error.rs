//! Error types for catalogue and input parsing.
//!
//! Search outcomes are never errors: an area-infeasible or exhausted region is
//! simply `false`. Only malformed input ends up here.

use std::path::PathBuf;

use thiserror::Error;

/// A shape diagram that cannot be turned into an occupancy grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    /// The diagram has no rows, or its first row is empty.
    #[error("shape {index} has an empty diagram")]
    Empty { index: usize },

    /// A row differs in length from the first row.
    #[error("shape {index}: row {row} has length {found}, expected {expected}")]
    RaggedRow {
        index: usize,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failure while reading the shape catalogue and region list.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("line {line}: invalid shape header '{text}'")]
    ShapeIndex { line: usize, text: String },

    #[error("line {line}: expected '<width>x<height>: <counts>', got '{text}'")]
    RegionHeader { line: usize, text: String },

    #[error("line {line}: invalid count '{text}'")]
    Count { line: usize, text: String },

    #[error("line {line}: grid row outside of a shape block")]
    OrphanRow { line: usize },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
