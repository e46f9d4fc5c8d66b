//! Region Packing Solver Library
//!
//! Decides whether rectangular regions can hold a required multiset of
//! polyomino-like shapes, each of which may be rotated and mirrored.
//!
//! The pipeline is parse → [`pieces::Catalogue`] (variant orbits computed once
//! per shape) → [`solver::Packer`] (once per region).

pub mod error;
pub mod geometry;
pub mod grid;
pub mod parser;
pub mod pieces;
pub mod solver;

pub use error::{ParseError, ShapeError};
pub use pieces::{Catalogue, Shape};
pub use solver::{count_packable, count_packable_parallel, Packer, Region, SearchOptions};
