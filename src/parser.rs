//! Text format for shape catalogues and region requests.
//!
//! ```text
//! 0:
//! ###
//! ##.
//!
//! 4x4: 2 0
//! ```
//!
//! Shape blocks start with an `N:` header followed by grid rows and end at a
//! blank line or the next header. Region lines read `WxH: c0 c1 ...`, where
//! `ci` is the number of instances of shape `i`. Once the first region line
//! appears, every following non-blank line must be a region line.

use std::path::Path;

use crate::error::ParseError;
use crate::pieces::{Shape, MAX_SHAPE_INDEX};
use crate::solver::Region;

/// Parsed input: the shape definitions in file order and the region requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub shapes: Vec<Shape>,
    pub regions: Vec<Region>,
}

/// Reads and parses an input file.
pub fn read_input(path: &Path) -> Result<Input, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_input(&text)
}

/// Shape block being collected.
struct PendingShape<'a> {
    index: usize,
    rows: Vec<&'a str>,
}

impl PendingShape<'_> {
    fn finish(self) -> Result<Shape, ParseError> {
        Ok(Shape::from_rows(self.index, &self.rows)?)
    }
}

/// Parses the whole input text.
pub fn parse_input(text: &str) -> Result<Input, ParseError> {
    let mut shapes = Vec::new();
    let mut regions = Vec::new();
    let mut pending: Option<PendingShape<'_>> = None;

    for (line_index, raw) in text.lines().enumerate() {
        let line_number = line_index + 1;
        let line = raw.trim();

        if line.is_empty() {
            if let Some(shape) = pending.take() {
                shapes.push(shape.finish()?);
            }
            continue;
        }

        if !regions.is_empty() || is_region_line(line) {
            if let Some(shape) = pending.take() {
                shapes.push(shape.finish()?);
            }
            regions.push(parse_region(line, line_number)?);
            continue;
        }

        if let Some(header) = line.strip_suffix(':') {
            if let Some(shape) = pending.take() {
                shapes.push(shape.finish()?);
            }
            let index = header
                .parse::<usize>()
                .ok()
                .filter(|&index| index <= MAX_SHAPE_INDEX)
                .ok_or_else(|| ParseError::ShapeIndex {
                    line: line_number,
                    text: line.to_string(),
                })?;
            pending = Some(PendingShape {
                index,
                rows: Vec::new(),
            });
            continue;
        }

        match pending.as_mut() {
            Some(shape) => shape.rows.push(line),
            None => return Err(ParseError::OrphanRow { line: line_number }),
        }
    }

    if let Some(shape) = pending.take() {
        shapes.push(shape.finish()?);
    }

    Ok(Input { shapes, regions })
}

fn is_region_line(line: &str) -> bool {
    line.contains('x') && line.contains(':')
}

/// Parses `WxH: c0 c1 ...`.
fn parse_region(line: &str, line_number: usize) -> Result<Region, ParseError> {
    let header_error = || ParseError::RegionHeader {
        line: line_number,
        text: line.to_string(),
    };

    let (size, counts) = line.split_once(':').ok_or_else(header_error)?;
    let (width, height) = size.trim().split_once('x').ok_or_else(header_error)?;
    let width: usize = width.parse().map_err(|_| header_error())?;
    let height: usize = height.parse().map_err(|_| header_error())?;
    if width == 0 || height == 0 || width.checked_mul(height).is_none() {
        return Err(header_error());
    }

    let counts = counts
        .split_whitespace()
        .map(|count| {
            count.parse().map_err(|_| ParseError::Count {
                line: line_number,
                text: count.to_string(),
            })
        })
        .collect::<Result<Vec<usize>, _>>()?;

    Ok(Region::new(width, height, counts))
}
