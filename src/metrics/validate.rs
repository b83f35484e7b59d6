//! Route export validation.
//!
//! Re-reads an exported route set as a whitespace-separated token stream
//! and checks that it is well formed, that no cell is used twice anywhere
//! in the file, and that each path joins two endpoints of the same object.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::lattice::{CellId, Coord};
use crate::objects::{ObjectId, ObjectSet};

/// Why an export failed validation. Each variant has its own [`code`].
///
/// [`code`]: ExportCheckError::code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportCheckError {
    #[error("cannot read export: {0}")]
    Unreadable(String),

    #[error("missing or malformed path count header")]
    MalformedHeader,

    #[error("path {path}: missing or malformed length")]
    MalformedLength { path: usize },

    #[error("path {path}, cell {cell}: missing or malformed coordinate")]
    MalformedCoordinate { path: usize, cell: usize },

    #[error("path {path}: cell {coord} already used by an earlier cell")]
    DuplicateCell { path: usize, coord: Coord },

    #[error("path {path}: endpoints belong to objects {first:?} and {last:?}")]
    EndpointMismatch {
        path: usize,
        first: Option<ObjectId>,
        last: Option<ObjectId>,
    },

    #[error("unexpected data after the {declared} declared paths")]
    TrailingData { declared: usize },
}

impl ExportCheckError {
    /// Distinct negative status code per failure kind.
    pub fn code(&self) -> i32 {
        match self {
            ExportCheckError::Unreadable(_) => -2,
            ExportCheckError::MalformedHeader => -3,
            ExportCheckError::MalformedLength { .. } => -4,
            ExportCheckError::MalformedCoordinate { .. } => -5,
            ExportCheckError::DuplicateCell { .. } => -6,
            ExportCheckError::EndpointMismatch { .. } => -7,
            ExportCheckError::TrailingData { .. } => -8,
        }
    }
}

/// Shape of a valid export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSummary {
    pub paths: usize,
    pub cells: usize,
}

/// Validates an export file on disk.
pub fn validate_export_file<P: AsRef<Path>>(
    objects: &ObjectSet,
    path: P,
) -> Result<ExportSummary, ExportCheckError> {
    let file = File::open(path.as_ref())
        .map_err(|e| ExportCheckError::Unreadable(format!("{}: {e}", path.as_ref().display())))?;
    validate_export(objects, file)
}

/// Validates an export read from `reader`.
///
/// A path must list at least two cells. Coordinates outside the lattice
/// count as malformed.
pub fn validate_export<R: Read>(
    objects: &ObjectSet,
    mut reader: R,
) -> Result<ExportSummary, ExportCheckError> {
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| ExportCheckError::Unreadable(e.to_string()))?;
    let mut tokens = text.split_ascii_whitespace();

    let side = objects.side();
    let declared: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(ExportCheckError::MalformedHeader)?;

    let mut used = vec![false; (side as usize).pow(3)];
    let mut cells_seen = 0usize;

    for path in 0..declared {
        let length: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .filter(|&len| len >= 2)
            .ok_or(ExportCheckError::MalformedLength { path })?;

        let mut first = None;
        let mut last = None;
        for cell in 0..length {
            let coord = next_coord(&mut tokens, side)
                .ok_or(ExportCheckError::MalformedCoordinate { path, cell })?;
            let id = CellId::from_coord(coord, side);
            if std::mem::replace(&mut used[id.index()], true) {
                return Err(ExportCheckError::DuplicateCell { path, coord });
            }
            if cell == 0 {
                first = Some(coord);
            }
            last = Some(coord);
        }
        cells_seen += length;

        let first = first.and_then(|c| objects.owner_at(c));
        let last = last.and_then(|c| objects.owner_at(c));
        if first.is_none() || first != last {
            return Err(ExportCheckError::EndpointMismatch { path, first, last });
        }
    }

    if tokens.next().is_some() {
        return Err(ExportCheckError::TrailingData { declared });
    }

    Ok(ExportSummary {
        paths: declared,
        cells: cells_seen,
    })
}

fn next_coord<'t, I>(tokens: &mut I, side: u32) -> Option<Coord>
where
    I: Iterator<Item = &'t str>,
{
    let mut component = || tokens.next().and_then(|t| t.parse::<u32>().ok());
    let coord = Coord::new(component()?, component()?, component()?);
    coord.in_bounds(side).then_some(coord)
}
