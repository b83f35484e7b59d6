//! Library error type.
//!
//! Covers everything that can go wrong before a search runs: reading the
//! coordinate files, building the object model and validating configs.
//! A pair that cannot be routed is not an error.

use std::path::PathBuf;

use thiserror::Error;

use crate::lattice::Coord;

/// Errors raised while loading inputs, building the object model or
/// starting a run.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("coordinate {coord} is outside a lattice of side {side}")]
    OutOfRange { coord: Coord, side: u32 },

    #[error("expected {expected} coordinates, found {found} in {path}")]
    CountMismatch {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    #[error("cell {coord} is an endpoint of more than one pair (objects {first} and {second})")]
    SharedCell {
        coord: Coord,
        first: usize,
        second: usize,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for this crate.
pub type RouteResult<T> = Result<T, RouteError>;
