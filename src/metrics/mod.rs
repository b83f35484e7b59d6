//! Scoring and validation.
//!
//! [`count_completed`] is the fitness of a lattice. [`validate_export`]
//! independently re-checks an exported route file.

mod count;
mod validate;

pub use count::{completed_paths, count_completed, verify_lattice, CompletedPath, LatticeDefect};
pub use validate::{validate_export, validate_export_file, ExportCheckError, ExportSummary};
