//! Search strategies and results.

use crate::lattice::{CellId, Lattice};

/// Which neighbors a search step may move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStrategy {
    /// Only moves that reduce the remaining delta on their axis, so every
    /// candidate is a shortest L1 path.
    Directed,

    /// Any of the six in-range unit moves.
    Omni,
}

/// Cheapest complete path found by a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestPath {
    /// Sum of penalties paid along the path.
    pub cost: u64,

    /// Cells from the target back to the origin, both inclusive.
    pub cells: Vec<CellId>,
}

impl BestPath {
    /// Links the path into `lattice`.
    ///
    /// Every cell of the path must be Open.
    pub fn apply(&self, lattice: &mut Lattice) {
        for pair in self.cells.windows(2) {
            lattice.link(pair[1], pair[0]);
        }
    }

    /// Number of cells on the path.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Result of one search call.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub strategy: SearchStrategy,

    /// The best path, if any complete path was found.
    pub path: Option<BestPath>,

    /// Provisional steps taken.
    pub expansions: usize,

    /// Whether the expansion budget ran out before the search finished.
    pub exhausted: bool,
}

impl SearchOutcome {
    pub(crate) fn empty(strategy: SearchStrategy) -> Self {
        Self {
            strategy,
            path: None,
            expansions: 0,
            exhausted: false,
        }
    }

    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    pub fn cost(&self) -> Option<u64> {
        self.path.as_ref().map(|p| p.cost)
    }
}
