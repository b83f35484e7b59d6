//! Backtracking path search.
//!
//! Depth-first search over Open cells. Each step links the edge into the
//! lattice provisionally, recurses, and unlinks on the way back, so the
//! lattice itself is the visited set: a cell already on the partial path
//! is no longer Open and cannot be re-entered.

use std::ops::{Deref, DerefMut};

use log::trace;

use super::config::SearchConfig;
use super::types::{BestPath, SearchOutcome, SearchStrategy};
use crate::lattice::{Axis, CellId, Direction, Lattice, UNIT_MOVES};
use crate::objects::{ObjectId, ObjectSet};

/// Axis order of the monotonic search.
const DIRECTED_AXES: [Axis; 3] = [Axis::Z, Axis::Y, Axis::X];

/// Searches for the cheapest path between two Open cells.
#[derive(Debug, Clone)]
pub struct PathSearch<'a> {
    objects: &'a ObjectSet,
    config: SearchConfig,
}

impl<'a> PathSearch<'a> {
    pub fn new(objects: &'a ObjectSet, config: SearchConfig) -> Self {
        Self { objects, config }
    }

    pub fn objects(&self) -> &'a ObjectSet {
        self.objects
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Searches from `object`'s generator to its equipment and links the
    /// best path found, if any.
    ///
    /// # Stack
    ///
    /// The search recurses once per path cell. A directed path is at most
    /// `3·(N−1) + 1` cells, but an omni-directional one can reach `N³`
    /// cells, so at `N = 20` the omni search nests up to 8000 frames. Run it
    /// on a thread with a large stack (the binary uses 512 MiB).
    pub fn route(
        &self,
        lattice: &mut Lattice,
        object: ObjectId,
        strategy: SearchStrategy,
    ) -> SearchOutcome {
        let outcome = self.find(lattice, object, strategy);
        if let Some(path) = &outcome.path {
            path.apply(lattice);
        }
        outcome
    }

    /// Like [`route`](Self::route) but leaves the lattice unchanged.
    ///
    /// # Stack
    ///
    /// Same depth bound as [`route`](Self::route).
    pub fn find(
        &self,
        lattice: &mut Lattice,
        object: ObjectId,
        strategy: SearchStrategy,
    ) -> SearchOutcome {
        self.find_between(
            lattice,
            self.objects.generator_cell(object),
            self.objects.equipment_cell(object),
            object,
            strategy,
        )
    }

    /// Cheapest path from `from` to `to` on behalf of `routing`.
    ///
    /// Penalties are charged for entering endpoints of pairs other than
    /// `routing`. Both cells must be Open; otherwise nothing is searched.
    /// The lattice is restored before returning.
    pub fn find_between(
        &self,
        lattice: &mut Lattice,
        from: CellId,
        to: CellId,
        routing: ObjectId,
        strategy: SearchStrategy,
    ) -> SearchOutcome {
        if !lattice.is_open(from) || !lattice.is_open(to) {
            return SearchOutcome::empty(strategy);
        }

        let limit = match strategy {
            SearchStrategy::Directed => self.config.directed_limit,
            SearchStrategy::Omni => self.config.omni_limit,
        };
        let mut walk = Walk {
            objects: self.objects,
            target: to,
            routing,
            strategy,
            limit,
            expansions: 0,
            exhausted: false,
            best: None,
        };
        walk.step(lattice, from, 0);

        if walk.exhausted {
            trace!(
                "{strategy:?} search for object {routing} spent its budget of {} expansions",
                walk.expansions
            );
        }

        SearchOutcome {
            strategy,
            path: walk.best,
            expansions: walk.expansions,
            exhausted: walk.exhausted,
        }
    }
}

/// State of one depth-first search.
struct Walk<'a> {
    objects: &'a ObjectSet,
    target: CellId,
    routing: ObjectId,
    strategy: SearchStrategy,
    limit: Option<usize>,
    expansions: usize,
    exhausted: bool,
    best: Option<BestPath>,
}

impl Walk<'_> {
    fn step(&mut self, lattice: &mut Lattice, from: CellId, cost: u64) {
        if from == self.target {
            self.judge(lattice, cost);
            return;
        }

        match self.strategy {
            SearchStrategy::Directed => {
                let here = lattice.coord(from);
                let there = lattice.coord(self.target);
                for axis in DIRECTED_AXES {
                    let direction = match here.get(axis).cmp(&there.get(axis)) {
                        std::cmp::Ordering::Less => Direction::Plus,
                        std::cmp::Ordering::Greater => Direction::Minus,
                        std::cmp::Ordering::Equal => continue,
                    };
                    if let Some(next) = lattice.neighbor(from, axis, direction) {
                        self.advance(lattice, from, next, cost);
                    }
                }
            }
            SearchStrategy::Omni => {
                for (axis, direction) in UNIT_MOVES {
                    if let Some(next) = lattice.neighbor(from, axis, direction) {
                        self.advance(lattice, from, next, cost);
                    }
                }
            }
        }
    }

    /// Tries the move `from -> next`.
    fn advance(&mut self, lattice: &mut Lattice, from: CellId, next: CellId, cost: u64) {
        if self.exhausted || !lattice.is_open(next) {
            return;
        }
        let total = cost + u64::from(self.objects.penalty(lattice, next, self.routing));
        // Penalties are non-negative: a partial path at or above the best
        // cost can never be recorded.
        if self.best.as_ref().is_some_and(|best| total >= best.cost) {
            return;
        }
        if self.limit.is_some_and(|limit| self.expansions >= limit) {
            self.exhausted = true;
            return;
        }
        self.expansions += 1;

        let mut link = ProvisionalLink::new(lattice, from, next);
        self.step(&mut link, next, total);
    }

    /// Records the partial path ending at the target if it beats the best.
    fn judge(&mut self, lattice: &Lattice, cost: u64) {
        if self.best.as_ref().is_some_and(|best| cost >= best.cost) {
            return;
        }
        let mut cells = self.best.take().map(|b| b.cells).unwrap_or_default();
        cells.clear();
        let mut cursor = Some(self.target);
        while let Some(cell) = cursor {
            cells.push(cell);
            cursor = lattice.cell(cell).prev;
        }
        self.best = Some(BestPath { cost, cells });
    }
}

/// An edge linked for the duration of one recursive call.
///
/// Dropping the guard unlinks the edge, so the lattice is restored on every
/// exit path, unwinding included.
struct ProvisionalLink<'l> {
    lattice: &'l mut Lattice,
    from: CellId,
    to: CellId,
}

impl<'l> ProvisionalLink<'l> {
    fn new(lattice: &'l mut Lattice, from: CellId, to: CellId) -> Self {
        lattice.link(from, to);
        Self { lattice, from, to }
    }
}

impl Deref for ProvisionalLink<'_> {
    type Target = Lattice;

    fn deref(&self) -> &Lattice {
        self.lattice
    }
}

impl DerefMut for ProvisionalLink<'_> {
    fn deref_mut(&mut self) -> &mut Lattice {
        self.lattice
    }
}

impl Drop for ProvisionalLink<'_> {
    fn drop(&mut self) {
        self.lattice.unlink_forward(self.from);
        self.lattice.unlink_backward(self.to);
    }
}
