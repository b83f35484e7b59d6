//! Greedy priority-ordered route construction.

use log::debug;

use crate::lattice::Lattice;
use crate::objects::{ObjectSet, PriorityList};
use crate::search::{PathSearch, SearchConfig, SearchStrategy};

/// Counters from one construction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstructStats {
    /// Pairs whose endpoints were both Open when their turn came.
    pub attempted: usize,

    /// Pairs connected by the monotonic search.
    pub directed: usize,

    /// Pairs connected by the omni-directional fallback.
    pub omni: usize,

    /// Searches that ran out of budget.
    pub exhausted: usize,
}

impl ConstructStats {
    /// Pairs connected during the pass.
    pub fn connected(&self) -> usize {
        self.directed + self.omni
    }
}

/// Routes every still-unrouted pair in priority order.
#[derive(Debug, Clone)]
pub struct RouteConstructor<'a> {
    search: PathSearch<'a>,
}

impl<'a> RouteConstructor<'a> {
    pub fn new(objects: &'a ObjectSet, config: SearchConfig) -> Self {
        Self {
            search: PathSearch::new(objects, config),
        }
    }

    pub fn objects(&self) -> &'a ObjectSet {
        self.search.objects()
    }

    /// One pass over `priority`.
    ///
    /// A pair is tried only if both endpoints are Open. The monotonic
    /// search runs first; the omni-directional search runs only if both
    /// endpoints are still Open afterwards. Pairs that stay unconnected are
    /// left Open.
    pub fn construct(&self, priority: &PriorityList, lattice: &mut Lattice) -> ConstructStats {
        let objects = self.search.objects();
        let mut stats = ConstructStats::default();

        for entry in priority.iter() {
            let object = entry.object;
            if !objects.is_unrouted(object, lattice) {
                continue;
            }
            stats.attempted += 1;

            let outcome = self.search.route(lattice, object, SearchStrategy::Directed);
            stats.exhausted += usize::from(outcome.exhausted);
            if outcome.found() {
                stats.directed += 1;
            }

            if objects.is_unrouted(object, lattice) {
                let outcome = self.search.route(lattice, object, SearchStrategy::Omni);
                stats.exhausted += usize::from(outcome.exhausted);
                if outcome.found() {
                    stats.omni += 1;
                    debug!(
                        "object {object} connected by omni-directional search ({} cells, cost {})",
                        outcome.path.as_ref().map_or(0, |p| p.len()),
                        outcome.cost().unwrap_or_default()
                    );
                }
            }
        }

        stats
    }
}
