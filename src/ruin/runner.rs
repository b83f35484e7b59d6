//! Ruin-and-recreate execution loop.

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace};

use super::config::RuinConfig;
use super::types::{
    Improvement, ImprovementObserver, NoopObserver, RecreateOperator, RuinOperator, ZoneRuin,
};
use crate::construct::RouteConstructor;
use crate::error::{RouteError, RouteResult};
use crate::lattice::Lattice;
use crate::metrics::count_completed;
use crate::objects::{ObjectSet, PriorityList};
use crate::random::{create_rng, time_seed};

/// Result of a ruin-and-recreate run.
#[derive(Debug, Clone)]
pub struct RuinResult {
    /// The best lattice found.
    pub best: Lattice,

    /// Completed pairs in `best`.
    pub completed: usize,

    /// Completed pairs after the initial construction.
    pub initial_completed: usize,

    /// Total generations executed.
    pub generations: usize,

    /// Number of accepted generations.
    pub improvements: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Seed the run used.
    pub seed: u64,

    /// Completed count after the initial construction and after every
    /// accepted generation. Strictly increasing.
    pub score_history: Vec<usize>,
}

/// Executes the ruin-and-recreate loop.
pub struct RuinRecreateRunner;

impl RuinRecreateRunner {
    /// Runs with the zone ruin and the greedy constructor.
    ///
    /// # Stack
    ///
    /// Construction falls back to the omni-directional search, which nests
    /// up to `N³` frames (see [`PathSearch::route`]). At `N = 20` call this
    /// from a thread with a large stack.
    ///
    /// [`PathSearch::route`]: crate::search::PathSearch::route
    pub fn run(objects: &ObjectSet, config: &RuinConfig) -> RouteResult<RuinResult> {
        Self::run_with_cancel(objects, config, None)
    }

    /// Runs with an optional cancellation token.
    ///
    /// # Stack
    ///
    /// Same depth bound as [`run`](Self::run).
    pub fn run_with_cancel(
        objects: &ObjectSet,
        config: &RuinConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<RuinResult> {
        Self::run_with_observer(objects, config, &mut NoopObserver, cancel)
    }

    /// Runs with the default operators, an improvement observer and an
    /// optional cancellation token.
    ///
    /// # Stack
    ///
    /// Same depth bound as [`run`](Self::run).
    pub fn run_with_observer<O: ImprovementObserver>(
        objects: &ObjectSet,
        config: &RuinConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<RuinResult> {
        let ruin = ZoneRuin::new(config.width_min, config.width_max);
        let recreate = RouteConstructor::new(objects, config.search);
        Self::run_with_operators(objects, &ruin, &recreate, config, observer, cancel)
    }

    /// Runs with caller-supplied operators.
    ///
    /// The initial lattice is built by `recreate` from an all-Open lattice.
    /// Each generation then copies the best lattice, ruins the copy,
    /// reshuffles the priority list, recreates, and keeps the copy only if
    /// it completes strictly more pairs.
    ///
    /// # Stack
    ///
    /// Bounded by the recursion depth of `recreate`; with
    /// [`RouteConstructor`] that is up to `N³` frames.
    pub fn run_with_operators<D, C, O>(
        objects: &ObjectSet,
        ruin: &D,
        recreate: &C,
        config: &RuinConfig,
        observer: &mut O,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RouteResult<RuinResult>
    where
        D: RuinOperator,
        C: RecreateOperator,
        O: ImprovementObserver,
    {
        config.validate().map_err(RouteError::Config)?;

        let seed = config.seed.unwrap_or_else(time_seed);
        let mut rng = create_rng(seed);

        let mut priority = PriorityList::from_objects(objects);
        priority.reshuffle_and_rank(&mut rng);

        let mut parent = objects.new_lattice();
        let stats = recreate.recreate(&priority, &mut parent);
        let mut parent_score = count_completed(objects, &parent);
        info!(
            "initial construction: {parent_score} of {} pairs connected ({} by fallback search)",
            objects.len(),
            stats.omni
        );

        let mut child = parent.clone();
        let initial_completed = parent_score;
        let mut score_history = vec![parent_score];
        let mut improvements = 0usize;
        let mut generations = 0usize;
        let mut cancelled = false;
        let mut stagnant = 0usize;

        while stagnant < config.generation_limit {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            generations += 1;

            // Destroy
            child.copy_from(&parent);
            let opened = ruin.ruin(&mut child, &mut rng);

            // Re-rank, recreate
            priority.reshuffle_and_rank(&mut rng);
            let stats = recreate.recreate(&priority, &mut child);

            // Score
            let child_score = count_completed(objects, &child);
            trace!(
                "generation {generations}: {} opened {opened}, {} reconnected {}, score {child_score}",
                ruin.name(),
                recreate.name(),
                stats.connected()
            );

            // Accept / reject
            if child_score > parent_score {
                mem::swap(&mut parent, &mut child);
                info!(
                    "update total = {child_score} (was {parent_score}), after {stagnant} stagnant generations"
                );
                observer.on_improvement(&Improvement {
                    generation: generations,
                    previous: parent_score,
                    completed: child_score,
                    lattice: &parent,
                });
                parent_score = child_score;
                score_history.push(child_score);
                improvements += 1;
                stagnant = 0;
            } else {
                stagnant += 1;
            }
        }

        debug!(
            "ruin-and-recreate finished: {parent_score} pairs, {improvements} improvements, {generations} generations"
        );

        Ok(RuinResult {
            best: parent,
            completed: parent_score,
            initial_completed,
            generations,
            improvements,
            cancelled,
            seed,
            score_history,
        })
    }
}
