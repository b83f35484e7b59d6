//! Backtracking path search engine.
//!
//! Two strategies share one step rule: a move is legal only into an Open
//! cell, and entering an endpoint of another still-unrouted pair costs
//! that pair's pairing cost. The cheapest complete path wins; ties go to
//! the first one found.
//!
//! - [`SearchStrategy::Directed`] moves only toward the target on each
//!   axis, enumerating shortest L1 paths.
//! - [`SearchStrategy::Omni`] may move in any of six directions and is
//!   used as a fallback when no monotonic path exists.

mod config;
mod engine;
mod types;

pub use config::SearchConfig;
pub use engine::PathSearch;
pub use types::{BestPath, SearchOutcome, SearchStrategy};
