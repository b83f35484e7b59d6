//! Ruin-and-recreate search over routed lattices.
//!
//! Each generation copies the best lattice, opens every path touching a
//! random box, re-ranks the pairs with a random shuffle, and greedily
//! reconnects. The copy replaces the best lattice only when it completes
//! strictly more pairs.
//!
//! # References
//!
//! Schrimpf, Schneider, Stamm-Wilbrandt & Dueck (2000), "Record Breaking
//! Optimization Results Using the Ruin and Recreate Principle"

mod config;
mod runner;
mod types;

pub use config::RuinConfig;
pub use runner::{RuinRecreateRunner, RuinResult};
pub use types::{
    Improvement, ImprovementObserver, NoopObserver, RecreateOperator, Region, RuinOperator,
    ZoneRuin,
};
