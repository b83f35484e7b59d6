//! Vertex-disjoint pair routing on a cubic lattice.
//!
//! Connects generator/equipment endpoint pairs with simple paths through an
//! `N×N×N` grid so that no cell is shared between paths, maximizing the
//! number of connected pairs.
//!
//! - **Lattice**: cell grid whose `prev`/`next` links thread the paths.
//! - **Objects**: endpoint pairs, pairing costs and the construction
//!   priority list.
//! - **Search**: exhaustive backtracking path search, monotonic or
//!   omni-directional, with penalties for trampling other pairs' endpoints.
//! - **Construct**: greedy route constructor driven by the priority list.
//! - **Ruin**: ruin-and-recreate improvement loop with elitist acceptance.
//! - **Metrics**: completed-path counting, lattice checks and export
//!   validation.
//! - **IO**: coordinate inputs, route exports and gnuplot scripts.
//!
//! # Example
//!
//! ```
//! use u_lattice_route::objects::ObjectSet;
//! use u_lattice_route::random::create_rng;
//! use u_lattice_route::ruin::{RuinConfig, RuinRecreateRunner};
//!
//! let mut rng = create_rng(7);
//! let objects = ObjectSet::random(5, 10, &mut rng).unwrap();
//! let config = RuinConfig::default()
//!     .with_generation_limit(20)
//!     .with_width(2, 3)
//!     .with_seed(7);
//!
//! let result = RuinRecreateRunner::run(&objects, &config).unwrap();
//! assert!(result.completed >= result.initial_completed);
//! ```

pub mod construct;
pub mod error;
pub mod io;
pub mod lattice;
pub mod metrics;
pub mod objects;
pub mod random;
pub mod ruin;
pub mod search;

pub use error::{RouteError, RouteResult};
