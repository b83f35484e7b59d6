//! Object and cost model.
//!
//! An object is a generator/equipment endpoint pair. Its pairing cost
//! `3·(N−1) − manhattan(generator, equipment)` is both its construction
//! priority and the penalty other routes pay for trampling its endpoints
//! while it is still unrouted.

mod priority;
mod types;

pub use priority::{PriorityEntry, PriorityList};
pub use types::{pairing_cost, ObjectId, ObjectPair, ObjectSet};
