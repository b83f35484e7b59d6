//! Route constructor.
//!
//! Drives the path search over every pair in priority order, monotonic
//! search first and omni-directional search as a fallback.

mod constructor;

pub use constructor::{ConstructStats, RouteConstructor};
