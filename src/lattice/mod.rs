//! Lattice and path model.
//!
//! A cubic grid of cells. Each cell carries optional `prev`/`next` links
//! to a neighboring cell; the links thread disjoint simple paths through
//! the grid. A cell's link pattern defines its state:
//!
//! | prev | next | state    |
//! |------|------|----------|
//! | none | none | Open     |
//! | none | set  | Head     |
//! | set  | none | Tail     |
//! | set  | set  | Interior |

mod coord;
mod grid;

pub use coord::{Axis, CellId, Coord, Direction, UNIT_MOVES};
pub use grid::{CellState, Lattice, PathCell, PathWalk};
