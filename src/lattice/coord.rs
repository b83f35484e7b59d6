//! Cell coordinates, cell ids and axis moves.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer coordinate of a lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Coord {
    pub const fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }

    /// L1 distance between two coordinates.
    pub fn manhattan(&self, other: &Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) + self.z.abs_diff(other.z)
    }

    /// Whether every component lies in `[0, side)`.
    pub fn in_bounds(&self, side: u32) -> bool {
        self.x < side && self.y < side && self.z < side
    }

    /// Component along `axis`.
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Opaque index of a lattice cell.
///
/// Only the lattice and the object model mint ids, from in-range
/// coordinates, so an id always names a real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(u32);

impl CellId {
    /// Linear index `x·N² + y·N + z`.
    pub(crate) fn from_coord(coord: Coord, side: u32) -> Self {
        CellId((coord.x * side + coord.y) * side + coord.z)
    }

    pub(crate) fn from_index(index: usize) -> Self {
        CellId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lattice axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Unit step direction along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Plus,
    Minus,
}

/// All six unit moves, in the order the omni-directional search tries them.
pub const UNIT_MOVES: [(Axis, Direction); 6] = [
    (Axis::Z, Direction::Plus),
    (Axis::Z, Direction::Minus),
    (Axis::Y, Direction::Plus),
    (Axis::Y, Direction::Minus),
    (Axis::X, Direction::Plus),
    (Axis::X, Direction::Minus),
];
