//! The cell grid with its embedded doubly linked paths.

use super::coord::{Axis, CellId, Coord, Direction};

/// Link state of one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Not on any path.
    Open,
    /// First cell of a path.
    Head,
    /// Last cell of a path.
    Tail,
    /// Inner cell of a path.
    Interior,
}

/// Per-cell path record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCell {
    pub prev: Option<CellId>,
    pub next: Option<CellId>,
    pub coord: Coord,
}

impl PathCell {
    pub fn state(&self) -> CellState {
        match (self.prev, self.next) {
            (None, None) => CellState::Open,
            (None, Some(_)) => CellState::Head,
            (Some(_), None) => CellState::Tail,
            (Some(_), Some(_)) => CellState::Interior,
        }
    }
}

/// A cubic lattice of `side³` cells whose links form disjoint simple paths.
///
/// Link operations do no bounds or cycle checking; keeping the paths
/// simple is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    side: u32,
    cells: Vec<PathCell>,
}

impl Lattice {
    /// Creates a lattice with every cell Open.
    ///
    /// # Panics
    /// If `side` is zero or `side³` does not fit in a `u32`.
    pub fn new(side: u32) -> Self {
        assert!(side > 0, "lattice side must be positive");
        let len = side
            .checked_mul(side)
            .and_then(|sq| sq.checked_mul(side))
            .expect("lattice cell count overflows u32");

        let mut cells = Vec::with_capacity(len as usize);
        for x in 0..side {
            for y in 0..side {
                for z in 0..side {
                    cells.push(PathCell {
                        prev: None,
                        next: None,
                        coord: Coord::new(x, y, z),
                    });
                }
            }
        }
        Self { side, cells }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Id of the cell at `coord`, or `None` if out of range.
    pub fn cell_id(&self, coord: Coord) -> Option<CellId> {
        coord
            .in_bounds(self.side)
            .then(|| CellId::from_coord(coord, self.side))
    }

    pub fn cell(&self, id: CellId) -> &PathCell {
        &self.cells[id.index()]
    }

    pub fn coord(&self, id: CellId) -> Coord {
        self.cells[id.index()].coord
    }

    /// Iterates over every cell id in index order.
    pub fn ids(&self) -> impl Iterator<Item = CellId> {
        (0..self.cells.len()).map(CellId::from_index)
    }

    pub fn state(&self, id: CellId) -> CellState {
        self.cell(id).state()
    }

    #[inline]
    pub fn is_open(&self, id: CellId) -> bool {
        self.state(id) == CellState::Open
    }

    #[inline]
    pub fn is_head(&self, id: CellId) -> bool {
        self.state(id) == CellState::Head
    }

    #[inline]
    pub fn is_tail(&self, id: CellId) -> bool {
        self.state(id) == CellState::Tail
    }

    #[inline]
    pub fn is_interior(&self, id: CellId) -> bool {
        self.state(id) == CellState::Interior
    }

    /// Sets `a.next = b` and `b.prev = a`.
    ///
    /// `a` must have no successor and `b` no predecessor.
    #[inline]
    pub fn link(&mut self, a: CellId, b: CellId) {
        debug_assert!(self.cells[a.index()].next.is_none());
        debug_assert!(self.cells[b.index()].prev.is_none());
        self.cells[a.index()].next = Some(b);
        self.cells[b.index()].prev = Some(a);
    }

    #[inline]
    pub fn unlink_forward(&mut self, a: CellId) {
        self.cells[a.index()].next = None;
    }

    #[inline]
    pub fn unlink_backward(&mut self, a: CellId) {
        self.cells[a.index()].prev = None;
    }

    /// Adjacent cell along `axis`, or `None` past the boundary.
    pub fn neighbor(&self, id: CellId, axis: Axis, direction: Direction) -> Option<CellId> {
        let coord = self.coord(id);
        let value = coord.get(axis);
        let moved = match direction {
            Direction::Plus if value + 1 < self.side => value + 1,
            Direction::Minus if value > 0 => value - 1,
            _ => return None,
        };
        let target = match axis {
            Axis::X => Coord { x: moved, ..coord },
            Axis::Y => Coord { y: moved, ..coord },
            Axis::Z => Coord { z: moved, ..coord },
        };
        Some(CellId::from_coord(target, self.side))
    }

    /// Opens the whole path passing through `id`.
    ///
    /// The forward chain is cleared cell by cell until its tail, then the
    /// backward chain until its head. Opening an Open cell is a no-op.
    pub fn sever(&mut self, id: CellId) {
        let mut cursor = self.cells[id.index()].next.take();
        while let Some(cell) = cursor {
            let record = &mut self.cells[cell.index()];
            cursor = record.next.take();
            record.prev = None;
        }

        let mut cursor = self.cells[id.index()].prev.take();
        while let Some(cell) = cursor {
            let record = &mut self.cells[cell.index()];
            cursor = record.prev.take();
            record.next = None;
        }
    }

    /// Walks a path forward starting at `start` (inclusive).
    ///
    /// Never yields more cells than the lattice holds.
    pub fn walk(&self, start: CellId) -> PathWalk<'_> {
        PathWalk {
            lattice: self,
            cursor: Some(start),
            remaining: self.cells.len(),
        }
    }

    /// Overwrites this lattice with `other`, reusing the allocation.
    ///
    /// # Panics
    /// If the two lattices have different sides.
    pub fn copy_from(&mut self, other: &Lattice) {
        assert_eq!(self.side, other.side, "lattice sides differ");
        self.cells.copy_from_slice(&other.cells);
    }

    /// Opens every cell.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.prev = None;
            cell.next = None;
        }
    }

    /// Number of cells that lie on some path.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.state() != CellState::Open)
            .count()
    }
}

/// Forward iterator over a path, returned by [`Lattice::walk`].
pub struct PathWalk<'a> {
    lattice: &'a Lattice,
    cursor: Option<CellId>,
    remaining: usize,
}

impl Iterator for PathWalk<'_> {
    type Item = CellId;

    fn next(&mut self) -> Option<CellId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.cursor?;
        self.remaining -= 1;
        self.cursor = self.lattice.cell(current).next;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(lattice: &Lattice, x: u32, y: u32, z: u32) -> CellId {
        lattice.cell_id(Coord::new(x, y, z)).unwrap()
    }

    #[test]
    fn test_new_is_all_open() {
        let lattice = Lattice::new(4);
        assert_eq!(lattice.len(), 64);
        assert!(lattice.ids().all(|c| lattice.is_open(c)));
        assert_eq!(lattice.occupied(), 0);
    }

    #[test]
    fn test_coords_match_ids() {
        let lattice = Lattice::new(3);
        for c in lattice.ids() {
            assert_eq!(lattice.cell_id(lattice.coord(c)), Some(c));
        }
        assert_eq!(lattice.cell_id(Coord::new(3, 0, 0)), None);
    }

    #[test]
    fn test_link_states() {
        let mut lattice = Lattice::new(3);
        let a = id(&lattice, 0, 0, 0);
        let b = id(&lattice, 0, 0, 1);
        let c = id(&lattice, 0, 0, 2);
        lattice.link(a, b);
        lattice.link(b, c);

        assert!(lattice.is_head(a));
        assert!(lattice.is_interior(b));
        assert!(lattice.is_tail(c));

        lattice.unlink_forward(b);
        lattice.unlink_backward(c);
        assert!(lattice.is_tail(b));
        assert!(lattice.is_open(c));
    }

    #[test]
    fn test_neighbor_boundaries() {
        let lattice = Lattice::new(3);
        let origin = id(&lattice, 0, 0, 0);
        assert_eq!(lattice.neighbor(origin, Axis::X, Direction::Minus), None);
        assert_eq!(
            lattice.neighbor(origin, Axis::X, Direction::Plus),
            Some(id(&lattice, 1, 0, 0))
        );
        let corner = id(&lattice, 2, 2, 2);
        assert_eq!(lattice.neighbor(corner, Axis::Z, Direction::Plus), None);
        assert_eq!(
            lattice.neighbor(corner, Axis::Y, Direction::Minus),
            Some(id(&lattice, 2, 1, 2))
        );
    }

    #[test]
    fn test_sever_from_middle_opens_whole_path() {
        let mut lattice = Lattice::new(3);
        let path: Vec<CellId> = (0..3)
            .map(|z| id(&lattice, 0, 0, z))
            .chain((1..3).map(|y| id(&lattice, 0, y, 2)))
            .collect();
        for w in path.windows(2) {
            lattice.link(w[0], w[1]);
        }
        let other_a = id(&lattice, 2, 2, 0);
        let other_b = id(&lattice, 2, 2, 1);
        lattice.link(other_a, other_b);

        lattice.sever(path[2]);

        assert!(path.iter().all(|&c| lattice.is_open(c)));
        assert!(lattice.is_head(other_a));
        assert!(lattice.is_tail(other_b));
    }

    #[test]
    fn test_sever_open_cell_is_noop() {
        let mut lattice = Lattice::new(2);
        let before = lattice.clone();
        lattice.sever(id(&lattice, 1, 1, 1));
        assert_eq!(lattice, before);
    }

    #[test]
    fn test_walk_follows_next() {
        let mut lattice = Lattice::new(3);
        let a = id(&lattice, 1, 1, 1);
        let b = id(&lattice, 1, 2, 1);
        let c = id(&lattice, 2, 2, 1);
        lattice.link(a, b);
        lattice.link(b, c);
        let walked: Vec<CellId> = lattice.walk(a).collect();
        assert_eq!(walked, vec![a, b, c]);
    }

    #[test]
    fn test_copy_from_and_reset() {
        let mut source = Lattice::new(2);
        let a = id(&source, 0, 0, 0);
        let b = id(&source, 0, 0, 1);
        source.link(a, b);

        let mut target = Lattice::new(2);
        target.copy_from(&source);
        assert_eq!(target, source);

        target.reset();
        assert_eq!(target, Lattice::new(2));
    }
}
