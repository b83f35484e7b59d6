//! Generator/equipment pairs and the cell owner index.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{RouteError, RouteResult};
use crate::lattice::{CellId, Coord, Lattice};

/// Index of an object pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u32);

impl ObjectId {
    pub fn new(index: usize) -> Self {
        ObjectId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pairing cost of two endpoints: `3·(side−1) − manhattan(a, b)`.
///
/// Closer pairs cost more, so they are routed first.
pub fn pairing_cost(side: u32, a: Coord, b: Coord) -> u32 {
    (3 * side.saturating_sub(1)).saturating_sub(a.manhattan(&b))
}

/// One generator/equipment pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectPair {
    pub generator: Coord,
    pub equipment: Coord,
    pub pairing_cost: u32,
}

/// The immutable set of pairs plus the owner index of every endpoint cell.
#[derive(Debug, Clone)]
pub struct ObjectSet {
    side: u32,
    pairs: Vec<ObjectPair>,
    endpoints: Vec<(CellId, CellId)>,
    owners: Vec<Option<ObjectId>>,
}

impl ObjectSet {
    /// Builds the set from `(generator, equipment)` coordinates.
    ///
    /// Fails if a coordinate is out of range or if a cell is used as an
    /// endpoint more than once.
    pub fn new<I>(side: u32, pairs: I) -> RouteResult<Self>
    where
        I: IntoIterator<Item = (Coord, Coord)>,
    {
        if side == 0 {
            return Err(RouteError::Config("lattice side must be positive".into()));
        }
        let cell_count = (side as usize).pow(3);
        let mut owners: Vec<Option<ObjectId>> = vec![None; cell_count];
        let mut built = Vec::new();
        let mut endpoints = Vec::new();

        for (index, (generator, equipment)) in pairs.into_iter().enumerate() {
            let id = ObjectId::new(index);
            let mut claim = |coord: Coord| -> RouteResult<CellId> {
                if !coord.in_bounds(side) {
                    return Err(RouteError::OutOfRange { coord, side });
                }
                let cell = CellId::from_coord(coord, side);
                if let Some(first) = owners[cell.index()] {
                    return Err(RouteError::SharedCell {
                        coord,
                        first: first.index(),
                        second: index,
                    });
                }
                owners[cell.index()] = Some(id);
                Ok(cell)
            };
            let gen_cell = claim(generator)?;
            let equ_cell = claim(equipment)?;

            built.push(ObjectPair {
                generator,
                equipment,
                pairing_cost: pairing_cost(side, generator, equipment),
            });
            endpoints.push((gen_cell, equ_cell));
        }

        Ok(Self {
            side,
            pairs: built,
            endpoints,
            owners,
        })
    }

    /// Synthetic instance with `count` pairs on distinct random cells.
    ///
    /// Fails if the lattice has fewer than `2·count` cells.
    pub fn random<R: Rng>(side: u32, count: usize, rng: &mut R) -> RouteResult<Self> {
        let cell_count = (side as usize).pow(3);
        if count * 2 > cell_count {
            return Err(RouteError::Config(format!(
                "{count} pairs need {} cells, lattice has {cell_count}",
                count * 2
            )));
        }
        let lattice = Lattice::new(side);
        let mut cells: Vec<Coord> = lattice.ids().map(|c| lattice.coord(c)).collect();
        cells.shuffle(rng);
        let pairs: Vec<(Coord, Coord)> = cells
            .chunks_exact(2)
            .take(count)
            .map(|c| (c[0], c[1]))
            .collect();
        Self::new(side, pairs)
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ObjectId> {
        (0..self.pairs.len()).map(ObjectId::new)
    }

    pub fn pair(&self, id: ObjectId) -> &ObjectPair {
        &self.pairs[id.index()]
    }

    pub fn pairs(&self) -> &[ObjectPair] {
        &self.pairs
    }

    #[inline]
    pub fn generator_cell(&self, id: ObjectId) -> CellId {
        self.endpoints[id.index()].0
    }

    #[inline]
    pub fn equipment_cell(&self, id: ObjectId) -> CellId {
        self.endpoints[id.index()].1
    }

    /// Owner of an endpoint cell; `None` for cells that are no endpoint.
    #[inline]
    pub fn owner(&self, cell: CellId) -> Option<ObjectId> {
        self.owners[cell.index()]
    }

    /// Owner lookup by coordinate; `None` when out of range or unowned.
    pub fn owner_at(&self, coord: Coord) -> Option<ObjectId> {
        coord
            .in_bounds(self.side)
            .then(|| self.owner(CellId::from_coord(coord, self.side)))
            .flatten()
    }

    /// Whether both endpoints of `id` are still Open.
    #[inline]
    pub fn is_unrouted(&self, id: ObjectId, lattice: &Lattice) -> bool {
        let (gen_cell, equ_cell) = self.endpoints[id.index()];
        lattice.is_open(gen_cell) && lattice.is_open(equ_cell)
    }

    /// Cost of stepping a path for `routing` into `cell`.
    ///
    /// Non-zero only when `cell` is an endpoint of another pair whose two
    /// endpoints are both still Open; the penalty is that pair's cost.
    pub fn penalty(&self, lattice: &Lattice, cell: CellId, routing: ObjectId) -> u32 {
        match self.owner(cell) {
            Some(owner) if owner != routing && self.is_unrouted(owner, lattice) => {
                self.pairs[owner.index()].pairing_cost
            }
            _ => 0,
        }
    }

    /// A fresh all-Open lattice sized for this set.
    pub fn new_lattice(&self) -> Lattice {
        Lattice::new(self.side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn c(x: u32, y: u32, z: u32) -> Coord {
        Coord::new(x, y, z)
    }

    #[test]
    fn test_pairing_cost_extremes() {
        assert_eq!(pairing_cost(20, c(0, 0, 0), c(19, 19, 19)), 0);
        assert_eq!(pairing_cost(20, c(5, 5, 5), c(5, 5, 6)), 56);
        assert_eq!(pairing_cost(3, c(0, 0, 0), c(2, 2, 2)), 0);
    }

    #[test]
    fn test_owner_index() {
        let set = ObjectSet::new(3, [(c(0, 0, 0), c(2, 2, 2)), (c(1, 1, 1), c(0, 2, 0))]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.owner_at(c(0, 0, 0)), Some(ObjectId::new(0)));
        assert_eq!(set.owner_at(c(2, 2, 2)), Some(ObjectId::new(0)));
        assert_eq!(set.owner_at(c(0, 2, 0)), Some(ObjectId::new(1)));
        assert_eq!(set.owner_at(c(1, 0, 0)), None);
        assert_eq!(set.owner_at(c(5, 0, 0)), None);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = ObjectSet::new(3, [(c(0, 0, 0), c(3, 0, 0))]).unwrap_err();
        assert!(matches!(err, RouteError::OutOfRange { side: 3, .. }));
    }

    #[test]
    fn test_rejects_shared_cell() {
        let err = ObjectSet::new(3, [(c(0, 0, 0), c(1, 0, 0)), (c(2, 0, 0), c(1, 0, 0))])
            .unwrap_err();
        assert!(matches!(
            err,
            RouteError::SharedCell {
                first: 0,
                second: 1,
                ..
            }
        ));

        let err = ObjectSet::new(3, [(c(1, 1, 1), c(1, 1, 1))]).unwrap_err();
        assert!(matches!(err, RouteError::SharedCell { .. }));
    }

    #[test]
    fn test_penalty_only_for_other_open_pairs() {
        let set = ObjectSet::new(3, [(c(0, 0, 0), c(2, 0, 0)), (c(1, 0, 0), c(1, 2, 0))]).unwrap();
        let mut lattice = set.new_lattice();
        let a = ObjectId::new(0);
        let b_gen = set.generator_cell(ObjectId::new(1));
        let a_equ = set.equipment_cell(a);
        let plain = lattice.cell_id(c(2, 2, 2)).unwrap();

        assert_eq!(set.penalty(&lattice, b_gen, a), set.pair(ObjectId::new(1)).pairing_cost);
        assert_eq!(set.penalty(&lattice, a_equ, a), 0);
        assert_eq!(set.penalty(&lattice, plain, a), 0);

        // Once the other pair is partially linked it no longer charges.
        let b_equ = set.equipment_cell(ObjectId::new(1));
        let beside = lattice.cell_id(c(1, 2, 1)).unwrap();
        lattice.link(b_equ, beside);
        assert_eq!(set.penalty(&lattice, b_gen, a), 0);
    }

    #[test]
    fn test_random_instance_distinct_cells() {
        let mut rng = create_rng(5);
        let set = ObjectSet::random(4, 30, &mut rng).unwrap();
        assert_eq!(set.len(), 30);
        let owned = set
            .new_lattice()
            .ids()
            .filter(|&cell| set.owner(cell).is_some())
            .count();
        assert_eq!(owned, 60);
        assert!(ObjectSet::random(2, 5, &mut rng).is_err());
    }

    proptest! {
        #[test]
        fn prop_pairing_cost_in_range(
            side in 2u32..=20,
            a in (0u32..20, 0u32..20, 0u32..20),
            b in (0u32..20, 0u32..20, 0u32..20),
        ) {
            let a = c(a.0 % side, a.1 % side, a.2 % side);
            let b = c(b.0 % side, b.1 % side, b.2 % side);
            let cost = pairing_cost(side, a, b);
            prop_assert!(cost <= 3 * (side - 1));
            prop_assert_eq!(cost + a.manhattan(&b), 3 * (side - 1));
        }

        #[test]
        fn prop_pairing_cost_decreases_with_distance(
            side in 3u32..=20,
            origin in (0u32..20, 0u32..20, 0u32..20),
            far in (0u32..20, 0u32..20, 0u32..20),
            near in (0u32..20, 0u32..20, 0u32..20),
        ) {
            let o = c(origin.0 % side, origin.1 % side, origin.2 % side);
            let f = c(far.0 % side, far.1 % side, far.2 % side);
            let n = c(near.0 % side, near.1 % side, near.2 % side);
            let (df, dn) = (o.manhattan(&f), o.manhattan(&n));
            prop_assume!(df != dn);
            let (cf, cn) = (pairing_cost(side, o, f), pairing_cost(side, o, n));
            if df > dn {
                prop_assert!(cf < cn);
            } else {
                prop_assert!(cf > cn);
            }
        }
    }
}
