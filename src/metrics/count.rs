//! Completed-path counting and structural checks on a lattice.

use thiserror::Error;

use crate::lattice::{CellId, Coord, Lattice};
use crate::objects::{ObjectId, ObjectSet};

/// Number of objects whose generator cell is a path Head.
///
/// Trusts the search invariants: a Head generator is assumed to lead to its
/// own equipment. [`verify_lattice`] checks that assumption.
pub fn count_completed(objects: &ObjectSet, lattice: &Lattice) -> usize {
    objects
        .ids()
        .filter(|&object| lattice.is_head(objects.generator_cell(object)))
        .count()
}

/// A connected pair and its cells from generator to equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedPath {
    pub object: ObjectId,
    pub cells: Vec<Coord>,
}

/// Every connected pair in object order.
pub fn completed_paths(objects: &ObjectSet, lattice: &Lattice) -> Vec<CompletedPath> {
    objects
        .ids()
        .filter(|&object| lattice.is_head(objects.generator_cell(object)))
        .map(|object| CompletedPath {
            object,
            cells: lattice
                .walk(objects.generator_cell(object))
                .map(|cell| lattice.coord(cell))
                .collect(),
        })
        .collect()
}

/// A structural defect found by [`verify_lattice`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeDefect {
    #[error("path of object {object} does not terminate")]
    Cycle { object: ObjectId },

    #[error("path of object {object} steps from {from} to non-adjacent {to}")]
    NonAdjacent {
        object: ObjectId,
        from: Coord,
        to: Coord,
    },

    #[error("path of object {object} has a one-way link at {at}")]
    BrokenBackLink { object: ObjectId, at: Coord },

    #[error("path of object {object} ends at {ends_at} instead of its equipment")]
    WrongTerminal { object: ObjectId, ends_at: Coord },
}

/// Checks every path that starts at a generator Head.
///
/// Each such path must be finite, step between adjacent cells, have
/// matching back links and end at the same object's equipment cell.
pub fn verify_lattice(objects: &ObjectSet, lattice: &Lattice) -> Result<(), LatticeDefect> {
    for object in objects.ids() {
        let start = objects.generator_cell(object);
        if !lattice.is_head(start) {
            continue;
        }

        let mut current = start;
        let mut steps = 0usize;
        while let Some(next) = lattice.cell(current).next {
            steps += 1;
            if steps >= lattice.len() {
                return Err(LatticeDefect::Cycle { object });
            }
            check_step(lattice, object, current, next)?;
            current = next;
        }

        if current != objects.equipment_cell(object) {
            return Err(LatticeDefect::WrongTerminal {
                object,
                ends_at: lattice.coord(current),
            });
        }
    }
    Ok(())
}

fn check_step(
    lattice: &Lattice,
    object: ObjectId,
    from: CellId,
    to: CellId,
) -> Result<(), LatticeDefect> {
    let (a, b) = (lattice.coord(from), lattice.coord(to));
    if a.manhattan(&b) != 1 {
        return Err(LatticeDefect::NonAdjacent {
            object,
            from: a,
            to: b,
        });
    }
    if lattice.cell(to).prev != Some(from) {
        return Err(LatticeDefect::BrokenBackLink { object, at: b });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: u32, y: u32, z: u32) -> Coord {
        Coord::new(x, y, z)
    }

    fn link_coords(lattice: &mut Lattice, coords: &[Coord]) {
        for pair in coords.windows(2) {
            let a = lattice.cell_id(pair[0]).unwrap();
            let b = lattice.cell_id(pair[1]).unwrap();
            lattice.link(a, b);
        }
    }

    fn two_pairs() -> ObjectSet {
        ObjectSet::new(3, [(c(0, 0, 0), c(0, 0, 2)), (c(2, 0, 0), c(2, 2, 0))]).unwrap()
    }

    #[test]
    fn test_count_and_paths() {
        let objects = two_pairs();
        let mut lattice = objects.new_lattice();
        assert_eq!(count_completed(&objects, &lattice), 0);

        link_coords(&mut lattice, &[c(0, 0, 0), c(0, 0, 1), c(0, 0, 2)]);
        assert_eq!(count_completed(&objects, &lattice), 1);

        let paths = completed_paths(&objects, &lattice);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0].object, ObjectId::new(0));
        assert_eq!(paths[0].cells, vec![c(0, 0, 0), c(0, 0, 1), c(0, 0, 2)]);
        assert_eq!(verify_lattice(&objects, &lattice), Ok(()));
    }

    #[test]
    fn test_wrong_terminal() {
        let objects = two_pairs();
        let mut lattice = objects.new_lattice();
        link_coords(&mut lattice, &[c(0, 0, 0), c(0, 0, 1)]);
        assert_eq!(
            verify_lattice(&objects, &lattice),
            Err(LatticeDefect::WrongTerminal {
                object: ObjectId::new(0),
                ends_at: c(0, 0, 1),
            })
        );
    }

    #[test]
    fn test_non_adjacent_step() {
        let objects = two_pairs();
        let mut lattice = objects.new_lattice();
        link_coords(&mut lattice, &[c(2, 0, 0), c(2, 2, 0)]);
        assert!(matches!(
            verify_lattice(&objects, &lattice),
            Err(LatticeDefect::NonAdjacent { .. })
        ));
    }

    #[test]
    fn test_cycle_detected() {
        let objects = two_pairs();
        let mut lattice = objects.new_lattice();
        link_coords(&mut lattice, &[c(0, 0, 0), c(0, 1, 0), c(0, 1, 1), c(0, 0, 1)]);
        // Close the loop back onto the second cell without touching the head.
        let last = lattice.cell_id(c(0, 0, 1)).unwrap();
        let second = lattice.cell_id(c(0, 1, 0)).unwrap();
        lattice.unlink_backward(second);
        lattice.link(last, second);
        assert!(matches!(
            verify_lattice(&objects, &lattice),
            Err(LatticeDefect::Cycle { .. }) | Err(LatticeDefect::BrokenBackLink { .. })
        ));
    }
}
