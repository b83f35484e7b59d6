//! Ruin and recreate operators, the ruin region, and improvement hooks.

use log::trace;
use rand::Rng;

use crate::construct::{ConstructStats, RouteConstructor};
use crate::lattice::{Coord, Lattice};
use crate::objects::PriorityList;

/// A ruin operator opens part of a lattice in place.
pub trait RuinOperator: Send + Sync {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Opens paths in `lattice`. Returns the number of paths opened.
    fn ruin<R: Rng>(&self, lattice: &mut Lattice, rng: &mut R) -> usize;
}

/// A recreate operator routes pairs into a partially opened lattice.
pub trait RecreateOperator: Send + Sync {
    /// Returns a human-readable name for this operator.
    fn name(&self) -> &str;

    /// Connects what it can, visiting pairs in `priority` order.
    fn recreate(&self, priority: &PriorityList, lattice: &mut Lattice) -> ConstructStats;
}

impl RecreateOperator for RouteConstructor<'_> {
    fn name(&self) -> &str {
        "greedy-construct"
    }

    fn recreate(&self, priority: &PriorityList, lattice: &mut Lattice) -> ConstructStats {
        self.construct(priority, lattice)
    }
}

/// Axis-aligned box of cells, `origin` inclusive, `extent` cells per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub origin: Coord,
    pub extent: [u32; 3],
}

impl Region {
    pub fn new(origin: Coord, extent: [u32; 3]) -> Self {
        Self { origin, extent }
    }

    /// Random in-bounds box with per-axis width in `[width_min, width_max]`.
    pub fn random<R: Rng>(side: u32, width_min: u32, width_max: u32, rng: &mut R) -> Self {
        let mut origin = [0u32; 3];
        let mut extent = [0u32; 3];
        for (start, width) in origin.iter_mut().zip(extent.iter_mut()) {
            *width = rng.random_range(width_min..=width_max).min(side);
            *start = rng.random_range(0..=side - *width);
        }
        Self {
            origin: Coord::new(origin[0], origin[1], origin[2]),
            extent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extent.contains(&0)
    }

    pub fn cell_count(&self) -> usize {
        self.extent.iter().map(|&w| w as usize).product()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        let within = |value: u32, start: u32, width: u32| value >= start && value - start < width;
        within(coord.x, self.origin.x, self.extent[0])
            && within(coord.y, self.origin.y, self.extent[1])
            && within(coord.z, self.origin.z, self.extent[2])
    }

    /// Opens every path with a cell inside the box, whole.
    ///
    /// Returns the number of paths opened.
    pub fn sever(&self, lattice: &mut Lattice) -> usize {
        let end = |start: u32, width: u32| (start + width).min(lattice.side());
        let (x_end, y_end, z_end) = (
            end(self.origin.x, self.extent[0]),
            end(self.origin.y, self.extent[1]),
            end(self.origin.z, self.extent[2]),
        );

        let mut opened = 0;
        for x in self.origin.x..x_end {
            for y in self.origin.y..y_end {
                for z in self.origin.z..z_end {
                    let Some(cell) = lattice.cell_id(Coord::new(x, y, z)) else {
                        continue;
                    };
                    if !lattice.is_open(cell) {
                        lattice.sever(cell);
                        opened += 1;
                    }
                }
            }
        }
        opened
    }
}

/// Opens every path touching one random box per call.
#[derive(Debug, Clone, Copy)]
pub struct ZoneRuin {
    pub width_min: u32,
    pub width_max: u32,
}

impl ZoneRuin {
    pub fn new(width_min: u32, width_max: u32) -> Self {
        Self {
            width_min,
            width_max,
        }
    }
}

impl RuinOperator for ZoneRuin {
    fn name(&self) -> &str {
        "zone"
    }

    fn ruin<R: Rng>(&self, lattice: &mut Lattice, rng: &mut R) -> usize {
        let region = Region::random(lattice.side(), self.width_min, self.width_max, rng);
        let opened = region.sever(lattice);
        trace!("zone ruin {region:?} opened {opened} paths");
        opened
    }
}

/// An accepted generation, handed to an [`ImprovementObserver`].
#[derive(Debug, Clone, Copy)]
pub struct Improvement<'a> {
    /// Generations executed so far, this one included.
    pub generation: usize,

    /// Completed pairs before this generation.
    pub previous: usize,

    /// Completed pairs now.
    pub completed: usize,

    /// The new best lattice.
    pub lattice: &'a Lattice,
}

/// Receives every accepted improvement, e.g. to export it.
pub trait ImprovementObserver {
    fn on_improvement(&mut self, improvement: &Improvement<'_>);
}

impl<F> ImprovementObserver for F
where
    F: FnMut(&Improvement<'_>),
{
    fn on_improvement(&mut self, improvement: &Improvement<'_>) {
        self(improvement)
    }
}

/// Observer that ignores improvements.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ImprovementObserver for NoopObserver {
    fn on_improvement(&mut self, _improvement: &Improvement<'_>) {}
}
