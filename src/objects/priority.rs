//! Construction-order priority list.

use rand::Rng;

use super::types::{ObjectId, ObjectSet};

/// One slot of the priority list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityEntry {
    pub object: ObjectId,
    /// The object's pairing cost; only ever reordered.
    pub value: u32,
}

/// Order in which the route constructor visits the pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityList {
    entries: Vec<PriorityEntry>,
}

impl PriorityList {
    /// One entry per object in object order, valued by pairing cost.
    pub fn from_objects(objects: &ObjectSet) -> Self {
        let entries = objects
            .ids()
            .map(|object| PriorityEntry {
                object,
                value: objects.pair(object).pairing_cost,
            })
            .collect();
        Self { entries }
    }

    /// Entries for exactly `order`, in that order.
    pub fn from_order(objects: &ObjectSet, order: &[ObjectId]) -> Self {
        let entries = order
            .iter()
            .map(|&object| PriorityEntry {
                object,
                value: objects.pair(object).pairing_cost,
            })
            .collect();
        Self { entries }
    }

    /// Shuffles, then stable-sorts by value, highest first.
    ///
    /// The shuffle decides the relative order of equal-valued entries, so
    /// near-tied pairs take turns at going first across generations.
    pub fn reshuffle_and_rank<R: Rng>(&mut self, rng: &mut R) {
        let len = self.entries.len();
        for i in 0..len {
            let j = rng.random_range(0..len);
            self.entries.swap(i, j);
        }
        self.rank();
    }

    /// Stable sort by value, highest first, without shuffling.
    pub fn rank(&mut self) {
        self.entries.sort_by(|a, b| b.value.cmp(&a.value));
    }

    pub fn entries(&self) -> &[PriorityEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &PriorityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
