//! Set-Associative Cache Model.
//!
//! This module implements the storage side of the simulator: `2^s` sets of `E`
//! lines each, sized once from a [`CacheShape`]. It tracks only metadata
//! (validity, tag, recency), never block contents. Hit/miss accounting and the
//! LRU clock live in [`Simulator`](crate::sim::Simulator).

/// Cache lines and sets with LRU victim selection.
pub mod set;

pub use set::{CacheLine, CacheSet};

use crate::common::{Addr, CacheShape};

/// The cache: an indexed collection of sets, exclusively owned by one simulator.
#[derive(Clone, Debug)]
pub struct Cache {
    shape: CacheShape,
    sets: Box<[CacheSet]>,
}

impl Cache {
    /// Creates a cache with every line invalid.
    pub fn new(shape: CacheShape) -> Self {
        let sets = (0..shape.num_sets())
            .map(|_| CacheSet::new(shape.ways()))
            .collect();
        Self { shape, sets }
    }

    /// The shape this cache was built from.
    pub const fn shape(&self) -> CacheShape {
        self.shape
    }

    /// Number of sets, `2^s`.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Returns the set at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`. Indices produced by
    /// [`CacheShape::decode`] are always in range.
    #[inline(always)]
    pub fn set(&self, index: usize) -> &CacheSet {
        &self.sets[index]
    }

    /// Mutable access to the set at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets()`.
    #[inline(always)]
    pub fn set_mut(&mut self, index: usize) -> &mut CacheSet {
        &mut self.sets[index]
    }

    /// Checks if the block containing `addr` is resident.
    ///
    /// Does not update recency.
    pub fn contains(&self, addr: Addr) -> bool {
        let decoded = self.shape.decode(addr);
        self.set(decoded.set_index).find_hit(decoded.tag).is_some()
    }

    /// Number of valid lines across all sets.
    pub fn occupancy(&self) -> usize {
        self.sets.iter().map(CacheSet::occupancy).sum()
    }
}
