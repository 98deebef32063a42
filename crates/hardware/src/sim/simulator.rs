//! Simulator: owns the cache, the LRU clock and the run counters side-by-side.
//!
//! Every access follows the same path:
//! 1. **Decode:** Split the address into tag and set index.
//! 2. **Lookup:** A valid line with a matching tag is a hit; it is stamped with a fresh time.
//! 3. **Fill:** On a miss the tag goes into the lowest free way, or into the least
//!    recently used way when the set is full (an eviction).
//!
//! A modify is two back-to-back accesses to the same address. The first always
//! leaves the block resident with the newest stamp, so the second always hits.

use std::fmt;

use tracing::{debug, trace};

use super::trace::{AccessKind, TraceEvent};
use crate::cache::Cache;
use crate::common::constants::FIRST_STAMP;
use crate::common::{Addr, CacheShape, DecodedAddr, TraceError};
use crate::stats::SimStats;

/// Result of a single cache access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// Block was resident.
    Hit,
    /// Block was filled into a free way.
    Miss,
    /// Block replaced the least recently used line of a full set.
    MissEviction,
}

impl AccessOutcome {
    /// True for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// True if a valid line was replaced.
    pub const fn evicted(self) -> bool {
        matches!(self, Self::MissEviction)
    }
}

impl fmt::Display for AccessOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::MissEviction => "miss eviction",
        })
    }
}

/// Outcomes produced by replaying one trace event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Replay {
    /// Instruction fetch; the data cache was not consulted.
    Skipped,
    /// Load or store.
    Single(AccessOutcome),
    /// Modify: the load half and the store half.
    Double(AccessOutcome, AccessOutcome),
}

impl Replay {
    /// Iterates the outcomes in the order the accesses happened.
    pub fn outcomes(&self) -> impl Iterator<Item = AccessOutcome> {
        let (first, second) = match *self {
            Self::Skipped => (None, None),
            Self::Single(a) => (Some(a), None),
            Self::Double(a, b) => (Some(a), Some(b)),
        };
        first.into_iter().chain(second)
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, outcome) in self.outcomes().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{outcome}")?;
        }
        Ok(())
    }
}

/// Top-level simulator for one trace run.
#[derive(Clone, Debug)]
pub struct Simulator {
    cache: Cache,
    stats: SimStats,
    clock: u64,
}

impl Simulator {
    /// Creates a simulator with a cold cache and zeroed counters.
    pub fn new(shape: CacheShape) -> Self {
        debug!(%shape, "building cache");
        Self {
            cache: Cache::new(shape),
            stats: SimStats::default(),
            clock: FIRST_STAMP - 1,
        }
    }

    /// The cache being simulated.
    pub const fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Consumes the simulator, returning its final counters.
    pub fn into_stats(self) -> SimStats {
        self.stats
    }

    /// Last logical timestamp handed out, or 0 before the first access.
    pub const fn clock(&self) -> u64 {
        self.clock
    }

    /// Next logical timestamp. Strictly greater than every previous one.
    #[inline(always)]
    const fn next_stamp(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Performs one cache access and accounts for it.
    pub fn access(&mut self, addr: Addr) -> AccessOutcome {
        let DecodedAddr { tag, set_index, .. } = self.cache.shape().decode(addr);
        let stamp = self.next_stamp();
        let set = self.cache.set_mut(set_index);

        let outcome = if let Some(way) = set.find_hit(tag) {
            set.touch(way, stamp);
            AccessOutcome::Hit
        } else if let Some(way) = set.find_free() {
            set.fill(way, tag, stamp);
            AccessOutcome::Miss
        } else {
            let way = set.select_victim();
            set.fill(way, tag, stamp);
            AccessOutcome::MissEviction
        };

        self.stats.record(outcome);
        trace!(addr = addr.val(), set_index, tag, %outcome, "access");
        outcome
    }

    /// Drives the accesses one trace event stands for.
    pub fn replay(&mut self, event: &TraceEvent) -> Replay {
        match event.kind {
            AccessKind::Instruction => Replay::Skipped,
            AccessKind::Load | AccessKind::Store => Replay::Single(self.access(event.addr)),
            AccessKind::Modify => {
                let load = self.access(event.addr);
                let store = self.access(event.addr);
                debug_assert!(store.is_hit(), "store half of a modify must hit");
                Replay::Double(load, store)
            }
        }
    }

    /// Replays a whole trace in order.
    ///
    /// `observer` sees every event together with its outcomes, which is how
    /// verbose reporting is driven.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error yielded by `events`.
    pub fn run<I, F>(&mut self, events: I, mut observer: F) -> Result<SimStats, TraceError>
    where
        I: IntoIterator<Item = Result<TraceEvent, TraceError>>,
        F: FnMut(&TraceEvent, &Replay),
    {
        for event in events {
            let event = event?;
            let replay = self.replay(&event);
            observer(&event, &replay);
        }
        debug!(
            hits = self.stats.hits,
            misses = self.stats.misses,
            evictions = self.stats.evictions,
            "trace exhausted"
        );
        Ok(self.stats)
    }
}
