//! Set-associative cache simulator library.
//!
//! This crate models a single-level, set-associative cache with LRU replacement
//! and replays valgrind memory traces against it:
//! 1. **Common:** Addresses, the validated cache shape and address decoding.
//! 2. **Cache:** Sets of lines carrying validity, tag and recency metadata.
//! 3. **Simulation:** Trace parsing and the hit/miss/eviction access algorithm.
//! 4. **Configuration and statistics:** Shape validation and result reporting.
//!
//! Only metadata is modeled. No data moves, nothing is timed, and accesses are
//! processed strictly in trace order.
//!
//! ```
//! use csim_core::{CacheConfig, Simulator, TraceEvent};
//!
//! let shape = CacheConfig::new(1, 2, 1).validate().unwrap();
//! let mut sim = Simulator::new(shape);
//! let modify: TraceEvent = " M 0,1".parse().unwrap();
//! let stats = sim.run([Ok(modify)], |_, _| {}).unwrap();
//! assert_eq!((stats.hits, stats.misses, stats.evictions), (1, 1, 0));
//! ```

/// Common types and constants (addresses, cache shape, errors).
pub mod common;
/// Cache configuration (defaults, JSON loading, shape validation).
pub mod config;
/// Cache storage model (lines, sets, cache).
pub mod cache;
/// Trace parsing and access simulation.
pub mod sim;
/// Hit, miss and eviction counters and reporting.
pub mod stats;

/// Raw cache triple; call [`CacheConfig::validate`] to obtain a [`CacheShape`].
pub use crate::config::{CacheConfig, Config};
/// Validated cache geometry and byte address type.
pub use crate::common::{Addr, CacheShape};
/// Access simulator; construct with `Simulator::new`.
pub use crate::sim::{AccessOutcome, Simulator, TraceEvent, TraceReader};
/// Final run counters.
pub use crate::stats::SimStats;
