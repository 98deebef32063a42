//! Trace replay.
//!
//! Provides the trace reader that turns text into access events and the
//! simulator that drives those events through the cache.

/// Access simulator, outcomes and the LRU clock.
pub mod simulator;

/// Valgrind trace parsing.
pub mod trace;

pub use simulator::{AccessOutcome, Replay, Simulator};
pub use trace::{AccessKind, TraceEvent, TraceReader};
