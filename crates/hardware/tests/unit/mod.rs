//! # Unit Components
//!
//! Organizes the tests by simulator component, leaf-first.


/// Shape validation and JSON configuration.
pub mod config;

/// Cache lines, sets and the set array.
pub mod cache;


/// Counter bookkeeping and result reporting.
pub mod stats;
