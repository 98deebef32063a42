//! Error definitions.
//!
//! This module defines the recoverable failures of the simulator. It provides:
//! 1. **Configuration errors:** Rejected cache shapes and unreadable config files,
//!    reported before any access is simulated.
//! 2. **Trace errors:** I/O failures and malformed lines from the trace reader.
//!
//! Internal invariant violations inside the cache model are not represented here;
//! they are programming errors and panic via assertions.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::constants::ADDRESS_BITS;

/// A cache configuration that cannot be simulated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Associativity (`E`) was zero.
    #[error("associativity (E) must be at least 1")]
    ZeroAssociativity,

    /// Set index and block offset fields do not fit in an address.
    #[error(
        "set bits ({set_bits}) + block bits ({block_bits}) exceed the {width}-bit address width",
        width = ADDRESS_BITS
    )]
    AddressWidthExceeded {
        /// Requested set index bits.
        set_bits: u32,
        /// Requested block offset bits.
        block_bits: u32,
    },

    /// `2^s` sets cannot be indexed on this host.
    #[error("{set_bits} set bits cannot be indexed on this host (max {max})", max = usize::BITS - 1)]
    TooManySets {
        /// Requested set index bits.
        set_bits: u32,
    },

    /// The sets and lines of this shape cannot be allocated on this host.
    #[error("2^{set_bits} sets of {ways} lines exceed the memory this host can address")]
    StorageOverflow {
        /// Requested set index bits.
        set_bits: u32,
        /// Requested lines per set.
        ways: usize,
    },

    /// The configuration file could not be read.
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration text was not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A failure while reading or parsing the access trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace file could not be opened.
    #[error("{}: {source}", .path.display())]
    Open {
        /// Path of the trace file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The underlying reader failed.
    #[error("failed to read trace: {0}")]
    Io(#[from] io::Error),

    /// A line did not match `op addr,size`.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number, or 0 when parsed outside a reader.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },
}

impl TraceError {
    /// Builds a `Malformed` error for a line parsed outside of a reader.
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            line: 0,
            reason: reason.into(),
        }
    }

    /// Attaches a line number to a `Malformed` error.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::Malformed { reason, .. } => Self::Malformed { line, reason },
            other => other,
        }
    }
}
