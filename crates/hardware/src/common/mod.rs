//! Common types shared by every part of the simulator.
//!
//! It includes:
//! 1. **Address Types:** Byte addresses, the validated cache shape and the address decoder.
//! 2. **Constants:** Address width and the LRU clock origin.
//! 3. **Error Handling:** Configuration and trace error types.

/// Address type, cache shape and address decoding.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

pub use addr::{Addr, CacheShape, DecodedAddr};
pub use constants::ADDRESS_BITS;
pub use error::{ConfigError, TraceError};
