//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** A small direct-mapped baseline when no shape is given.
//! 2. **Structures:** The raw `(s, E, b)` cache triple and general run options.
//! 3. **Validation:** Conversion of a raw triple into a [`CacheShape`] the simulator accepts.
//!
//! Configuration is supplied by CLI flags or as JSON (see [`Config::from_json`]).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheLine, CacheSet};
use crate::common::{ADDRESS_BITS, CacheShape, ConfigError};

/// Default configuration constants for the simulator.
mod defaults {
    /// Default set index bits (16 sets).
    pub const SET_BITS: u32 = 4;

    /// Default associativity (1 way = direct-mapped).
    pub const WAYS: usize = 1;

    /// Default block offset bits (16-byte blocks).
    pub const BLOCK_BITS: u32 = 4;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use csim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "set_bits": 8, "ways": 2, "block_bits": 4 },
///     "general": { "verbose": true }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.cache.ways, 2);
/// assert!(config.general.verbose);
/// assert_eq!(config.cache.validate().unwrap().num_sets(), 256);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Cache shape.
    #[serde(default)]
    pub cache: CacheConfig,
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
}

impl Config {
    /// Parses a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid JSON for this structure.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }
}

/// General run options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Report the outcome of every trace event.
    #[serde(default)]
    pub verbose: bool,
}

/// Raw, unvalidated cache shape as supplied by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Number of set index bits (`s`); the cache has `2^s` sets.
    #[serde(default = "CacheConfig::default_set_bits")]
    pub set_bits: u32,

    /// Lines per set (`E`).
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Number of block offset bits (`b`); blocks are `2^b` bytes.
    #[serde(default = "CacheConfig::default_block_bits")]
    pub block_bits: u32,
}

impl CacheConfig {
    /// Creates a raw configuration from the cachelab `s`, `E`, `b` triple.
    pub const fn new(set_bits: u32, ways: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            ways,
            block_bits,
        }
    }

    const fn default_set_bits() -> u32 {
        defaults::SET_BITS
    }

    const fn default_ways() -> usize {
        defaults::WAYS
    }

    const fn default_block_bits() -> u32 {
        defaults::BLOCK_BITS
    }

    /// Checks the triple and produces the shape the simulator runs with.
    ///
    /// Zero set bits (fully associative) and zero block bits (1-byte blocks) are accepted.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::ZeroAssociativity`] if `ways` is 0.
    /// - [`ConfigError::AddressWidthExceeded`] if `set_bits + block_bits` exceeds 64.
    /// - [`ConfigError::TooManySets`] if `2^set_bits` does not fit in a `usize`.
    /// - [`ConfigError::StorageOverflow`] if the line metadata for `2^set_bits * ways`
    ///   lines would exceed `isize::MAX` bytes, the largest allocation Rust permits.
    pub fn validate(&self) -> Result<CacheShape, ConfigError> {
        if self.ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        let width = self.set_bits.checked_add(self.block_bits);
        if width.is_none_or(|w| w > ADDRESS_BITS) {
            return Err(ConfigError::AddressWidthExceeded {
                set_bits: self.set_bits,
                block_bits: self.block_bits,
            });
        }
        if self.set_bits >= usize::BITS {
            return Err(ConfigError::TooManySets {
                set_bits: self.set_bits,
            });
        }
        if self.storage_bytes().is_none_or(|bytes| bytes > isize::MAX.unsigned_abs()) {
            return Err(ConfigError::StorageOverflow {
                set_bits: self.set_bits,
                ways: self.ways,
            });
        }
        Ok(CacheShape::new_unchecked(
            self.set_bits,
            self.ways,
            self.block_bits,
        ))
    }

    /// Bytes of set and line metadata a cache of this shape allocates, or `None` on overflow.
    ///
    /// Requires `set_bits < usize::BITS`.
    fn storage_bytes(&self) -> Option<usize> {
        let sets = 1usize << self.set_bits;
        let lines = sets
            .checked_mul(self.ways)?
            .checked_mul(size_of::<CacheLine>())?;
        sets.checked_mul(size_of::<CacheSet>())?.checked_add(lines)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(defaults::SET_BITS, defaults::WAYS, defaults::BLOCK_BITS)
    }
}
