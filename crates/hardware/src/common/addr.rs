//! Byte addresses and their decomposition into cache fields.
//!
//! This module is the address decoder of the simulator. It provides:
//! 1. **Type Safety:** A strong type for byte addresses so that tags, set indices and
//!    raw addresses cannot be mixed up.
//! 2. **Cache Shape:** The validated `(s, E, b)` triple fixed at startup.
//! 3. **Decoding:** Splitting an address into tag, set index and block offset.

use std::fmt;

use super::constants::ADDRESS_BITS;

/// A byte address in the simulated address space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Addr(pub u64);

impl Addr {
    /// Creates a new address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}

impl From<u64> for Addr {
    fn from(addr: u64) -> Self {
        Self(addr)
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// An address split into the three fields the cache cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAddr {
    /// High-order bits above the set index field.
    pub tag: u64,
    /// Index of the set the block maps to. Always `< num_sets`.
    pub set_index: usize,
    /// Byte within the block. Carried for completeness; the hit/miss model ignores it.
    pub offset: u64,
}

/// Validated cache geometry.
///
/// Only obtainable through [`CacheConfig::validate`](crate::config::CacheConfig::validate),
/// so every instance satisfies `set_bits + block_bits <= 64`, `ways >= 1`
/// and `set_bits < usize::BITS`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheShape {
    set_bits: u32,
    ways: usize,
    block_bits: u32,
}

/// Returns a mask with the low `bits` bits set.
#[inline(always)]
const fn low_mask(bits: u32) -> u64 {
    if bits >= ADDRESS_BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl CacheShape {
    pub(crate) const fn new_unchecked(set_bits: u32, ways: usize, block_bits: u32) -> Self {
        Self {
            set_bits,
            ways,
            block_bits,
        }
    }

    /// Number of set index bits (`s`).
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Lines per set (`E`).
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of block offset bits (`b`).
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Number of sets, `2^s`.
    pub const fn num_sets(&self) -> usize {
        1usize << self.set_bits
    }

    /// Block size in bytes, `2^b`. Saturates at `u64::MAX` when `b == 64`.
    pub const fn block_size(&self) -> u64 {
        match 1u64.checked_shl(self.block_bits) {
            Some(size) => size,
            None => u64::MAX,
        }
    }

    /// Splits `addr` into tag, set index and block offset.
    ///
    /// Equivalent to `offset = addr % B`, `set = (addr / B) % S` and
    /// `tag = addr / (B * S)`, but computed with shifts so a shape using
    /// all 64 address bits does not overflow.
    #[inline]
    pub const fn decode(&self, addr: Addr) -> DecodedAddr {
        let raw = addr.val();
        let offset = raw & low_mask(self.block_bits);
        let above_offset = match raw.checked_shr(self.block_bits) {
            Some(v) => v,
            None => 0,
        };
        let set_index = (above_offset & low_mask(self.set_bits)) as usize;
        let tag = match raw.checked_shr(self.set_bits + self.block_bits) {
            Some(v) => v,
            None => 0,
        };
        DecodedAddr {
            tag,
            set_index,
            offset,
        }
    }
}

impl fmt::Display for CacheShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={} E={} b={} ({} sets, {}-byte blocks)",
            self.set_bits,
            self.ways,
            self.block_bits,
            self.num_sets(),
            self.block_size()
        )
    }
}
