//! Cache lines and sets.
//!
//! A set is a fixed array of `E` lines allocated once at startup. Lines are never
//! added or removed; only their fields are overwritten. Recency is a logical
//! timestamp supplied by the caller, so the set itself holds no clock.
//!
//! # Performance
//!
//! - `find_hit()`, `find_free()`, `select_victim()`, `is_full()`: O(E)
//! - **Space Complexity:** O(E)

/// A single storage slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Whether the line holds a block. `tag` is meaningless when false.
    pub valid: bool,
    /// Tag of the resident block.
    pub tag: u64,
    /// Logical time of the last hit or fill. `0` for a line never touched.
    pub recency: u64,
}

impl CacheLine {
    /// Returns true if this line holds the block identified by `tag`.
    #[inline(always)]
    pub const fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// A fixed-capacity collection of `E` lines.
#[derive(Clone, Debug)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
}

impl CacheSet {
    /// Creates a set of `ways` invalid lines.
    pub fn new(ways: usize) -> Self {
        Self {
            lines: vec![CacheLine::default(); ways].into_boxed_slice(),
        }
    }

    /// Associativity of this set.
    pub fn ways(&self) -> usize {
        self.lines.len()
    }

    /// Returns the line in `way`.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    pub fn line(&self, way: usize) -> &CacheLine {
        &self.lines[way]
    }

    /// Iterates over the lines in way order.
    pub fn lines(&self) -> impl Iterator<Item = &CacheLine> {
        self.lines.iter()
    }

    /// Number of valid lines.
    pub fn occupancy(&self) -> usize {
        self.lines.iter().filter(|l| l.valid).count()
    }

    /// Returns the way holding `tag`, if any.
    ///
    /// At most one valid line per set may carry a given tag; a second match
    /// means the set is corrupted and trips a debug assertion.
    pub fn find_hit(&self, tag: u64) -> Option<usize> {
        let way = self.lines.iter().position(|l| l.matches(tag))?;
        debug_assert!(
            !self.lines[way + 1..].iter().any(|l| l.matches(tag)),
            "tag {tag:#x} resident in more than one way"
        );
        Some(way)
    }

    /// Returns the lowest-indexed invalid way, or `None` if the set is full.
    pub fn find_free(&self) -> Option<usize> {
        self.lines.iter().position(|l| !l.valid)
    }

    /// True iff every line is valid.
    pub fn is_full(&self) -> bool {
        self.lines.iter().all(|l| l.valid)
    }

    /// Picks the least recently used way for eviction.
    ///
    /// Ties on the minimum recency go to the lowest way index. With a single
    /// monotonically increasing stamp source every valid line carries a
    /// distinct recency, so ties only arise between never-touched lines.
    ///
    /// # Panics
    ///
    /// Panics if called on a set that still has a free way.
    pub fn select_victim(&self) -> usize {
        assert!(self.is_full(), "eviction requested on a set with a free way");
        self.lines
            .iter()
            .enumerate()
            .min_by_key(|(_, l)| l.recency)
            // A full set has at least one line, so the minimum always exists.
            .map_or(0, |(way, _)| way)
    }

    /// Marks `way` as used at logical time `stamp`.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    pub fn touch(&mut self, way: usize, stamp: u64) {
        let line = &mut self.lines[way];
        debug_assert!(line.valid, "touching an invalid line");
        debug_assert!(stamp > line.recency, "recency must increase");
        line.recency = stamp;
    }

    /// Installs `tag` in `way` at logical time `stamp`, replacing whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `way >= self.ways()`.
    pub fn fill(&mut self, way: usize, tag: u64, stamp: u64) {
        self.lines[way] = CacheLine {
            valid: true,
            tag,
            recency: stamp,
        };
    }
}
