//! Memory trace parsing.
//!
//! Traces use the valgrind `lackey` text format, one access per line:
//!
//! ```text
//! I 0400d7d4,8
//!  M 0421c7f0,4
//!  L 04f6b868,8
//!  S 7ff0005c8,8
//! ```
//!
//! Instruction fetches start in column 0 and data accesses are indented by a
//! single space. The address is hexadecimal and the size decimal. Leading and
//! trailing whitespace is ignored and blank lines are skipped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::common::{Addr, TraceError};

/// Kind of a traced memory operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// Instruction fetch (`I`). Never reaches the data cache.
    Instruction,
    /// Data load (`L`).
    Load,
    /// Data store (`S`).
    Store,
    /// Load followed by a store to the same address (`M`).
    Modify,
}

impl AccessKind {
    /// Parses the one-letter operation code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "I" => Some(Self::Instruction),
            "L" => Some(Self::Load),
            "S" => Some(Self::Store),
            "M" => Some(Self::Modify),
            _ => None,
        }
    }

    /// The one-letter operation code.
    pub const fn code(self) -> char {
        match self {
            Self::Instruction => 'I',
            Self::Load => 'L',
            Self::Store => 'S',
            Self::Modify => 'M',
        }
    }

    /// Number of cache accesses this operation drives.
    pub const fn access_count(self) -> usize {
        match self {
            Self::Instruction => 0,
            Self::Load | Self::Store => 1,
            Self::Modify => 2,
        }
    }
}

/// One parsed trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceEvent {
    /// Operation kind.
    pub kind: AccessKind,
    /// Byte address accessed.
    pub addr: Addr,
    /// Access width in bytes. Informational only.
    pub size: u32,
}

impl TraceEvent {
    /// Creates an event.
    pub const fn new(kind: AccessKind, addr: u64, size: u32) -> Self {
        Self {
            kind,
            addr: Addr::new(addr),
            size,
        }
    }
}

impl FromStr for TraceEvent {
    type Err = TraceError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (code, operands) = line
            .split_once(char::is_whitespace)
            .ok_or_else(|| TraceError::malformed(format!("expected `op addr,size`, got {line:?}")))?;
        let kind = AccessKind::from_code(code)
            .ok_or_else(|| TraceError::malformed(format!("unknown operation {code:?}")))?;
        let (addr, size) = operands
            .trim()
            .split_once(',')
            .ok_or_else(|| TraceError::malformed(format!("missing `,size` in {operands:?}")))?;

        let addr = addr.trim();
        let digits = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .unwrap_or(addr);
        let addr = u64::from_str_radix(digits, 16)
            .map_err(|e| TraceError::malformed(format!("bad address {addr:?}: {e}")))?;
        let size = size
            .trim()
            .parse::<u32>()
            .map_err(|e| TraceError::malformed(format!("bad size {size:?}: {e}")))?;

        Ok(Self::new(kind, addr, size))
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:x},{}", self.kind.code(), self.addr, self.size)
    }
}

/// Streams [`TraceEvent`]s out of a buffered reader.
///
/// Yields one `Result` per non-blank line, tagging parse errors with their
/// 1-based line number. Iteration ends after the first I/O error.
#[derive(Debug)]
pub struct TraceReader<R> {
    lines: io::Lines<R>,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> TraceReader<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_no: 0,
            done: false,
        }
    }
}

impl TraceReader<BufReader<File>> {
    /// Opens a trace file.
    ///
    /// # Errors
    ///
    /// Returns [`TraceError::Open`] if the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: PathBuf::from(path),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceEvent, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            };
            self.line_no += 1;
            if text.trim().is_empty() {
                continue;
            }
            let line = self.line_no;
            return Some(text.parse().map_err(|e: TraceError| e.at_line(line)));
        }
    }
}
