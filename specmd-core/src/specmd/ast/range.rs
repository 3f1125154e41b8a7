//! Position and span tracking for source locations
//!
//! ## Types
//!
//! - [`Position`] - A line:column position in source text
//! - [`Span`] - A start/end pair, optionally tagged with the file it came from
//!
//! Lines and columns are 1-based, matching what editors and error pointers show. Spans are
//! informational only: no pass depends on them for correctness, they exist so that errors and
//! renderers can point back into the source.

use std::fmt;
use std::path::{Path, PathBuf};

/// Represents a position in source text (line and column, both 1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A source range with an optional file identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub file: Option<PathBuf>,
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            file: None,
            start,
            end,
        }
    }

    /// Span covering whole lines `first..=last` where the last line has `last_len` characters
    pub fn lines(first: usize, last: usize, last_len: usize) -> Self {
        Self::new(Position::new(first, 1), Position::new(last, last_len + 1))
    }

    /// Tag this span with the file it was read from
    pub fn in_file(mut self, file: impl AsRef<Path>) -> Self {
        self.file = Some(file.as_ref().to_path_buf());
        self
    }

    /// Check if a position falls inside this span
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:", file.display())?;
        }
        write!(f, "{}..{}", self.start, self.end)
    }
}
