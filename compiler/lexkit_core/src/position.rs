//! Scanner positions.

use std::fmt;

/// A location in the source, as tracked by the cursor.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanPosition {
    /// Byte offset from the start of the source.
    pub offset: usize,
    /// Line number, starting at 1.
    pub line: usize,
    /// Column number in characters, starting at 1.
    pub column: usize,
}

impl ScanPosition {
    /// Position of the first character of a source.
    pub const START: ScanPosition = ScanPosition {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub const fn new(offset: usize, line: usize, column: usize) -> Self {
        ScanPosition {
            offset,
            line,
            column,
        }
    }
}

impl Default for ScanPosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for ScanPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
