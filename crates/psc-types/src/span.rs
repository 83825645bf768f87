use serde::{Deserialize, Serialize};
use std::fmt;

/// Source location of a token or node.
///
/// A merged line never spans more than one source line, so a span is a line
/// number plus a column range. All values are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub line: u32,
    #[serde(rename = "column")]
    pub start_col: u32,
    #[serde(rename = "end_column")]
    pub end_col: u32,
}

impl Span {
    /// Create a new span.
    pub fn new(line: u32, start_col: u32, end_col: u32) -> Self {
        Self {
            line,
            start_col,
            end_col,
        }
    }

    /// Create a zero-width span at a single position.
    pub fn point(line: u32, col: u32) -> Self {
        Self::new(line, col, col)
    }

    /// Merge two spans into one that covers both.
    ///
    /// Spans of different lines keep the line of `self`.
    pub fn merge(self, other: Span) -> Span {
        if self.line != other.line {
            return self;
        }
        Span::new(
            self.line,
            self.start_col.min(other.start_col),
            self.end_col.max(other.end_col),
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.start_col)
    }
}
