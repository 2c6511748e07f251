//! Source coordinates in the parser's one-based convention.
//!
//! These are plain data carriers. Conversion to editor coordinates and all
//! containment arithmetic live in `grove-core`'s coordinate module.

use serde::{Deserialize, Serialize};

/// A one-based (line, column) pair. Zero marks a synthetic or unknown
/// coordinate, as produced for nodes that have no source text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourcePosition {
    pub line: u32,
    pub column: u32,
}

impl SourcePosition {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start and end of a node. The end column is one past the last character.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourceRange {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl SourceRange {
    pub const fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Range for nodes without source text (binary classes, synthetic nodes).
    pub const fn synthetic() -> Self {
        Self::new(0, 0, 0, 0)
    }

    pub const fn start(&self) -> SourcePosition {
        SourcePosition::new(self.start_line, self.start_col)
    }

    pub const fn end(&self) -> SourcePosition {
        SourcePosition::new(self.end_line, self.end_col)
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
