//! Source locations carried by AST nodes.

use std::fmt;

/// Line and column of the construct an AST node was built from.
///
/// Both are 1-based. `CodeLocation::UNKNOWN` (0, 0) marks nodes synthesised
/// by the host rather than parsed from script text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct CodeLocation {
    pub line: u32,
    pub column: u32,
}

impl CodeLocation {
    /// Location for host-synthesised nodes.
    pub const UNKNOWN: CodeLocation = CodeLocation { line: 0, column: 0 };

    /// Create a location.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        CodeLocation { line, column }
    }

    /// Whether this location points into script text.
    #[inline]
    pub const fn is_known(self) -> bool {
        self.line != 0
    }
}

impl fmt::Debug for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for CodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_format() {
        assert_eq!(CodeLocation::new(12, 4).to_string(), "Line 12, column 4");
    }

    #[test]
    fn test_unknown_location() {
        assert!(!CodeLocation::UNKNOWN.is_known());
        assert!(CodeLocation::new(1, 1).is_known());
    }
}
