//! Source location tracking for error reporting
//!
//! ML is a line-oriented language: every statement lives on exactly one
//! line, so a location is a filename plus a 1-based line number.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A location in an ML source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub filename: String,
    pub line: u32,
}

impl SourceLocation {
    /// Create a location with filename
    pub fn new(filename: &str, line: u32) -> Self {
        Self {
            filename: filename.to_string(),
            line,
        }
    }

    /// Create a location with the placeholder filename (common pattern in tests)
    pub fn new_simple(line: u32) -> Self {
        Self::new("<input>", line)
    }

    /// Create a dummy location for testing
    pub fn dummy() -> Self {
        Self::new("<unknown>", 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.filename, self.line)
    }
}
