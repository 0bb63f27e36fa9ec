//! Error handling for the ML transpiler
//!
//! This module defines common error types and error reporting utilities
//! used throughout the translation pipeline. Syntax-class problems are
//! collected as diagnostics so a single run surfaces every error in the
//! program; file and process problems abort the stage chain.

use crate::source_loc::SourceLocation;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type that encompasses all stages of the transpile-and-run pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslateError {
    #[error("syntax error at {location}: {message}")]
    Syntax {
        location: SourceLocation,
        message: String,
    },

    #[error("file error: {message}")]
    File { message: String },

    #[error("build failed: {message}")]
    Build { message: String },

    #[error("run failed: {message}")]
    Run { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl TranslateError {
    /// Create a syntax error
    pub fn syntax_error(message: String, location: SourceLocation) -> Self {
        TranslateError::Syntax { location, message }
    }

    /// Create a file error
    pub fn file_error(message: String) -> Self {
        TranslateError::File { message }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for TranslateError {
    fn from(err: std::io::Error) -> Self {
        TranslateError::File {
            message: err.to_string(),
        }
    }
}

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Diagnostic categories, matching the two error classes of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Syntax,
    File,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Syntax => write!(f, "SYNTAX"),
            Category::File => write!(f, "FILE"),
        }
    }
}

/// A diagnostic message with category, location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub category: Category,
    pub message: String,
    pub location: SourceLocation,
}

impl Diagnostic {
    pub fn syntax(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            category: Category::Syntax,
            message,
            location,
        }
    }

    pub fn file(message: String, location: SourceLocation) -> Self {
        Self {
            severity: Severity::Error,
            category: Category::File,
            message,
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] at {}: {}",
            self.severity, self.category, self.location, self.message
        )
    }
}

/// Error reporter for collecting and displaying diagnostics
///
/// Syntax errors are report-and-skip: the offending line or definition is
/// dropped and translation continues, so one run collects every problem.
/// Overall success is decided once, from `has_errors`, after both passes.
#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            error_count: 0,
        }
    }

    /// Report a syntax error diagnostic
    pub fn syntax_error(&mut self, message: String, location: SourceLocation) {
        self.diagnostics.push(Diagnostic::syntax(message, location));
        self.error_count += 1;
    }

    /// Check if any errors have been reported
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Get the number of errors
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Get all diagnostics
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Print all diagnostics to stderr
    pub fn print_diagnostics(&self) {
        for diagnostic in &self.diagnostics {
            eprintln!("{}", diagnostic);
        }
    }

    /// Create a summary string
    pub fn summary(&self) -> String {
        match self.error_count {
            0 => "no errors".to_string(),
            1 => "1 error".to_string(),
            n => format!("{} errors", n),
        }
    }
}
