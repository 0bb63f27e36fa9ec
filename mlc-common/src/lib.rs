//! ML Transpiler - Common Types and Utilities
//!
//! This crate contains shared types, error definitions, and utilities
//! used across all components of the ML transpiler.

pub mod error;
pub mod source_loc;
pub mod types;

pub use error::{Category, Diagnostic, ErrorReporter, Severity, TranslateError};
pub use source_loc::SourceLocation;
pub use types::*;
