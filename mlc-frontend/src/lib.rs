//! ML Transpiler - Frontend
//!
//! This crate provides the analysis half of the transpiler:
//! - Line cursor: peekable, rewindable access to the program lines
//! - Validation layer: stateless syntax checks used by every stage
//! - Symbol collector: pass 1, populating the symbol tables and capturing
//!   translated function bodies
//! - Type inference: literal-shape variable kinds and lazy, call-site
//!   driven resolution of function signatures
//! - Expression compiler and statement translator: per-line C emission

pub mod collect;
pub mod cursor;
pub mod expr;
pub mod infer;
pub mod stmt;
pub mod validate;

pub use collect::{is_function_header, skip_function_body, SymbolCollector};
pub use cursor::LineCursor;
pub use stmt::translate_statement;
