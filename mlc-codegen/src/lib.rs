//! ML Transpiler - C Code Generation
//!
//! Assembles the complete C translation unit from the symbol tables
//! populated by pass 1 and a second walk over the program lines, and
//! provides the two-pass `translate` entry point used by the driver.

pub mod emit;

pub use emit::emit_program;

use mlc_common::{Limits, TranslationContext};
use mlc_frontend::{LineCursor, SymbolCollector};

/// Run both passes over `source`, returning the generated C text and the
/// context carrying the symbol tables and every collected diagnostic.
pub fn translate(source: &str, filename: &str, limits: Limits) -> (String, TranslationContext) {
    let mut ctx = TranslationContext::new(filename, limits);
    let mut cursor = LineCursor::new(source);
    SymbolCollector::new(&mut ctx).run(&mut cursor);
    let c_source = emit::emit_program(&mut cursor, &mut ctx);
    (c_source, ctx)
}
