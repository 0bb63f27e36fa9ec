//! Type inference engine, function-signature half
//!
//! Variable kinds are inferred at first binding from the literal shape of
//! the bound expression (see `validate::literal_kind`); this module owns
//! the lazy, call-site-driven resolution of function signatures.

use crate::validate;
use log::debug;
use mlc_common::{FunctionDef, Kind, SignatureState, TranslationContext};

/// Record a call for signature resolution.
///
/// The first call site observed for a function fixes each parameter kind
/// positionally from the literal shape of the matching argument
/// expression, and sets the return kind equal to the first parameter's
/// kind. Later call sites never re-resolve. Calls naming an unknown
/// function resolve nothing; the call text is emitted verbatim anyway.
pub fn record_call_site(call: &str, ctx: &mut TranslationContext) {
    let Some(open) = call.find('(') else { return };
    let Some(close) = call.rfind(')') else { return };
    if close < open {
        return;
    }

    let name = call[..open].trim();
    let kinds: Vec<Kind> = call[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|argument| !argument.is_empty())
        .map(validate::literal_kind)
        .collect();

    let Some(function) = ctx.functions.get_mut(name) else {
        return;
    };
    if function.is_resolved() {
        return;
    }

    debug!("resolving signature of '{}' from first call site", name);
    for (parameter, kind) in function.parameters.iter_mut().zip(&kinds) {
        parameter.kind = Some(*kind);
    }
    // Return kind mirrors the first parameter; zero-parameter functions
    // keep the real default.
    if let Some(first) = function.parameters.first() {
        function.return_kind = first.kind;
    }
    function.state = SignatureState::Resolved;
}

/// Default every kind of a still-unresolved signature to real.
///
/// Called when a prototype is about to be emitted for a function with no
/// call site observed so far.
pub fn apply_default_signature(function: &mut FunctionDef) {
    if function.is_resolved() {
        return;
    }
    debug!(
        "function '{}' has no call site before emission, defaulting signature",
        function.name
    );
    for parameter in &mut function.parameters {
        parameter.kind = Some(Kind::Real);
    }
    function.return_kind = Some(Kind::Real);
    function.state = SignatureState::Resolved;
}
