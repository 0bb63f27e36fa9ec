//! C translation-unit assembly (pass 2)
//!
//! Lays out the generated program: prelude includes, the global
//! declaration block, one prototype and body per collected function, and
//! the main routine produced by walking the rewound program a second
//! time. Individual statements are translated by the frontend's
//! statement translator; this module owns the surrounding shape.

use log::{debug, info};
use mlc_common::{FunctionDef, TranslationContext};
use mlc_frontend::{collect, infer, stmt, validate, LineCursor};

/// Assemble the complete C translation unit.
///
/// The cursor must be rewound to the first line (pass 1 leaves it there).
pub fn emit_program(cursor: &mut LineCursor, ctx: &mut TranslationContext) -> String {
    info!("starting second pass: generating C code");
    let mut out = String::new();
    emit_prelude(&mut out);
    emit_globals(ctx, &mut out);
    emit_functions(ctx, &mut out);
    emit_main(cursor, ctx, &mut out);
    out
}

fn emit_prelude(out: &mut String) {
    out.push_str("#include <stdio.h>\n");
    out.push_str("#include <math.h>\n");
}

/// Global declarations in insertion order, default-initialized to zero
fn emit_globals(ctx: &TranslationContext, out: &mut String) {
    for variable in ctx.globals.iter() {
        out.push_str(&format!(
            "{} {} = 0.0;\n",
            variable.kind.c_type(),
            variable.name
        ));
    }
    out.push('\n');
}

/// One prototype and body per function, in definition order.
///
/// A signature with no observed call site defaults to real throughout; a
/// body with no explicit return statement gets a default `return 0;`.
fn emit_functions(ctx: &mut TranslationContext, out: &mut String) {
    for function in ctx.functions.iter_mut() {
        debug!("generating prototype and code for function: {}", function.name);
        infer::apply_default_signature(function);

        let signature = function_signature(function);
        out.push_str(&format!("{};\n", signature));
        out.push_str(&format!("{} {{\n", signature));
        out.push_str(&function.body);
        if !function.has_return {
            out.push_str("return 0;\n");
        }
        out.push_str("}\n\n");
    }
}

fn function_signature(function: &FunctionDef) -> String {
    let parameters = function
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.effective_kind().c_type(), p.name))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "{} {}({})",
        function.effective_return_kind().c_type(),
        function.name,
        parameters
    )
}

/// The main routine: a fresh local scope, then every top-level statement
/// in program order. Function definitions (header plus indented block)
/// and comment lines are scanned past; lines already rejected by the
/// pass-1 balance check are dropped without a second report.
fn emit_main(cursor: &mut LineCursor, ctx: &mut TranslationContext, out: &mut String) {
    out.push_str("int main(int argc, char *argv[]) {\n");
    ctx.locals.clear();
    while let Some(line) = cursor.next_line() {
        let line_no = cursor.line_number();
        if collect::is_function_header(&line) {
            collect::skip_function_body(cursor);
            continue;
        }
        if line.starts_with('#') {
            debug!("comment: {}", line);
            continue;
        }
        if line.trim().is_empty() {
            continue;
        }
        if !validate::paren_balance(&line) {
            continue;
        }
        stmt::translate_statement(&line, line_no, ctx, out);
    }
    out.push_str("return 0;\n}\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_common::{Kind, Limits, SignatureState, Variable};
    use pretty_assertions::assert_eq;

    fn ctx() -> TranslationContext {
        TranslationContext::new("test.ml", Limits::default())
    }

    #[test]
    fn test_globals_block() {
        let mut ctx = ctx();
        ctx.globals
            .insert(Variable::new("x".to_string(), Kind::Integer));
        ctx.globals.insert(Variable::new("y".to_string(), Kind::Real));

        let mut out = String::new();
        emit_globals(&ctx, &mut out);
        assert_eq!(out, "int x = 0.0;\ndouble y = 0.0;\n\n");
    }

    #[test]
    fn test_function_signature_with_resolved_kinds() {
        let mut function = FunctionDef::new(
            "area".to_string(),
            vec!["w".to_string(), "h".to_string()],
        );
        function.parameters[0].kind = Some(Kind::Integer);
        function.parameters[1].kind = Some(Kind::Real);
        function.return_kind = Some(Kind::Integer);
        function.state = SignatureState::Resolved;

        assert_eq!(function_signature(&function), "int area(int w, double h)");
    }

    #[test]
    fn test_unresolved_function_defaults_to_real() {
        let mut ctx = ctx();
        let mut function = FunctionDef::new("f".to_string(), vec!["a".to_string()]);
        function.body.push_str("return a;\n");
        function.has_return = true;
        ctx.functions.insert(function);

        let mut out = String::new();
        emit_functions(&mut ctx, &mut out);
        assert_eq!(
            out,
            "double f(double a);\ndouble f(double a) {\nreturn a;\n}\n\n"
        );
    }

    #[test]
    fn test_default_return_is_appended() {
        let mut ctx = ctx();
        let mut function = FunctionDef::new("shout".to_string(), vec!["a".to_string()]);
        function.body.push_str("a = 1;\n");
        ctx.functions.insert(function);

        let mut out = String::new();
        emit_functions(&mut ctx, &mut out);
        assert!(out.ends_with("a = 1;\nreturn 0;\n}\n\n"));
    }

    #[test]
    fn test_main_skips_functions_and_comments() {
        let mut ctx = ctx();
        let mut cursor = LineCursor::new(
            "# leading comment\nfunction f a\n\treturn a\n\nx <- 5\n",
        );

        let mut out = String::new();
        emit_main(&mut cursor, &mut ctx, &mut out);
        assert_eq!(
            out,
            "int main(int argc, char *argv[]) {\nint x = 5;\nreturn 0;\n}\n"
        );
    }

    #[test]
    fn test_main_declares_local_then_assigns() {
        let mut ctx = ctx();
        let mut cursor = LineCursor::new("x <- 5\nx <- 7\n");

        let mut out = String::new();
        emit_main(&mut cursor, &mut ctx, &mut out);
        assert_eq!(
            out,
            "int main(int argc, char *argv[]) {\nint x = 5;\nx = 7;\nreturn 0;\n}\n"
        );
    }

    #[test]
    fn test_main_assigns_to_known_global() {
        let mut ctx = ctx();
        ctx.globals
            .insert(Variable::new("x".to_string(), Kind::Integer));
        let mut cursor = LineCursor::new("x <- 5\n");

        let mut out = String::new();
        emit_main(&mut cursor, &mut ctx, &mut out);
        assert_eq!(
            out,
            "int main(int argc, char *argv[]) {\nx = 5;\nreturn 0;\n}\n"
        );
    }
}
