//! Statement translator
//!
//! The per-line half of the code emitter: translates one ML statement
//! (indentation already stripped) into C text. Pass 1 uses it on function
//! body lines, pass 2 on main-routine lines; both share the same variable
//! lookup rules, so declarations land where a name is first bound.

use crate::{expr, infer, validate};
use log::debug;
use mlc_common::{TranslationContext, Variable};

/// The bind operator of ML
pub const BIND_OPERATOR: &str = "<-";

/// Translate one statement, appending its C text to `out`.
///
/// Recognition order, first match wins: binding, print, return, bare
/// function call, unrecognized (reported and skipped).
pub fn translate_statement(
    stmt: &str,
    line: u32,
    ctx: &mut TranslationContext,
    out: &mut String,
) {
    if stmt.contains(BIND_OPERATOR) {
        translate_binding(stmt, line, ctx, out);
    } else if let Some(expression) = stmt.strip_prefix("print ") {
        translate_print(expression, line, ctx, out);
    } else if let Some(expression) = stmt.strip_prefix("return ") {
        translate_return(expression, line, ctx, out);
    } else if stmt.contains('(') && stmt.contains(')') {
        translate_call(stmt, line, ctx, out);
    } else {
        let location = ctx.location(line);
        ctx.reporter
            .syntax_error(format!("unrecognized statement: {}", stmt), location);
    }
}

/// A binding either assigns to a known variable (globals first, then
/// locals) or declares a new local at its first occurrence. Rebinding
/// with a different literal shape is a type mismatch; the statement is
/// dropped and the stored kind stays as it was.
fn translate_binding(stmt: &str, line: u32, ctx: &mut TranslationContext, out: &mut String) {
    let location = ctx.location(line);
    let Some((target, expression)) = stmt.split_once(BIND_OPERATOR) else {
        return;
    };
    let (target, expression) = (target.trim(), expression.trim());
    if target.is_empty() || expression.is_empty() {
        ctx.reporter
            .syntax_error(format!("invalid assignment: {}", stmt), location);
        return;
    }
    debug!("assignment: identifier {:?}, expression {:?}", target, expression);

    match ctx.lookup_variable(target).map(|variable| variable.kind) {
        Some(declared) => {
            if !validate::kinds_consistent(declared, expression) {
                ctx.reporter.syntax_error(
                    format!(
                        "type mismatch for variable {}: expected {} but got {}",
                        target,
                        declared,
                        validate::literal_kind(expression)
                    ),
                    location,
                );
                return;
            }
            let Some(compiled) = expr::compile_expression(expression, line, ctx) else {
                return;
            };
            out.push_str(&format!("{} = {};\n", target, compiled));
        }
        None => {
            if !validate::is_valid_identifier(target, ctx.limits.max_identifier_length) {
                ctx.reporter
                    .syntax_error(format!("invalid variable name: {}", target), location);
                return;
            }
            if validate::conflicts_with_function(target, &ctx.functions) {
                ctx.reporter.syntax_error(
                    format!("variable name conflicts with a function name: {}", target),
                    location,
                );
                return;
            }
            if ctx.locals.is_full() {
                ctx.reporter
                    .syntax_error("too many variables defined".to_string(), location);
                return;
            }
            let kind = validate::literal_kind(expression);
            let Some(compiled) = expr::compile_expression(expression, line, ctx) else {
                return;
            };
            ctx.locals.insert(Variable::new(target.to_string(), kind));
            out.push_str(&format!("{} {} = {};\n", kind.c_type(), target, compiled));
        }
    }
}

/// Print computes into a real-valued temporary, then hides floating-point
/// noise: a value within 1e-6 of its own truncation prints with no
/// fractional part, everything else with six digits after the point.
fn translate_print(expression: &str, line: u32, ctx: &mut TranslationContext, out: &mut String) {
    debug!("print: expression {:?}", expression);
    let Some(compiled) = expr::compile_expression(expression, line, ctx) else {
        return;
    };
    out.push_str("{\n");
    out.push_str("double temp_value;\n");
    out.push_str(&format!("temp_value = {};\n", compiled));
    out.push_str("if (fabs(temp_value - (int)temp_value) < 1e-6) {\n");
    out.push_str("printf(\"%d\\n\", (int)temp_value);\n");
    out.push_str("} else {\n");
    out.push_str("printf(\"%.6f\\n\", temp_value);\n");
    out.push_str("}\n");
    out.push_str("}\n");
}

fn translate_return(expression: &str, line: u32, ctx: &mut TranslationContext, out: &mut String) {
    debug!("return: expression {:?}", expression);
    let Some(compiled) = expr::compile_expression(expression, line, ctx) else {
        return;
    };
    out.push_str(&format!("return {};\n", compiled));
}

/// A bare call is emitted verbatim; its argument shapes feed signature
/// resolution when this is the function's first observed call site.
fn translate_call(stmt: &str, _line: u32, ctx: &mut TranslationContext, out: &mut String) {
    debug!("function call: {}", stmt);
    infer::record_call_site(stmt, ctx);
    out.push_str(&format!("{};\n", stmt));
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_common::{FunctionDef, Kind, Limits};

    fn ctx() -> TranslationContext {
        TranslationContext::new("test.ml", Limits::default())
    }

    #[test]
    fn test_first_binding_declares_a_local() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("x <- 5", 1, &mut ctx, &mut out);

        assert_eq!(out, "int x = 5;\n");
        assert_eq!(ctx.locals.get("x").unwrap().kind, Kind::Integer);
        assert!(!ctx.reporter.has_errors());
    }

    #[test]
    fn test_real_binding_declares_a_double() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("y <- 2.5", 1, &mut ctx, &mut out);

        assert_eq!(out, "double y = 2.5;\n");
        assert_eq!(ctx.locals.get("y").unwrap().kind, Kind::Real);
    }

    #[test]
    fn test_rebinding_assigns_without_declaration() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("x <- 5", 1, &mut ctx, &mut out);
        translate_statement("x <- 7", 2, &mut ctx, &mut out);

        assert_eq!(out, "int x = 5;\nx = 7;\n");
    }

    #[test]
    fn test_mismatched_rebinding_is_rejected() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("x <- 5", 1, &mut ctx, &mut out);
        translate_statement("x <- 2.5", 2, &mut ctx, &mut out);

        // The statement is dropped and the stored kind is unchanged
        assert_eq!(out, "int x = 5;\n");
        assert_eq!(ctx.locals.get("x").unwrap().kind, Kind::Integer);
        assert_eq!(ctx.reporter.error_count(), 1);
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("type mismatch for variable x"));
    }

    #[test]
    fn test_global_target_assigns_without_declaration() {
        let mut ctx = ctx();
        ctx.globals
            .insert(Variable::new("g".to_string(), Kind::Integer));
        let mut out = String::new();
        translate_statement("g <- 9", 1, &mut ctx, &mut out);

        assert_eq!(out, "g = 9;\n");
        assert!(ctx.locals.is_empty());
    }

    #[test]
    fn test_binding_conflicting_with_function_name() {
        let mut ctx = ctx();
        ctx.functions
            .insert(FunctionDef::new("area".to_string(), vec![]));
        let mut out = String::new();
        translate_statement("area <- 5", 1, &mut ctx, &mut out);

        assert_eq!(out, "");
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("conflicts with a function name"));
    }

    #[test]
    fn test_invalid_identifier_is_reported() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("9lives <- 1", 1, &mut ctx, &mut out);

        assert_eq!(out, "");
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("invalid variable name"));
    }

    #[test]
    fn test_print_statement_emission() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("print x*y", 1, &mut ctx, &mut out);

        let expected = "{\n\
                        double temp_value;\n\
                        temp_value = x * y;\n\
                        if (fabs(temp_value - (int)temp_value) < 1e-6) {\n\
                        printf(\"%d\\n\", (int)temp_value);\n\
                        } else {\n\
                        printf(\"%.6f\\n\", temp_value);\n\
                        }\n\
                        }\n";
        assert_eq!(out, expected);
    }

    #[test]
    fn test_return_statement() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("return a*b", 1, &mut ctx, &mut out);

        assert_eq!(out, "return a * b;\n");
    }

    #[test]
    fn test_call_statement_is_emitted_verbatim_and_resolves() {
        let mut ctx = ctx();
        ctx.functions
            .insert(FunctionDef::new("area".to_string(), vec!["w".to_string()]));
        let mut out = String::new();
        translate_statement("area(2.5)", 1, &mut ctx, &mut out);

        assert_eq!(out, "area(2.5);\n");
        let function = ctx.functions.get("area").unwrap();
        assert_eq!(function.parameters[0].kind, Some(Kind::Real));
    }

    #[test]
    fn test_unrecognized_statement_is_reported() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("increment x", 1, &mut ctx, &mut out);

        assert_eq!(out, "");
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("unrecognized statement"));
    }

    #[test]
    fn test_binding_with_bad_expression_declares_nothing() {
        let mut ctx = ctx();
        let mut out = String::new();
        translate_statement("x <- (1", 1, &mut ctx, &mut out);

        assert_eq!(out, "");
        assert!(ctx.locals.is_empty());
        assert_eq!(ctx.reporter.error_count(), 1);
    }
}
