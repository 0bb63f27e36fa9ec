//! Expression compiler
//!
//! Translates an ML arithmetic expression (identifiers, numeric literals,
//! parenthesized groups, `+ - * /`, call arguments) into C expression
//! text. The compilation strategy is deliberately minimal: one split on
//! the first multiplicative operator met, recursing on each side, with
//! everything else passed through verbatim. Additive operators and
//! grouping rely entirely on C's own precedence rules.

use log::trace;
use mlc_common::TranslationContext;

/// Characters permitted in an expression besides ASCII alphanumerics
const EXPRESSION_PUNCTUATION: &str = "+-*/()., ";

/// Validate and translate one expression; reports a diagnostic and
/// returns `None` when the character set or parenthesis balance is bad.
pub fn compile_expression(
    expr: &str,
    line: u32,
    ctx: &mut TranslationContext,
) -> Option<String> {
    let location = ctx.location(line);

    let mut open = 0i32;
    for c in expr.chars() {
        match c {
            '(' => open += 1,
            ')' => {
                open -= 1;
                if open < 0 {
                    ctx.reporter.syntax_error(
                        format!("unmatched closing parenthesis in expression: {}", expr),
                        location,
                    );
                    return None;
                }
            }
            _ => {}
        }
        if !c.is_ascii_alphanumeric() && !EXPRESSION_PUNCTUATION.contains(c) {
            ctx.reporter.syntax_error(
                format!("invalid character in expression: {}", c),
                location,
            );
            return None;
        }
    }
    if open != 0 {
        ctx.reporter.syntax_error(
            format!("unmatched opening parenthesis in expression: {}", expr),
            location,
        );
        return None;
    }

    let mut out = String::new();
    compile_term(expr, &mut out);
    Some(out)
}

/// Split on the first `*` or `/` in the text, joining the recursively
/// compiled sides with the operator; a side without either operator is
/// emitted verbatim. The scan is character-wise, so the split point does
/// not respect parenthesized groups; reassembly keeps the text
/// equivalent regardless.
fn compile_term(expr: &str, out: &mut String) {
    match expr.find(['*', '/']) {
        Some(idx) => {
            let operator = &expr[idx..=idx];
            let (left, right) = (&expr[..idx], &expr[idx + 1..]);
            trace!("term split: {:?} {} {:?}", left, operator, right);
            compile_term(left, out);
            out.push(' ');
            out.push_str(operator);
            out.push(' ');
            compile_term(right, out);
        }
        None => {
            trace!("factor: {:?}", expr);
            out.push_str(expr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_common::{Limits, TranslationContext};

    fn ctx() -> TranslationContext {
        TranslationContext::new("test.ml", Limits::default())
    }

    #[test]
    fn test_single_split_on_first_multiplicative() {
        let mut ctx = ctx();
        let out = compile_expression("a+b*c", 1, &mut ctx).unwrap();
        assert_eq!(out, "a+b * c");
        assert!(!ctx.reporter.has_errors());
    }

    #[test]
    fn test_chain_of_multiplicative_operators() {
        let mut ctx = ctx();
        let out = compile_expression("a*b/c", 1, &mut ctx).unwrap();
        assert_eq!(out, "a * b / c");
    }

    #[test]
    fn test_additive_expression_passes_through_verbatim() {
        let mut ctx = ctx();
        let out = compile_expression("a + b - 3", 1, &mut ctx).unwrap();
        assert_eq!(out, "a + b - 3");
    }

    #[test]
    fn test_call_arguments_are_permitted() {
        let mut ctx = ctx();
        let out = compile_expression("area(3, 4.5)", 1, &mut ctx).unwrap();
        assert_eq!(out, "area(3, 4.5)");
    }

    #[test]
    fn test_invalid_character_is_rejected() {
        let mut ctx = ctx();
        assert_eq!(compile_expression("a & b", 1, &mut ctx), None);
        assert_eq!(ctx.reporter.error_count(), 1);
        let message = &ctx.reporter.diagnostics()[0].message;
        assert!(message.contains("invalid character"), "{}", message);
    }

    #[test]
    fn test_unmatched_closing_parenthesis() {
        let mut ctx = ctx();
        assert_eq!(compile_expression("1+2)", 1, &mut ctx), None);
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("unmatched closing parenthesis"));
    }

    #[test]
    fn test_unmatched_opening_parenthesis() {
        let mut ctx = ctx();
        assert_eq!(compile_expression("(1+2*3", 1, &mut ctx), None);
        assert!(ctx.reporter.diagnostics()[0]
            .message
            .contains("unmatched opening parenthesis"));
    }
}
