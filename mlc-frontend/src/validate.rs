//! Validation layer
//!
//! Stateless checks shared by both passes: parenthesis balance,
//! identifier syntax, literal-shape kind inference, and kind
//! consistency.

use mlc_common::{FunctionTable, Kind};

/// Check that parentheses balance across a line.
///
/// Fails as soon as the running open-count goes negative, or on a nonzero
/// total at the end of the line.
pub fn paren_balance(line: &str) -> bool {
    let mut open = 0i32;
    for c in line.chars() {
        match c {
            '(' => open += 1,
            ')' => {
                open -= 1;
                if open < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    open == 0
}

/// Check identifier syntax: alphabetic first character, alphanumeric or
/// underscore afterwards, at most `max_length` characters.
pub fn is_valid_identifier(name: &str, max_length: usize) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && name.len() <= max_length
}

/// Infer the kind of an expression from its literal shape.
///
/// A `.` anywhere in the right-hand-side text means real, otherwise
/// integer. This scans the whole expression text, not just a leading
/// literal; the crudeness is part of the language's observed behavior.
pub fn literal_kind(expr: &str) -> Kind {
    if expr.contains('.') {
        Kind::Real
    } else {
        Kind::Integer
    }
}

/// Check that rebinding an expression to a variable keeps its kind
pub fn kinds_consistent(declared: Kind, expr: &str) -> bool {
    literal_kind(expr) == declared
}

/// Check whether a variable name collides with a defined function
pub fn conflicts_with_function(name: &str, functions: &FunctionTable) -> bool {
    functions.contains(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlc_common::FunctionDef;

    #[test]
    fn test_paren_balance() {
        assert!(paren_balance("(1+2)*3"));
        assert!(!paren_balance("(1+2*3"));
        assert!(!paren_balance("1+2)"));
        assert!(paren_balance("no parens at all"));
        assert!(paren_balance(""));
    }

    #[test]
    fn test_negative_running_count_fails_early() {
        // Balanced totals still fail when a close comes first
        assert!(!paren_balance(")("));
    }

    #[test]
    fn test_valid_identifiers() {
        assert!(is_valid_identifier("x", 12));
        assert!(is_valid_identifier("mileage", 12));
        assert!(is_valid_identifier("a1_b2", 12));
        assert!(is_valid_identifier("exactlytwelv", 12));
    }

    #[test]
    fn test_invalid_identifiers() {
        assert!(!is_valid_identifier("", 12));
        assert!(!is_valid_identifier("9lives", 12));
        assert!(!is_valid_identifier("_private", 12));
        assert!(!is_valid_identifier("has space", 12));
        assert!(!is_valid_identifier("thirteenchars", 12));
    }

    #[test]
    fn test_literal_kind() {
        assert_eq!(literal_kind("5"), Kind::Integer);
        assert_eq!(literal_kind("2.5"), Kind::Real);
        assert_eq!(literal_kind("x + 1"), Kind::Integer);
        // The whole-text scan: any dot makes the expression real
        assert_eq!(literal_kind("x + 1.0"), Kind::Real);
    }

    #[test]
    fn test_kinds_consistent() {
        assert!(kinds_consistent(Kind::Integer, "42"));
        assert!(!kinds_consistent(Kind::Integer, "4.2"));
        assert!(kinds_consistent(Kind::Real, "4.2"));
        assert!(!kinds_consistent(Kind::Real, "42"));
    }

    #[test]
    fn test_function_name_conflict() {
        let mut functions = FunctionTable::new(10);
        functions.insert(FunctionDef::new("area".to_string(), vec![]));

        assert!(conflicts_with_function("area", &functions));
        assert!(!conflicts_with_function("width", &functions));
    }
}
