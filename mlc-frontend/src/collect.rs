//! Pass 1: symbol collection
//!
//! A single linear scan over the program that recognizes function
//! definitions and top-level variable bindings, populating the function
//! and global-variable tables. Function bodies are captured here too,
//! translated line by line, so pass 2 only has to lay the pieces out.
//!
//! Every failure is report-and-skip: the offending line or definition is
//! dropped and scanning continues, so one run surfaces every diagnostic.

use crate::cursor::LineCursor;
use crate::{stmt, validate};
use log::{debug, info};
use mlc_common::{FunctionDef, TranslationContext, Variable};

/// Keyword introducing a function definition
pub const FUNCTION_KEYWORD: &str = "function";

/// True if the line begins with the function keyword
pub fn is_function_header(line: &str) -> bool {
    match line.strip_prefix(FUNCTION_KEYWORD) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// The pass-1 walker; borrows the context for the duration of the scan
pub struct SymbolCollector<'a> {
    ctx: &'a mut TranslationContext,
}

impl<'a> SymbolCollector<'a> {
    pub fn new(ctx: &'a mut TranslationContext) -> Self {
        Self { ctx }
    }

    /// Run the first pass; the cursor is rewound afterwards for pass 2.
    pub fn run(&mut self, cursor: &mut LineCursor) {
        info!("starting first pass: collecting global variables and functions");
        while let Some(line) = cursor.next_line() {
            let line_no = cursor.line_number();
            if !validate::paren_balance(&line) {
                let location = self.ctx.location(line_no);
                self.ctx.reporter.syntax_error(
                    format!("unbalanced parentheses in line: {}", line),
                    location,
                );
                continue;
            }
            if is_function_header(&line) {
                self.collect_function(&line, line_no, cursor);
            } else if line.contains(stmt::BIND_OPERATOR) {
                self.collect_global(&line, line_no);
            }
            // Anything else belongs to the main routine, handled in pass 2
        }
        cursor.rewind();
    }

    /// A top-level binding: the first occurrence of a name declares a
    /// global and freezes its kind. Later occurrences are left alone
    /// here; the statement translator re-checks consistency when it
    /// translates the line in pass 2.
    fn collect_global(&mut self, line: &str, line_no: u32) {
        let location = self.ctx.location(line_no);
        let Some((target, expression)) = line.split_once(stmt::BIND_OPERATOR) else {
            return;
        };
        let (target, expression) = (target.trim(), expression.trim());
        if target.is_empty() || expression.is_empty() {
            self.ctx
                .reporter
                .syntax_error(format!("invalid assignment: {}", line), location);
            return;
        }
        if self.ctx.globals.contains(target) {
            return; // kind already frozen at the first binding
        }
        if !validate::is_valid_identifier(target, self.ctx.limits.max_identifier_length) {
            self.ctx
                .reporter
                .syntax_error(format!("invalid variable name: {}", target), location);
            return;
        }
        if validate::conflicts_with_function(target, &self.ctx.functions) {
            self.ctx.reporter.syntax_error(
                format!("variable name conflicts with a function name: {}", target),
                location,
            );
            return;
        }
        if self.ctx.globals.is_full() {
            self.ctx
                .reporter
                .syntax_error("too many variables defined".to_string(), location);
            return;
        }
        let kind = validate::literal_kind(expression);
        debug!("global binding: {} ({})", target, kind);
        self.ctx
            .globals
            .insert(Variable::new(target.to_string(), kind));
    }

    fn collect_function(&mut self, header: &str, line_no: u32, cursor: &mut LineCursor) {
        let location = self.ctx.location(line_no);
        if self.ctx.functions.is_full() {
            self.ctx
                .reporter
                .syntax_error("too many functions defined".to_string(), location);
            skip_function_body(cursor);
            return;
        }
        let Some(mut function) = self.parse_header(header, line_no) else {
            skip_function_body(cursor);
            return;
        };
        debug!(
            "function definition: {} ({} parameters)",
            function.name,
            function.parameters.len()
        );
        self.extract_body(&mut function, cursor);
        self.ctx.functions.insert(function);
    }

    /// Parse `function <name> ( <params> )` or `function <name> <params>`,
    /// where the parameter list is space- or comma-separated.
    fn parse_header(&mut self, header: &str, line_no: u32) -> Option<FunctionDef> {
        let location = self.ctx.location(line_no);
        let rest = header[FUNCTION_KEYWORD.len()..].trim();

        let (name, parameter_text) = if let Some(open) = rest.find('(') {
            // Parenthesis balance was checked at line level, so a close exists
            let close = rest.rfind(')').unwrap_or(rest.len());
            (rest[..open].trim(), &rest[open + 1..close])
        } else {
            match rest.split_once(char::is_whitespace) {
                Some((name, parameters)) => (name, parameters),
                None => (rest, ""),
            }
        };

        if !validate::is_valid_identifier(name, self.ctx.limits.max_identifier_length) {
            self.ctx
                .reporter
                .syntax_error(format!("invalid function definition: {}", header), location);
            return None;
        }

        let mut parameter_names = Vec::new();
        for parameter in parameter_text.split([' ', ',']).filter(|p| !p.is_empty()) {
            if parameter.len() > self.ctx.limits.max_identifier_length
                || !parameter.starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.ctx.reporter.syntax_error(
                    format!("invalid parameter in function: {}", parameter),
                    location,
                );
                return None;
            }
            parameter_names.push(parameter.to_string());
        }
        Some(FunctionDef::new(name.to_string(), parameter_names))
    }

    /// Capture and translate the indented body block.
    ///
    /// A line starting with one tab is a body statement. A line without
    /// that indentation triggers the two-line lookahead: when neither of
    /// the next two lines is indented the body is over; when the very
    /// next line is indented, the current line is a stray inside the
    /// block and is reported. Either way the current line is discarded
    /// and, unless the body ended, scanning continues.
    fn extract_body(&mut self, function: &mut FunctionDef, cursor: &mut LineCursor) {
        while let Some(line) = cursor.next_line() {
            let line_no = cursor.line_number();
            if let Some(statement) = line.strip_prefix('\t') {
                if statement.starts_with("return") {
                    function.has_return = true;
                }
                stmt::translate_statement(statement, line_no, self.ctx, &mut function.body);
            } else {
                if !peek_indented(cursor, 0) && !peek_indented(cursor, 1) {
                    break;
                }
                if peek_indented(cursor, 0) {
                    let location = self.ctx.location(line_no);
                    self.ctx.reporter.syntax_error(
                        format!("invalid indentation in function '{}'", function.name),
                        location,
                    );
                }
            }
        }
    }
}

fn peek_indented(cursor: &LineCursor, offset: usize) -> bool {
    cursor
        .peek(offset)
        .is_some_and(|line| line.starts_with('\t'))
}

/// Scan past an indented body block without translating it, consuming
/// exactly the lines pass 1's extractor consumes. Used when a definition
/// is rejected, and by pass 2 when it walks over function definitions.
pub fn skip_function_body(cursor: &mut LineCursor) {
    while let Some(line) = cursor.next_line() {
        if line.starts_with('\t') {
            continue;
        }
        if !peek_indented(cursor, 0) && !peek_indented(cursor, 1) {
            break;
        }
    }
}
