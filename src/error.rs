//! # Diagnostics
//!
//! Shared error and warning types used by every stage of the assembler
//! pipeline (lexer, parser, resolver, encoder).
//!
//! Each phase stops at its first error (see the crate-level docs): errors do
//! not accumulate the way warnings do. A single `AsmError` therefore carries
//! enough context — kind, message, and source coordinate — to render a
//! caret under the offending text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsmError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    ArgumentError,
    NameError,
    ValueError,
    /// Reached only if an earlier phase let a malformed instruction through.
    /// A bug indicator, never constructible from user input.
    EncodingError,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::ArgumentError => "ArgumentError",
            ErrorKind::NameError => "NameError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::EncodingError => "EncodingError",
        };
        f.write_str(s)
    }
}

impl AsmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::SyntaxError, message, span)
    }

    pub fn argument(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ArgumentError, message, span)
    }

    pub fn name(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::NameError, message, span)
    }

    pub fn value(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::ValueError, message, span)
    }

    pub fn undefined_label(label: &str, span: Span) -> Self {
        Self::name(format!("undefined label '{label}'"), span)
    }

    pub fn duplicate_name(name: &str, span: Span) -> Self {
        Self::name(format!("'{name}' is already defined"), span)
    }
}

impl std::fmt::Display for AsmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}, col {}): {}",
            self.kind,
            self.span.line + 1,
            self.span.col + 1,
            self.message
        )
    }
}

/// Renders the `"<file>:<line>:<col>: error: <message>"` form with a caret
/// line under the offending column, for the CLI's stderr report. `source`
/// is the original file content the span was taken from.
pub fn render_diagnostic(file: &str, source: &str, err: &AsmError) -> String {
    let source_line = source.lines().nth(err.span.line).unwrap_or("");
    let caret = " ".repeat(err.span.col) + "^";
    format!(
        "{file}:{}:{}: {}: {}\n{source_line}\n{caret}",
        err.span.line + 1,
        err.span.col + 1,
        err.kind,
        err.message
    )
}

/// A non-fatal diagnostic: an unused label or constant (spec §4.3). Unlike
/// errors, warnings accumulate across a phase rather than aborting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    pub message: String,
    pub span: Span,
}

impl Warning {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "warning (line {}, col {}): {}",
            self.span.line + 1,
            self.span.col + 1,
            self.message
        )
    }
}
