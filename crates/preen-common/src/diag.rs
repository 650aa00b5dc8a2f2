use std::fmt;

use serde::Serialize;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

/// A recoverable finding with location information.
///
/// Diagnostics are collected while the pass runs rather than printed
/// immediately, so callers decide how to render them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub line: u32,
    pub col: u32,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sev = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{}:{}: {}: {}", self.line, self.col, sev, self.message)
    }
}

/// Sink for recoverable diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, line: u32, col: u32, message: impl Into<String>) {
        self.items.push(Diagnostic {
            severity: Severity::Warning,
            line,
            col,
            message: message.into(),
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Unrecoverable structural error: the input cannot be cleaned up.
///
/// Producing subtly wrong level information on malformed input would
/// silently corrupt every later stage, so these abort the pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BraceError {
    /// A closer arrived that does not match the innermost open bracket.
    UnexpectedCloser {
        file: String,
        line: u32,
        col: u32,
        found: String,
        open_line: u32,
    },
    /// A paren-form statement was not followed by `(`.
    ExpectedParen {
        file: String,
        line: u32,
        col: u32,
        found: String,
    },
    /// A `do` body ended but no `while` followed.
    ExpectedWhile {
        file: String,
        line: u32,
        col: u32,
        found: String,
    },
}

impl fmt::Display for BraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BraceError::UnexpectedCloser {
                file,
                line,
                col,
                found,
                open_line,
            } => write!(
                f,
                "{}:{}:{}: unexpected '{}' for the bracket opened on line {}",
                file, line, col, found, open_line
            ),
            BraceError::ExpectedParen {
                file,
                line,
                col,
                found,
            } => write!(f, "{}:{}:{}: expected '(', found '{}'", file, line, col, found),
            BraceError::ExpectedWhile {
                file,
                line,
                col,
                found,
            } => write!(
                f,
                "{}:{}:{}: expected 'while' after 'do' body, found '{}'",
                file, line, col, found
            ),
        }
    }
}

impl std::error::Error for BraceError {}
