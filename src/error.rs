/*
 * ==========================================================================
 * PIPELINE-DSL - Pipeline Script Parser
 * ==========================================================================
 *
 * Author:   Sam Wilcox
 *
 * License:
 * This file is part of the PIPELINE-DSL project.
 *
 * PIPELINE-DSL is dual-licensed under the terms of:
 *   - The MIT license
 *   - The Apache License, Version 2.0
 *
 * You may choose either license to govern your use of this software.
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under these licenses is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *
 * ==========================================================================
 */

use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// What went wrong, at the granularity callers care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// An unscannable character sequence reached the parser.
    LexicalError,

    /// A statement body does not match its grammar, or no statement
    /// starts with the head token.
    SyntaxError,

    /// Input ended in the middle of a statement.
    UnterminatedStatement,
}

impl DiagnosticKind {
    /// Stable diagnostic code (L0001, P0001, …).
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::LexicalError => "L0001",
            DiagnosticKind::SyntaxError => "P0001",
            DiagnosticKind::UnterminatedStatement => "P0002",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
}

/// A single problem found while parsing a script.
///
/// Diagnostics are collected rather than raised: one bad statement never
/// stops the rest of the script from being parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,

    pub severity: Severity,

    /// Human-readable error message
    pub message: String,

    /// Where the offending token starts
    pub span: Span,

    /// Optional note / help text
    pub help: Option<String>,
}

impl Diagnostic {
    /// Generic constructor
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            span,
            help: None,
        }
    }

    pub fn lexical_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::LexicalError, message, span)
    }

    pub fn syntax_error(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::SyntaxError, message, span)
    }

    pub fn unterminated(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::UnterminatedStatement, message, span)
    }

    /// Attach a help message to the diagnostic (builder-style).
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}] at {}: {}", self.code(), self.span, self.message)
    }
}

impl std::error::Error for Diagnostic {}

/// Returned by `parse_strict` when a script is not entirely clean.
///
/// Loading `ParseOptions` has its own error, `config::ConfigError`.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{first}{}", more_suffix(.rest.len()))]
    Invalid {
        first: Diagnostic,
        rest: Vec<Diagnostic>,
    },
}

impl ScriptError {
    /// Every diagnostic carried by the error, in source order.
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        match self {
            ScriptError::Invalid { first, rest } => std::iter::once(first).chain(rest).collect(),
        }
    }
}

fn more_suffix(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => " (and 1 more error)".to_string(),
        n => format!(" (and {n} more errors)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_one_based_columns() {
        let d = Diagnostic::syntax_error("expected 'as'", Span::new(10, 2, 4));
        assert_eq!(d.to_string(), "error[P0001] at 2:5: expected 'as'");
    }

    #[test]
    fn script_error_counts_remaining_diagnostics() {
        let first = Diagnostic::syntax_error("a", Span::START);
        let err = ScriptError::Invalid {
            first: first.clone(),
            rest: vec![first.clone(), first],
        };
        assert_eq!(err.to_string(), "error[P0001] at 1:1: a (and 2 more errors)");
        assert_eq!(err.diagnostics().len(), 3);
    }
}
