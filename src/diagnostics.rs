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

use crate::error::Diagnostic;
use crate::span::Span;
use std::fmt::Write;

/// Renders human-friendly, compiler-style diagnostics for a script.
///
/// This printer:
/// - Formats diagnostics with script name, line and column
/// - Displays the offending source line
/// - Highlights the exact error position using a caret (`^`)
/// - Optionally shows a follow-up hint
///
/// The output is modelled on `rustc` diagnostics and stays readable
/// without color.
pub struct DiagnosticPrinter {
    /// Full text of the script being reported on.
    source: String,

    /// Display name of the script (e.g. `etl.mlsql`).
    script_name: String,
}

impl DiagnosticPrinter {
    pub fn new(script_name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
            source: source.into(),
        }
    }

    /// Formats one diagnostic.
    ///
    /// # Output Example
    /// ```text
    /// error[P0001]: expected a table name, found ';'
    ///   --> etl.mlsql:1:20
    ///     |
    ///   1 | load csv.`/data` as;
    ///     |                     ^
    /// ```
    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let Span { line, column, .. } = diagnostic.span;

        // Lines are 1-indexed in diagnostics, vectors are 0-indexed.
        let src_line = self.source.lines().nth(line.saturating_sub(1)).unwrap_or("");

        let mut out = String::new();
        let _ = writeln!(
            out,
            "error[{}]: {}\n  --> {}:{}:{}",
            diagnostic.code(),
            diagnostic.message,
            self.script_name,
            line,
            column + 1
        );
        let _ = writeln!(out, "    |");
        let _ = writeln!(out, "{:>3} | {}", line, src_line);
        let _ = writeln!(out, "    | {}^", " ".repeat(column));

        if let Some(help) = &diagnostic.help {
            let _ = writeln!(out, "help: {}", help);
        }

        out
    }

    /// Formats every diagnostic, separated by blank lines.
    pub fn render_all(&self, diagnostics: &[Diagnostic]) -> String {
        diagnostics
            .iter()
            .map(|d| self.render(d))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prints a formatted diagnostic to stderr.
    pub fn print(&self, diagnostic: &Diagnostic) {
        eprint!("{}", self.render(diagnostic));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_points_at_the_column() {
        let source = "set a = \"b\";\nload csv.`/data` t;";
        let diagnostic = Diagnostic::syntax_error("expected 'as'", Span::new(30, 2, 17))
            .with_help("write `as <table>`");
        let printer = DiagnosticPrinter::new("etl.mlsql", source);

        let rendered = printer.render(&diagnostic);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0], "error[P0001]: expected 'as'");
        assert_eq!(lines[1], "  --> etl.mlsql:2:18");
        assert_eq!(lines[3], "  2 | load csv.`/data` t;");
        assert_eq!(lines[4], format!("    | {}^", " ".repeat(17)));
        assert_eq!(lines[5], "help: write `as <table>`");
    }

    #[test]
    fn line_past_the_end_renders_empty_source() {
        let diagnostic = Diagnostic::unterminated("unexpected end of input", Span::new(4, 3, 0));
        let rendered = DiagnosticPrinter::new("x", "load").render(&diagnostic);
        assert!(rendered.contains("  3 | \n"));
    }
}
