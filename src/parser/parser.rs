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

use crate::ast::{Script, Statement};
use crate::config::ParseOptions;
use crate::error::{Diagnostic, ScriptError};
use crate::lexer::keywords::{self, Keyword};
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;
use serde::{Deserialize, Serialize};

pub(crate) type ParseResult<T> = Result<T, Diagnostic>;

/// The pipeline-script parser.
///
/// This structure maintains:
/// - The full token stream produced by the lexer, trivia included, so
///   passthrough statements can be reproduced verbatim
/// - The cursor position into that stream
/// - The diagnostics collected so far
///
/// Grammar rules live in `statements` (one production per head keyword)
/// and `clauses` (the small shared rules), via additional `impl Parser`
/// blocks. Token-level navigation lives in `helpers`.
pub struct Parser {
    /// Complete token stream, always ending in `Eof`.
    pub(crate) tokens: Vec<Token>,

    /// Index of the next unconsumed token.
    pub(crate) current: usize,

    pub(crate) options: ParseOptions,

    pub(crate) diagnostics: Vec<Diagnostic>,
}

/// Everything one parse call produced.
///
/// Callers must look at `diagnostics` even when `script` is non-empty:
/// statements that failed to parse are skipped, the rest are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseOutput {
    pub script: Script,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The script if no diagnostic was recorded.
    pub fn into_result(self) -> Result<Script, ScriptError> {
        let mut diagnostics = self.diagnostics.into_iter();
        match diagnostics.next() {
            None => Ok(self.script),
            Some(first) => Err(ScriptError::Invalid {
                first,
                rest: diagnostics.collect(),
            }),
        }
    }
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(mut tokens: Vec<Token>, options: ParseOptions) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = end_of(&tokens);
            tokens.push(Token::new(TokenKind::Eof, "", end));
        }

        Self {
            tokens,
            current: 0,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Parses statements until the end of input.
    ///
    /// # Behavior
    /// - A line comment in head position becomes a `CommentOnly` statement
    ///   with no terminator
    /// - Stray `;` tokens are skipped
    /// - Every other statement must be followed by `;` or end of input
    /// - A statement that fails to parse is reported and skipped up to and
    ///   including the next `;`, then parsing resumes
    /// - With `max_diagnostics` set, parsing stops right after the diagnostic
    ///   that reaches the limit; a limit of `0` stops at the first one
    pub fn parse_script(&mut self) -> ParseOutput {
        let span = tracing::debug_span!("parse_script", tokens = self.tokens.len());
        let _enter = span.enter();

        let mut script = Script::new();

        loop {
            let index = self.skip_trivia(self.current);
            let head = self.tokens[index].clone();
            self.current = index;

            match head.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.current += 1;
                    continue;
                }
                TokenKind::SimpleComment => {
                    self.current += 1;
                    if self.options.comment_statements {
                        script.push(Statement::CommentOnly { text: head.lexeme }, head.span);
                    }
                    continue;
                }
                _ => {}
            }

            let parsed = self.statement().and_then(|stmt| {
                self.ender()?;
                Ok(stmt)
            });

            match parsed {
                Ok(stmt) => script.push(stmt, head.span),
                Err(diagnostic) => {
                    self.report(diagnostic);
                    if self.limit_reached() {
                        tracing::debug!("diagnostic limit reached, stopping");
                        break;
                    }
                    self.synchronize();
                }
            }
        }

        tracing::debug!(
            statements = script.len(),
            diagnostics = self.diagnostics.len(),
            "parsed script"
        );

        ParseOutput {
            script,
            diagnostics: std::mem::take(&mut self.diagnostics),
        }
    }

    /// Selects a production by the head keyword.
    ///
    /// This is a direct table lookup; nothing is consumed when the head
    /// token does not start a statement.
    pub(crate) fn statement(&mut self) -> ParseResult<Statement> {
        let head = self.peek().clone();
        tracing::trace!(head = %head.lexeme, line = head.span.line, "dispatching statement");

        let keyword = match head.kind {
            TokenKind::Keyword(keyword) => keyword,
            _ => return Err(self.not_a_statement(&head)),
        };

        match keyword {
            Keyword::Load => self.load_statement(),
            Keyword::Save => self.save_statement(),
            Keyword::Select => self.select_statement(),
            Keyword::Insert | Keyword::Create | Keyword::Drop | Keyword::Refresh => {
                self.passthrough_statement()
            }
            Keyword::Set => self.set_statement(),
            Keyword::Connect => self.connect_statement(),
            Keyword::Train | Keyword::Run => self.train_statement(),
            Keyword::Register => self.register_statement(),
            Keyword::Unregister => self.unregister_statement(),
            Keyword::Include => self.include_statement(),
            _ => Err(self.not_a_statement(&head)),
        }
    }

    /// `;`, or end of input for the final statement.
    fn ender(&mut self) -> ParseResult<()> {
        match self.peek().kind {
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ => Err(self.error_at_current("';' after the statement")),
        }
    }

    /// Skips to just past the next `;`, or to end of input.
    fn synchronize(&mut self) {
        let mut skipped = 0usize;

        loop {
            match self.tokens[self.current].kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.current += 1;
                    skipped += 1;
                    break;
                }
                _ => {
                    self.current += 1;
                    skipped += 1;
                }
            }
        }

        tracing::debug!(skipped, "resynchronized after error");
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            code = diagnostic.code(),
            line = diagnostic.span.line,
            column = diagnostic.span.column + 1,
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic);
    }

    fn limit_reached(&self) -> bool {
        self.options
            .max_diagnostics
            .is_some_and(|limit| self.diagnostics.len() >= limit)
    }

    fn not_a_statement(&self, head: &Token) -> Diagnostic {
        if head.kind == TokenKind::Unrecognized {
            return Diagnostic::lexical_error(
                format!("unrecognized input '{}'", head.lexeme),
                head.span,
            );
        }

        let diagnostic = Diagnostic::syntax_error(
            format!("'{}' does not start a statement", head.lexeme),
            head.span,
        );

        match case_variant_of_head(&head.lexeme) {
            Some(spelling) => diagnostic.with_help(format!(
                "keywords are case-sensitive; did you mean '{}'?",
                spelling
            )),
            None => diagnostic,
        }
    }
}

/// The lowercase or uppercase form of `word` if that form starts a
/// statement.
fn case_variant_of_head(word: &str) -> Option<String> {
    [word.to_lowercase(), word.to_uppercase()]
        .into_iter()
        .find(|candidate| candidate != word && keywords::lookup(candidate).is_some_and(is_head))
}

fn is_head(keyword: Keyword) -> bool {
    !matches!(
        keyword,
        Keyword::Options
            | Keyword::Where
            | Keyword::As
            | Keyword::And
            | Keyword::PartitionBy
            | Keyword::Overwrite
            | Keyword::Append
            | Keyword::ErrorIfExists
            | Keyword::Ignore
    )
}

/// Position just past the last token.
fn end_of(tokens: &[Token]) -> Span {
    let Some(last) = tokens.last() else {
        return Span::START;
    };

    let mut span = last.span;
    for ch in last.lexeme.chars() {
        span.offset += ch.len_utf8();
        if ch == '\n' {
            span.line += 1;
            span.column = 0;
        } else {
            span.column += 1;
        }
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiagnosticKind;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> ParseOutput {
        Parser::new(tokenize(source)).parse_script()
    }

    #[test]
    fn empty_input_is_an_empty_script() {
        let out = parse("");
        assert!(out.script.is_empty());
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn stray_terminators_are_skipped() {
        let out = parse(";; load csv.`/a` as t;;");
        assert_eq!(out.script.len(), 1);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn head_comment_becomes_a_statement() {
        let out = parse("-- hello");
        assert_eq!(
            out.script.statements(),
            &[Statement::CommentOnly {
                text: "-- hello".to_string()
            }]
        );
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn head_comments_can_be_switched_off() {
        let mut parser = Parser::with_options(
            tokenize("-- a\nset a = b;"),
            ParseOptions::default().without_comments(),
        );
        let out = parser.parse_script();
        assert_eq!(out.script.len(), 1);
        assert_eq!(out.script.statements()[0].kind_name(), "set");
    }

    #[test]
    fn comment_inside_a_statement_is_trivia() {
        let out = parse("load -- the source\n csv.`/a` /* tbl */ as t;");
        assert_eq!(out.script.len(), 1);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn missing_terminator_between_statements_is_reported() {
        let out = parse("load csv.`/a` as t load csv.`/b` as u;");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::SyntaxError);
        assert!(out.script.is_empty());
    }

    #[test]
    fn mixed_case_head_gets_a_hint() {
        let out = parse("Load parquet.`/p` as t;");
        let diagnostic = &out.diagnostics[0];
        assert_eq!(diagnostic.span.offset, 0);
        assert_eq!(
            diagnostic.help.as_deref(),
            Some("keywords are case-sensitive; did you mean 'load'?")
        );
    }

    #[test]
    fn unrecognized_head_is_a_lexical_error() {
        let out = parse("# nope; set a = b;");
        assert_eq!(out.diagnostics.len(), 1);
        assert_eq!(out.diagnostics[0].kind, DiagnosticKind::LexicalError);
        assert_eq!(out.script.len(), 1);
    }

    #[test]
    fn diagnostic_limit_stops_parsing() {
        let mut parser = Parser::with_options(
            tokenize("x; y; z; set a = b;"),
            ParseOptions::default().with_max_diagnostics(2),
        );
        let out = parser.parse_script();
        assert_eq!(out.diagnostics.len(), 2);
        assert!(out.script.is_empty());
    }

    #[test]
    fn zero_diagnostic_limit_still_parses_a_clean_script() {
        let mut parser = Parser::with_options(
            tokenize("set a = b; load csv.`/a` as t;"),
            ParseOptions::default().with_max_diagnostics(0),
        );
        let out = parser.parse_script();
        assert_eq!(out.script.len(), 2);
        assert!(out.diagnostics.is_empty());
    }

    #[test]
    fn zero_diagnostic_limit_stops_at_the_first_error() {
        let mut parser = Parser::with_options(
            tokenize("set a = b; x; set c = d;"),
            ParseOptions::default().with_max_diagnostics(0),
        );
        let out = parser.parse_script();
        assert_eq!(out.script.len(), 1);
        assert_eq!(out.diagnostics.len(), 1);
    }

    #[test]
    fn eof_is_appended_when_missing() {
        let mut tokens = tokenize("set a = b");
        tokens.pop();
        let out = Parser::new(tokens).parse_script();
        assert_eq!(out.script.len(), 1);
        assert!(out.diagnostics.is_empty());
    }
}
