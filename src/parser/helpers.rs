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
use crate::lexer::keywords::Keyword;
use crate::lexer::token::{Token, TokenKind};
use crate::parser::parser::{ParseResult, Parser};

impl Parser {
    /// First index at or after `from` that is not whitespace or a
    /// bracketed comment. Line comments are kept: in head position they
    /// are statements.
    pub(crate) fn skip_trivia(&self, from: usize) -> usize {
        let mut index = from;
        while self.tokens[index].kind.is_trivia() {
            index += 1;
        }
        index
    }

    /// First index at or after `from` holding a token the grammar cares
    /// about. The stream ends in `Eof`, so this always terminates.
    fn significant(&self, from: usize) -> usize {
        let mut index = from;
        while self.tokens[index].kind.is_trivia()
            || self.tokens[index].kind == TokenKind::SimpleComment
        {
            index += 1;
        }
        index
    }

    /// The next significant token, not consumed.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.significant(self.current)]
    }

    /// Consumes and returns the next significant token.
    ///
    /// `Eof` is never consumed: advancing at end of input keeps returning it.
    pub(crate) fn advance(&mut self) -> Token {
        let index = self.significant(self.current);
        let token = self.tokens[index].clone();
        self.current = if token.kind == TokenKind::Eof {
            index
        } else {
            index + 1
        };
        token
    }

    /// Index of the token most recently returned by `advance`.
    pub(crate) fn previous_index(&self) -> usize {
        self.current.saturating_sub(1)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.check(TokenKind::Keyword(keyword))
    }

    /// Matches a keyword and consumes it if present.
    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of `kind` or reports what was expected instead.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(expected))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword, expected: &str) -> ParseResult<Token> {
        self.expect(TokenKind::Keyword(keyword), expected)
    }

    pub(crate) fn at_statement_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Semicolon | TokenKind::Eof)
    }

    /// Source text of tokens `from..=to`, trivia included.
    pub(crate) fn text_between(&self, from: usize, to: usize) -> String {
        self.tokens[from..=to]
            .iter()
            .map(|t| t.lexeme.as_str())
            .collect()
    }

    /// Builds the diagnostic for an unexpected next token.
    ///
    /// - end of input → `UnterminatedStatement`
    /// - unrecognized input → `LexicalError`
    /// - anything else → `SyntaxError`
    pub(crate) fn error_at_current(&self, expected: &str) -> Diagnostic {
        let token = self.peek();

        match token.kind {
            TokenKind::Eof => Diagnostic::unterminated(
                format!("unexpected end of input, expected {}", expected),
                token.span,
            ),
            TokenKind::Unrecognized => Diagnostic::lexical_error(
                format!("unrecognized input '{}', expected {}", token.lexeme, expected),
                token.span,
            ),
            kind => Diagnostic::syntax_error(
                format!("expected {}, found {}", expected, found(kind, &token.lexeme)),
                token.span,
            ),
        }
    }
}

fn found(kind: TokenKind, lexeme: &str) -> String {
    match kind {
        TokenKind::Identifier | TokenKind::BackquotedIdentifier | TokenKind::String => {
            format!("{} {}", kind.describe(), lexeme)
        }
        _ => kind.describe(),
    }
}
