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

use crate::lexer::keywords;
use crate::lexer::token::{Token, TokenKind};
use crate::span::Span;

/// Scanner state that has to be restored when a literal turns out to be
/// unterminated.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    current: usize,
    offset: usize,
    line: usize,
    column: usize,
}

/// Converts script text into tokens, one token per `next()` call.
///
/// The lexer is total: it never fails and never panics. Characters it
/// cannot classify come out as `TokenKind::Unrecognized` and the parser
/// decides what to do with them. The last token is always `Eof`, after
/// which the iterator is exhausted.
///
/// Every character of the input belongs to exactly one token, so the
/// lexemes concatenated in order reproduce the source.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    cursor: Cursor,
    start: Cursor,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer positioned at the first character of `source`.
    pub fn new(source: &'a str) -> Self {
        let origin = Cursor {
            current: 0,
            offset: 0,
            line: 1,
            column: 0,
        };

        Self {
            source,
            chars: source.chars().collect(),
            cursor: origin,
            start: origin,
            finished: false,
        }
    }

    /// Scans and classifies a single token.
    ///
    /// # Behavior
    /// - `--` and `//` start a line comment
    /// - `/**/` is the empty bracketed comment, `/* ... */` the general one
    /// - `'''` opens a block string, `'` or `"` a string
    /// - `` ` `` opens a backquoted identifier
    /// - Words are looked up in the keyword table before becoming identifiers
    fn scan_token(&mut self) -> Token {
        self.start = self.cursor;
        let ch = self.advance();

        let kind = match ch {
            c if c.is_whitespace() => {
                while !self.is_at_end() && self.peek().is_whitespace() {
                    self.advance();
                }
                TokenKind::Whitespace
            }

            '-' if self.peek() == '-' => self.line_comment(),
            '/' if self.peek() == '/' => self.line_comment(),
            '/' if self.peek() == '*' => self.bracketed_comment(),

            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '=' => TokenKind::Eq,

            '\'' if self.peek() == '\'' && self.peek_next() == '\'' => self.block_string(),
            '"' | '\'' => self.string(ch),
            '`' => self.backquoted_identifier(),

            c if is_identifier_char(c) => self.identifier(),

            _ => TokenKind::Unrecognized,
        };

        let lexeme = &self.source[self.start.offset..self.cursor.offset];
        Token::new(
            kind,
            lexeme,
            Span::new(self.start.offset, self.start.line, self.start.column),
        )
    }

    /// Consumes the rest of the line, leaving the newline for the next
    /// whitespace token.
    fn line_comment(&mut self) -> TokenKind {
        while !self.is_at_end() && self.peek() != '\n' {
            self.advance();
        }
        TokenKind::SimpleComment
    }

    /// Called with `/` consumed and `*` next.
    fn bracketed_comment(&mut self) -> TokenKind {
        self.advance(); // '*'

        if self.peek() == '*' && self.peek_next() == '/' {
            self.advance();
            self.advance();
            return TokenKind::BracketedEmptyComment;
        }

        while !self.is_at_end() {
            if self.peek() == '*' && self.peek_next() == '/' {
                self.advance();
                self.advance();
                return TokenKind::BracketedComment;
            }
            self.advance();
        }

        self.unterminated()
    }

    /// Called with the opening quote consumed.
    fn string(&mut self, delimiter: char) -> TokenKind {
        while !self.is_at_end() {
            let ch = self.advance();
            if ch == '\\' {
                if self.is_at_end() {
                    break;
                }
                self.advance();
            } else if ch == delimiter {
                return TokenKind::String;
            }
        }

        self.unterminated()
    }

    /// Called with the first of the three opening quotes consumed.
    fn block_string(&mut self) -> TokenKind {
        self.advance();
        self.advance();

        while !self.is_at_end() {
            if self.peek() == '\'' && self.peek_next() == '\'' && self.peek_at(2) == '\'' {
                self.advance();
                self.advance();
                self.advance();
                return TokenKind::BlockString;
            }
            self.advance();
        }

        self.unterminated()
    }

    /// Called with the opening backquote consumed.
    fn backquoted_identifier(&mut self) -> TokenKind {
        while !self.is_at_end() {
            if self.advance() == '`' {
                if self.peek() == '`' {
                    self.advance();
                    continue;
                }
                return TokenKind::BackquotedIdentifier;
            }
        }

        self.unterminated()
    }

    fn identifier(&mut self) -> TokenKind {
        while !self.is_at_end() && is_identifier_char(self.peek()) {
            self.advance();
        }

        let word = &self.source[self.start.offset..self.cursor.offset];
        match keywords::lookup(word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Identifier,
        }
    }

    /// An unclosed literal or comment: only its first character becomes an
    /// `Unrecognized` token, and scanning resumes right after it.
    fn unterminated(&mut self) -> TokenKind {
        self.cursor = self.start;
        self.advance();
        TokenKind::Unrecognized
    }

    /// Consumes one character, keeping offset and line/column in step.
    fn advance(&mut self) -> char {
        let ch = self.chars[self.cursor.current];
        self.cursor.current += 1;
        self.cursor.offset += ch.len_utf8();

        if ch == '\n' {
            self.cursor.line += 1;
            self.cursor.column = 0;
        } else {
            self.cursor.column += 1;
        }

        ch
    }

    /// Returns the current character, or `'\0'` at end of input.
    fn peek(&self) -> char {
        self.peek_at(0)
    }

    fn peek_next(&self) -> char {
        self.peek_at(1)
    }

    fn peek_at(&self, distance: usize) -> char {
        self.chars
            .get(self.cursor.current + distance)
            .copied()
            .unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.cursor.current >= self.chars.len()
    }

    fn eof(&self) -> Token {
        Token::new(
            TokenKind::Eof,
            "",
            Span::new(self.cursor.offset, self.cursor.line, self.cursor.column),
        )
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }

        if self.is_at_end() {
            self.finished = true;
            return Some(self.eof());
        }

        Some(self.scan_token())
    }
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::keywords::Keyword;
    use crate::lexer::tokenize;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Whitespace)
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn load_statement_tokens() {
        assert_eq!(
            kinds("load parquet.`/p` as t;"),
            vec![
                TokenKind::Keyword(Keyword::Load),
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::BackquotedIdentifier,
                TokenKind::Keyword(Keyword::As),
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn keyword_matching_is_case_exact() {
        assert_eq!(kinds("Load")[0], TokenKind::Identifier);
        assert_eq!(kinds("LOAD")[0], TokenKind::Keyword(Keyword::Load));
        assert_eq!(kinds("loader")[0], TokenKind::Identifier);
    }

    #[test]
    fn comment_kinds() {
        assert_eq!(
            kinds("-- a\n// b\n/**/ /* c\n d */"),
            vec![
                TokenKind::SimpleComment,
                TokenKind::SimpleComment,
                TokenKind::BracketedEmptyComment,
                TokenKind::BracketedComment,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn string_with_escaped_quote_is_one_token() {
        let tokens = tokenize(r#"k="a\"b""#);
        assert_eq!(tokens[2].kind, TokenKind::String);
        assert_eq!(tokens[2].lexeme, r#""a\"b""#);
    }

    #[test]
    fn block_string_spans_lines() {
        let tokens = tokenize("'''a\n'b'\n\"c\"'''");
        assert_eq!(tokens[0].kind, TokenKind::BlockString);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn backquoted_identifier_keeps_dots_and_keywords() {
        let tokens = tokenize("`load.as/x`");
        assert_eq!(tokens[0].kind, TokenKind::BackquotedIdentifier);
        assert_eq!(tokens[0].value(), "load.as/x");
    }

    #[test]
    fn unterminated_string_degrades_to_unrecognized() {
        let tokens = tokenize("\"abc");
        assert_eq!(tokens[0].kind, TokenKind::Unrecognized);
        assert_eq!(tokens[0].lexeme, "\"");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme, "abc");
    }

    #[test]
    fn unterminated_block_comment_degrades_to_unrecognized() {
        let tokens = tokenize("/* open");
        assert_eq!(tokens[0].kind, TokenKind::Unrecognized);
        assert_eq!(tokens[0].lexeme, "/");
    }

    #[test]
    fn stray_characters_are_unrecognized() {
        assert_eq!(
            kinds("a + b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Unrecognized,
                TokenKind::Identifier,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn spans_track_lines_and_columns() {
        let tokens = tokenize("set\n  a = \"b\";");
        let a = tokens.iter().find(|t| t.lexeme == "a").expect("identifier a");
        assert_eq!(a.span, Span::new(6, 2, 2));
    }

    #[test]
    fn lexemes_reproduce_the_source() {
        let source = "load csv.`/tmp/ü.csv` where header=\"true\" -- trailing\nas t;";
        let rebuilt: String = tokenize(source).iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn iterator_ends_after_eof() {
        let mut lexer = Lexer::new("");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(lexer.next().is_none());
    }
}
