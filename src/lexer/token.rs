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

use crate::lexer::keywords::Keyword;
use crate::span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the **category of a lexical token** in the pipeline language.
///
/// # Compiler Pipeline Role
/// ```text
/// Script Text → Lexer → TokenKind → Parser → Script
/// ```
///
/// The set is closed. Every character of the input ends up in exactly one
/// token, including whitespace and comments, so the token stream can be
/// used to reproduce the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// A reserved word, matched exactly against the literal table in
    /// `keywords.rs`.
    Keyword(Keyword),

    /// `.`
    Dot,

    /// `;`, the statement ender.
    Semicolon,

    /// `=`
    Eq,

    /// A single- or double-quoted literal: `"value"`, `'value'`.
    ///
    /// Backslash escapes are honoured; the lexeme keeps the quotes.
    String,

    /// A triple-quoted literal: `'''multi-line text'''`.
    ///
    /// Contents are verbatim, newlines and quotes included.
    BlockString,

    /// A bare name made of ASCII letters, digits and `_`.
    Identifier,

    /// A backquoted name: `` `/data/file.parquet` ``.
    ///
    /// Anything goes between the backquotes, including `.` and reserved
    /// words. A doubled backquote stands for one backquote.
    BackquotedIdentifier,

    /// `-- ...` or `// ...` up to the end of the line.
    SimpleComment,

    /// `/**/`
    BracketedEmptyComment,

    /// `/* ... */`
    BracketedComment,

    /// A run of whitespace characters.
    Whitespace,

    /// Any character the lexer could not classify, including the opening
    /// delimiter of an unterminated literal or comment.
    Unrecognized,

    /// End-of-input marker, always the final token.
    Eof,
}

impl TokenKind {
    /// Whitespace and bracketed comments. The parser never sees these.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::BracketedEmptyComment | TokenKind::BracketedComment
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(
            self,
            TokenKind::SimpleComment
                | TokenKind::BracketedEmptyComment
                | TokenKind::BracketedComment
        )
    }

    /// Bare or backquoted name.
    pub fn is_identifier(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::BackquotedIdentifier)
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> String {
        match self {
            TokenKind::Keyword(kw) => format!("keyword '{}'", kw),
            TokenKind::Dot => "'.'".to_string(),
            TokenKind::Semicolon => "';'".to_string(),
            TokenKind::Eq => "'='".to_string(),
            TokenKind::String => "string literal".to_string(),
            TokenKind::BlockString => "block string".to_string(),
            TokenKind::Identifier => "identifier".to_string(),
            TokenKind::BackquotedIdentifier => "backquoted identifier".to_string(),
            TokenKind::SimpleComment
            | TokenKind::BracketedEmptyComment
            | TokenKind::BracketedComment => "comment".to_string(),
            TokenKind::Whitespace => "whitespace".to_string(),
            TokenKind::Unrecognized => "unrecognized input".to_string(),
            TokenKind::Eof => "end of input".to_string(),
        }
    }
}

/// Represents a **single lexical token** produced by the lexer.
///
/// # Example Tokens
/// ```text
/// load       →  { kind: Keyword(Load),        lexeme: "load",       span: 1:1 }
/// parquet    →  { kind: Identifier,           lexeme: "parquet",    span: 1:6 }
/// `/a/b.c`   →  { kind: BackquotedIdentifier, lexeme: "`/a/b.c`",   span: 1:14 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The classified category of the token.
    pub kind: TokenKind,

    /// The exact source text that produced this token, delimiters included.
    pub lexeme: String,

    /// Where the token starts.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Byte offset one past the last character of the token.
    pub fn end_offset(&self) -> usize {
        self.span.offset + self.lexeme.len()
    }

    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.kind == TokenKind::Keyword(keyword)
    }

    /// The value a literal or name token stands for, delimiters removed.
    ///
    /// - `String`: quotes stripped, backslash escapes resolved
    /// - `BlockString`: triple quotes stripped, contents verbatim
    /// - `BackquotedIdentifier`: backquotes stripped, ``` `` ``` collapsed
    /// - anything else: the lexeme unchanged
    pub fn value(&self) -> String {
        match self.kind {
            TokenKind::String => unescape(strip(&self.lexeme, 1)),
            TokenKind::BlockString => strip(&self.lexeme, 3).to_string(),
            TokenKind::BackquotedIdentifier => strip(&self.lexeme, 1).replace("``", "`"),
            _ => self.lexeme.clone(),
        }
    }
}

impl fmt::Display for Token {
    /// Formats a token for user-facing output: only the lexeme.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexeme)
    }
}

/// Removes `width` delimiter bytes from each end. Delimiters are ASCII.
fn strip(lexeme: &str, width: usize) -> &str {
    if lexeme.len() < width * 2 {
        return "";
    }
    &lexeme[width..lexeme.len() - width]
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(c @ ('\\' | '"' | '\'')) => out.push(c),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, Span::START)
    }

    #[test]
    fn string_value_resolves_escapes() {
        let t = token(TokenKind::String, r#""a \"quoted\" \\ word\n""#);
        assert_eq!(t.value(), "a \"quoted\" \\ word\n");
    }

    #[test]
    fn unknown_escape_is_kept() {
        let t = token(TokenKind::String, r#""C:\data""#);
        assert_eq!(t.value(), r"C:\data");
    }

    #[test]
    fn block_string_value_is_verbatim() {
        let t = token(TokenKind::BlockString, "'''line \"one\"\nline \\n two'''");
        assert_eq!(t.value(), "line \"one\"\nline \\n two");
    }

    #[test]
    fn backquoted_value_collapses_doubled_backquotes() {
        let t = token(TokenKind::BackquotedIdentifier, "`a``b.c`");
        assert_eq!(t.value(), "a`b.c");
    }
}
