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

/// The scanner itself: characters in, tokens out.
pub mod lexer;

/// Token kinds and the token value type.
pub mod token;

/// The fixed keyword literal table.
pub mod keywords;

pub use keywords::Keyword;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};

/// Lexes the whole of `source`.
///
/// Pure function of its input: lexing the same text twice yields identical
/// token sequences. The result always ends with a single `Eof` token.
///
/// # Example
/// ```rust
/// use pipeline_dsl::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize("set a = \"b\";");
/// assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
/// ```
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
