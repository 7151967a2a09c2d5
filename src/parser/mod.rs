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

/// Core parser orchestration:
/// - Owns the `Parser` struct and `ParseOutput`
/// - Statement dispatch, terminators and error resynchronization
pub mod parser;

/// Statement-level productions, one per head keyword:
/// - load / save / select
/// - insert / create / drop / refresh passthrough
/// - set / connect / train / run / register / unregister / include
pub mod statements;

/// Shared clause rules:
/// - identifiers, qualified names, format.path
/// - option clauses and `and` filters
/// - set values
pub mod clauses;

/// Shared parser helpers:
/// - trivia skipping
/// - token matching and consumption
/// - diagnostics for unexpected tokens
pub mod helpers;

pub use parser::{ParseOutput, Parser};

use crate::ast::Script;
use crate::config::ParseOptions;
use crate::error::ScriptError;
use crate::lexer::{tokenize, Token};

/// Parses an already-lexed token stream.
///
/// The stream should come from `tokenize`; a missing trailing `Eof` is
/// added.
pub fn parse_script(tokens: Vec<Token>) -> ParseOutput {
    Parser::new(tokens).parse_script()
}

/// Lexes and parses a script with default options.
///
/// # Pipeline
/// ```text
/// Script Text → Lexer → Tokens → Parser → (Script, Diagnostics)
/// ```
///
/// # Example
/// ```rust
/// let out = pipeline_dsl::parse("load parquet.`/p` as t;");
/// assert_eq!(out.script.len(), 1);
/// assert!(out.diagnostics.is_empty());
/// ```
pub fn parse(source: &str) -> ParseOutput {
    parse_with_options(source, ParseOptions::default())
}

pub fn parse_with_options(source: &str, options: ParseOptions) -> ParseOutput {
    Parser::with_options(tokenize(source), options).parse_script()
}

/// Parses a script that is expected to be clean.
///
/// Fails with every collected diagnostic if there was at least one.
pub fn parse_strict(source: &str) -> Result<Script, ScriptError> {
    parse(source).into_result()
}
