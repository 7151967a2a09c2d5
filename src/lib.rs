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

//! Lexer, statement grammar and syntax tree for the pipeline scripting
//! language.
//!
//! A script is a sequence of `;`-terminated statements that load sources,
//! save results, run SQL, set configuration, connect to external systems
//! and train or register models and functions:
//!
//! ```text
//! set spark.sql.shuffle.partitions = "8";
//! load parquet.`/data/events` where mergeSchema="true" as events;
//! select user, count(*) as n from events group by user as counts;
//! save overwrite counts as json.`/out/counts` partitionBy user;
//! ```
//!
//! `parse` turns such text into a `Script` plus the diagnostics for any
//! statements it had to skip. Nothing here executes a statement.

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::{Script, Statement};
pub use config::{ConfigError, ParseOptions};
pub use diagnostics::DiagnosticPrinter;
pub use error::{Diagnostic, DiagnosticKind, ScriptError, Severity};
pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse, parse_script, parse_strict, parse_with_options, ParseOutput, Parser};
pub use span::Span;
