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

use serde::{Deserialize, Serialize};
use std::fmt;

/// A reserved word of the pipeline language.
///
/// Several words are reachable through more than one spelling
/// (`load` / `LOAD`, `unRegister` / `UNREGISTER` / `unregister`), but the
/// parser only ever cares about the word, never about which spelling was
/// written. The spelling survives in `Token::lexeme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Load,
    Save,
    Select,
    Insert,
    Create,
    Drop,
    Refresh,
    Set,
    Connect,
    Train,
    Run,
    Register,
    Unregister,
    Include,

    Options,
    Where,
    As,
    And,
    PartitionBy,

    Overwrite,
    Append,
    ErrorIfExists,
    Ignore,
}

/// Resolves a scanned word against the fixed literal table.
///
/// Matching is exact: there is no case folding, so `Load` or `Save` are
/// plain identifiers and will never start a statement.
///
/// # Examples
/// ```text
/// load        -> Some(Keyword::Load)
/// LOAD        -> Some(Keyword::Load)
/// Load        -> None
/// partitionby -> Some(Keyword::PartitionBy)
/// ```
pub fn lookup(word: &str) -> Option<Keyword> {
    let keyword = match word {
        "load" | "LOAD" => Keyword::Load,
        "save" | "SAVE" => Keyword::Save,
        "select" | "SELECT" => Keyword::Select,
        "insert" | "INSERT" => Keyword::Insert,
        "create" | "CREATE" => Keyword::Create,
        "drop" | "DROP" => Keyword::Drop,
        "refresh" | "REFRESH" => Keyword::Refresh,
        "set" | "SET" => Keyword::Set,
        "connect" | "CONNECT" => Keyword::Connect,
        "train" | "TRAIN" => Keyword::Train,
        "run" | "RUN" => Keyword::Run,
        "register" | "REGISTER" => Keyword::Register,
        "unRegister" | "UNREGISTER" | "unregister" => Keyword::Unregister,
        "include" | "INCLUDE" => Keyword::Include,

        // Clause words only have the one spelling.
        "options" => Keyword::Options,
        "where" => Keyword::Where,
        "as" => Keyword::As,
        "and" => Keyword::And,
        "partitionBy" | "partitionby" => Keyword::PartitionBy,

        "overwrite" => Keyword::Overwrite,
        "append" => Keyword::Append,
        "errorIfExists" => Keyword::ErrorIfExists,
        "ignore" => Keyword::Ignore,

        _ => return None,
    };

    Some(keyword)
}

/// Returns `true` if `word` is spelled exactly like a keyword literal.
///
/// Used when rendering identifiers: such a name has to be backquoted or it
/// would lex back as the keyword.
pub fn is_keyword(word: &str) -> bool {
    lookup(word).is_some()
}

impl Keyword {
    /// The canonical (first listed) spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Load => "load",
            Keyword::Save => "save",
            Keyword::Select => "select",
            Keyword::Insert => "insert",
            Keyword::Create => "create",
            Keyword::Drop => "drop",
            Keyword::Refresh => "refresh",
            Keyword::Set => "set",
            Keyword::Connect => "connect",
            Keyword::Train => "train",
            Keyword::Run => "run",
            Keyword::Register => "register",
            Keyword::Unregister => "unregister",
            Keyword::Include => "include",
            Keyword::Options => "options",
            Keyword::Where => "where",
            Keyword::As => "as",
            Keyword::And => "and",
            Keyword::PartitionBy => "partitionBy",
            Keyword::Overwrite => "overwrite",
            Keyword::Append => "append",
            Keyword::ErrorIfExists => "errorIfExists",
            Keyword::Ignore => "ignore",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
