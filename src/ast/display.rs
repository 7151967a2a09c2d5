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

//! Rendering of AST nodes back to script text.
//!
//! `Display` on a `Statement` yields the statement without its terminator;
//! `Display` on a `Script` yields one statement per line, each followed by
//! `;` (comment statements are written as-is). Parsing the rendered text
//! gives back the same statements.

use crate::ast::clause::{
    DbRef, ExpressionAssign, FormatPathRef, Identifier, OptionClause, OptionMarker,
    PassthroughKind, QualifiedName, RegisterKind, SetValue, TrainKind, WriteMode,
};
use crate::ast::stmt::Statement;
use crate::ast::Script;
use crate::lexer::keywords;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static BARE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_]+$").expect("bare identifier pattern is valid")
});

/// True if `name` would not lex back as one plain identifier.
fn needs_quoting(name: &str) -> bool {
    !BARE_IDENTIFIER.is_match(name) || keywords::is_keyword(name)
}

fn write_string(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    f.write_str("\"")?;
    for ch in value.chars() {
        match ch {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c => write!(f, "{c}")?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quoted || needs_quoting(&self.value) {
            write!(f, "`{}`", self.value.replace('`', "``"))
        } else {
            f.write_str(&self.value)
        }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{part}")?;
        }
        Ok(())
    }
}

impl fmt::Display for FormatPathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.format, self.path)
    }
}

impl fmt::Display for DbRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbRef::Name(id) => write!(f, "{id}"),
            DbRef::Qualified(name) => write!(f, "{name}"),
        }
    }
}

impl fmt::Display for ExpressionAssign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.key)?;
        write_string(f, &self.value)
    }
}

impl fmt::Display for OptionMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionMarker::Options => f.write_str("options"),
            OptionMarker::Where => f.write_str("where"),
        }
    }
}

/// Renders with a leading space when non-empty, so statements can append
/// it unconditionally.
impl fmt::Display for OptionClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(marker) = self.marker {
            write!(f, " {marker}")?;
        }
        if let Some(assign) = &self.assign {
            write!(f, " {assign}")?;
        }
        for filter in &self.filters {
            write!(f, " and {filter}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetValue::Name(name) => write!(f, "{name}"),
            SetValue::String(s) => write_string(f, s),
            SetValue::BlockString(s) => write!(f, "'''{s}'''"),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WriteMode::Overwrite => "overwrite",
            WriteMode::Append => "append",
            WriteMode::ErrorIfExists => "errorIfExists",
            WriteMode::Ignore => "ignore",
        })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Load {
                source,
                options,
                table,
            } => write!(f, "load {source}{options} as {}", table.0),

            Statement::Save {
                modes,
                table,
                sink,
                options,
                partition_by,
            } => {
                f.write_str("save")?;
                for mode in modes {
                    write!(f, " {mode}")?;
                }
                write!(f, " {} as {sink}{options}", table.0)?;
                if let Some(col) = partition_by {
                    write!(f, " partitionBy {}", col.0)?;
                }
                Ok(())
            }

            Statement::SelectAs { sql, table } => write!(f, "{sql} as {}", table.0),

            Statement::RawPassthrough { body, .. } => f.write_str(body),

            Statement::SetConfig {
                key,
                value,
                options,
            } => write!(f, "set {key} = {value}{options}"),

            Statement::Connect {
                format,
                options,
                db,
            } => {
                write!(f, "connect {format}{options}")?;
                if let Some(db) = db {
                    write!(f, " as {db}")?;
                }
                Ok(())
            }

            Statement::TrainOrRun {
                kind,
                table,
                target,
                options,
            } => {
                let head = match kind {
                    TrainKind::Train => "train",
                    TrainKind::Run => "run",
                };
                write!(f, "{head} {} as {target}{options}", table.0)
            }

            Statement::Register {
                kind,
                target,
                function,
                options,
            } => match kind {
                RegisterKind::Register => {
                    write!(f, "register {target}")?;
                    if let Some(function) = function {
                        write!(f, " as {}", function.0)?;
                    }
                    write!(f, "{options}")
                }
                RegisterKind::Unregister => write!(f, "unregister {target}{options}"),
            },

            Statement::Include { target, options } => write!(f, "include {target}{options}"),

            Statement::CommentOnly { text } => f.write_str(text),
        }
    }
}

impl fmt::Display for PassthroughKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PassthroughKind::Insert => "insert",
            PassthroughKind::Create => "create",
            PassthroughKind::Drop => "drop",
            PassthroughKind::Refresh => "refresh",
        })
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in self.iter() {
            if statement.is_comment() {
                writeln!(f, "{statement}")?;
            } else {
                writeln!(f, "{statement};")?;
            }
        }
        Ok(())
    }
}
