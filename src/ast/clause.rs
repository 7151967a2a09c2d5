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

/// A name as written in the script.
///
/// `quoted` records whether it was backquoted. Backquoting exists so that
/// names can contain characters a bare identifier cannot (`.`, `/`, spaces)
/// or collide with a keyword; `value` is always the unquoted text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub value: String,
    pub quoted: bool,
}

impl Identifier {
    pub fn bare(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: false,
        }
    }

    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quoted: true,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// `identifier ('.' identifier)*`, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedName {
    pub parts: Vec<Identifier>,
}

impl QualifiedName {
    pub fn new(parts: Vec<Identifier>) -> Self {
        Self { parts }
    }

    /// Unquoted part values, in order.
    pub fn segments(&self) -> Vec<&str> {
        self.parts.iter().map(Identifier::as_str).collect()
    }

    /// Part values joined with `.`.
    pub fn joined(&self) -> String {
        self.segments().join(".")
    }
}

/// The `format.path` pairing: `parquet.` `` `/data/events` ``.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormatPathRef {
    pub format: Identifier,
    pub path: Identifier,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableRef(pub Identifier);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionRef(pub Identifier);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnRef(pub Identifier);

/// Connection alias after `connect ... as`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbRef {
    Name(Identifier),
    Qualified(QualifiedName),
}

impl TableRef {
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl FunctionRef {
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl ColumnRef {
    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl DbRef {
    pub fn name(&self) -> String {
        match self {
            DbRef::Name(id) => id.value.clone(),
            DbRef::Qualified(name) => name.joined(),
        }
    }
}

/// `options` or `where`. The two spellings mean the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionMarker {
    Options,
    Where,
}

/// `key="value"`. The value is always a plain string literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExpressionAssign {
    pub key: Identifier,
    pub value: String,
}

impl ExpressionAssign {
    pub fn new(key: Identifier, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

/// The trailing `marker? assign? ('and' assign)*` clause shared by most
/// statements.
///
/// `filters` keeps every `and` pair in source order. Duplicate keys are
/// kept as written; resolving them is up to whoever executes the script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct OptionClause {
    pub marker: Option<OptionMarker>,
    pub assign: Option<ExpressionAssign>,
    pub filters: Vec<ExpressionAssign>,
}

impl OptionClause {
    pub fn is_empty(&self) -> bool {
        self.marker.is_none() && self.assign.is_none() && self.filters.is_empty()
    }

    /// Every key/value pair, the leading assignment first.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.assign
            .iter()
            .chain(self.filters.iter())
            .map(|a| (a.key.as_str(), a.value.as_str()))
    }
}

/// Right-hand side of `set key = value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetValue {
    /// A bare, dotted or backquoted name: `set a = b.c`.
    Name(QualifiedName),
    String(String),
    BlockString(String),
}

impl SetValue {
    /// The value as plain text, names joined with `.`.
    pub fn text(&self) -> String {
        match self {
            SetValue::Name(name) => name.joined(),
            SetValue::String(s) | SetValue::BlockString(s) => s.clone(),
        }
    }
}

/// Modifiers between `save` and the table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WriteMode {
    Overwrite,
    Append,
    ErrorIfExists,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PassthroughKind {
    Insert,
    Create,
    Drop,
    Refresh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainKind {
    Train,
    Run,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegisterKind {
    Register,
    Unregister,
}
