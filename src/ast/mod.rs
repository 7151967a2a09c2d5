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

/// Clause-level value types: names, references, option clauses.
pub mod clause;

/// The `Statement` tagged union.
pub mod stmt;

/// `Display` rendering back to canonical script text.
pub mod display;

pub use clause::{
    ColumnRef, DbRef, ExpressionAssign, FormatPathRef, FunctionRef, Identifier, OptionClause,
    OptionMarker, PassthroughKind, QualifiedName, RegisterKind, SetValue, TableRef, TrainKind,
    WriteMode,
};
pub use stmt::Statement;

use crate::span::Span;
use serde::{Deserialize, Serialize};

/// An ordered sequence of statements, in source order.
///
/// An empty script is valid: it is what an empty or whitespace-only input
/// parses to. Each statement remembers the position of its head token.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Script {
    statements: Vec<Statement>,
    spans: Vec<Span>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, statement: Statement, span: Span) {
        self.statements.push(statement);
        self.spans.push(span);
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn get(&self, index: usize) -> Option<&Statement> {
        self.statements.get(index)
    }

    /// Position of the head token of statement `index`.
    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }

    /// Statements paired with the position of their head token.
    pub fn located(&self) -> impl Iterator<Item = (Span, &Statement)> {
        self.spans.iter().copied().zip(self.statements.iter())
    }

    /// Pretty-printed JSON, for handing the tree to an executor.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl IntoIterator for Script {
    type Item = Statement;
    type IntoIter = std::vec::IntoIter<Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.into_iter()
    }
}

impl<'a> IntoIterator for &'a Script {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
