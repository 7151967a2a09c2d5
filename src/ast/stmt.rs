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

use crate::ast::clause::{
    ColumnRef, DbRef, FormatPathRef, FunctionRef, Identifier, OptionClause, PassthroughKind,
    QualifiedName, RegisterKind, SetValue, TableRef, TrainKind, WriteMode,
};
use serde::{Deserialize, Serialize};

/// One parsed pipeline statement.
///
/// Built once by the parser and never mutated afterwards. Each variant
/// carries exactly the fields its grammar defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "statement", rename_all = "snake_case")]
pub enum Statement {
    /* ----------------------------- */
    /* DATA IN / DATA OUT            */
    /* ----------------------------- */

    /// `load format.path [options ...] as table`
    Load {
        source: FormatPathRef,
        options: OptionClause,
        table: TableRef,
    },

    /// `save mode* table as format.path [options ...] [partitionBy col]`
    Save {
        modes: Vec<WriteMode>,
        table: TableRef,
        sink: FormatPathRef,
        options: OptionClause,
        partition_by: Option<ColumnRef>,
    },

    /* ----------------------------- */
    /* PASSTHROUGH SQL               */
    /* ----------------------------- */

    /// `select ... as table`. `sql` is the verbatim text before the final
    /// `as`, starting with the `select` keyword itself.
    SelectAs { sql: String, table: TableRef },

    /// `insert` / `create` / `drop` / `refresh`, kept verbatim.
    RawPassthrough { kind: PassthroughKind, body: String },

    /* ----------------------------- */
    /* CONFIGURATION                 */
    /* ----------------------------- */

    /// `set key = value [options ...]`
    SetConfig {
        key: QualifiedName,
        value: SetValue,
        options: OptionClause,
    },

    /// `connect format [options ...] [as db]`
    Connect {
        format: Identifier,
        options: OptionClause,
        db: Option<DbRef>,
    },

    /* ----------------------------- */
    /* MODELS AND FUNCTIONS          */
    /* ----------------------------- */

    /// `train|run table as format.path [options ...]`
    TrainOrRun {
        kind: TrainKind,
        table: TableRef,
        target: FormatPathRef,
        options: OptionClause,
    },

    /// `register format.path as function [options ...]` or
    /// `unregister format.path [options ...]`.
    ///
    /// `function` is present exactly when `kind` is `Register`.
    Register {
        kind: RegisterKind,
        target: FormatPathRef,
        function: Option<FunctionRef>,
        options: OptionClause,
    },

    /// `include format.path [options ...]`
    Include {
        target: FormatPathRef,
        options: OptionClause,
    },

    /* ----------------------------- */
    /* COMMENTS                      */
    /* ----------------------------- */

    /// A line comment in statement position, text kept verbatim.
    CommentOnly { text: String },
}

impl Statement {
    /// Short lowercase name of the statement family.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Load { .. } => "load",
            Statement::Save { .. } => "save",
            Statement::SelectAs { .. } => "select",
            Statement::RawPassthrough { kind, .. } => match kind {
                PassthroughKind::Insert => "insert",
                PassthroughKind::Create => "create",
                PassthroughKind::Drop => "drop",
                PassthroughKind::Refresh => "refresh",
            },
            Statement::SetConfig { .. } => "set",
            Statement::Connect { .. } => "connect",
            Statement::TrainOrRun { kind, .. } => match kind {
                TrainKind::Train => "train",
                TrainKind::Run => "run",
            },
            Statement::Register { kind, .. } => match kind {
                RegisterKind::Register => "register",
                RegisterKind::Unregister => "unregister",
            },
            Statement::Include { .. } => "include",
            Statement::CommentOnly { .. } => "comment",
        }
    }

    /// The `format.path` pair, for the statements that have one.
    pub fn format_path(&self) -> Option<&FormatPathRef> {
        match self {
            Statement::Load { source, .. } => Some(source),
            Statement::Save { sink, .. } => Some(sink),
            Statement::TrainOrRun { target, .. }
            | Statement::Register { target, .. }
            | Statement::Include { target, .. } => Some(target),
            _ => None,
        }
    }

    /// The trailing option clause, for the statements that have one.
    pub fn options(&self) -> Option<&OptionClause> {
        match self {
            Statement::Load { options, .. }
            | Statement::Save { options, .. }
            | Statement::SetConfig { options, .. }
            | Statement::Connect { options, .. }
            | Statement::TrainOrRun { options, .. }
            | Statement::Register { options, .. }
            | Statement::Include { options, .. } => Some(options),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Statement::CommentOnly { .. })
    }
}
