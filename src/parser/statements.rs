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

use crate::ast::{
    Identifier, PassthroughKind, RegisterKind, Statement, TableRef, TrainKind, WriteMode,
};
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::parser::{ParseResult, Parser};

impl Parser {
    /// `load format.path [marker] [assign] [and assign]* as table`
    pub(crate) fn load_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // load

        let source = self.format_path()?;
        let options = self.option_clause()?;
        self.expect_keyword(Keyword::As, "'as' before the table name")?;
        let table = self.table_name()?;

        Ok(Statement::Load {
            source,
            options,
            table,
        })
    }

    /// `save mode* table as format.path [marker] [assign] [and assign]*
    /// [partitionBy col]`
    ///
    /// Write modes may repeat and combine in any order; they are recorded
    /// as written. `as col` is accepted in place of `partitionBy col`.
    pub(crate) fn save_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // save

        let mut modes = Vec::new();
        while let Some(mode) = self.write_mode() {
            modes.push(mode);
        }

        let table = self.table_name()?;
        self.expect_keyword(Keyword::As, "'as' between the table and the sink")?;
        let sink = self.format_path()?;
        let options = self.option_clause()?;

        let partition_by =
            if self.match_keyword(Keyword::PartitionBy) || self.match_keyword(Keyword::As) {
                Some(self.column_name()?)
            } else {
                None
            };

        Ok(Statement::Save {
            modes,
            table,
            sink,
            options,
            partition_by,
        })
    }

    fn write_mode(&mut self) -> Option<WriteMode> {
        let mode = match self.peek().kind {
            TokenKind::Keyword(Keyword::Overwrite) => WriteMode::Overwrite,
            TokenKind::Keyword(Keyword::Append) => WriteMode::Append,
            TokenKind::Keyword(Keyword::ErrorIfExists) => WriteMode::ErrorIfExists,
            TokenKind::Keyword(Keyword::Ignore) => WriteMode::Ignore,
            _ => return None,
        };
        self.advance();
        Some(mode)
    }

    /// `select <anything but ';'> as table`
    ///
    /// The SQL between the head keyword and the final `as` is not parsed;
    /// it is kept verbatim, `select` included, for the engine.
    pub(crate) fn select_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // select
        let head = self.previous_index();

        // Indices of the significant tokens of the body.
        let mut body = vec![head];
        while !self.at_statement_end() {
            self.advance();
            body.push(self.previous_index());
        }

        let n = body.len();
        let ends_with_alias = n >= 3
            && self.tokens[body[n - 2]].is_keyword(Keyword::As)
            && self.tokens[body[n - 1]].kind.is_identifier()
            && !self.tokens[body[n - 1]].value().is_empty();

        if !ends_with_alias {
            return Err(self
                .error_at_current("'as <table>' at the end of the select statement")
                .with_help("a select statement names its result: select ... as <table>"));
        }

        let alias = &self.tokens[body[n - 1]];
        let table = TableRef(match alias.kind {
            TokenKind::BackquotedIdentifier => Identifier::quoted(alias.value()),
            _ => Identifier::bare(alias.lexeme.clone()),
        });

        Ok(Statement::SelectAs {
            sql: self.text_between(head, body[n - 3]),
            table,
        })
    }

    /// `insert | create | drop | refresh` followed by anything up to `;`.
    ///
    /// Forwarded unchanged: the body is the statement text from the head
    /// keyword to the last significant token before the terminator.
    pub(crate) fn passthrough_statement(&mut self) -> ParseResult<Statement> {
        let head_token = self.advance();
        let kind = match head_token.kind {
            TokenKind::Keyword(Keyword::Insert) => PassthroughKind::Insert,
            TokenKind::Keyword(Keyword::Create) => PassthroughKind::Create,
            TokenKind::Keyword(Keyword::Drop) => PassthroughKind::Drop,
            _ => PassthroughKind::Refresh,
        };

        let head = self.previous_index();
        let mut last = head;
        while !self.at_statement_end() {
            self.advance();
            last = self.previous_index();
        }

        Ok(Statement::RawPassthrough {
            kind,
            body: self.text_between(head, last),
        })
    }

    /// `set key = value [marker] [assign] [and assign]*`
    pub(crate) fn set_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // set

        let key = self.qualified_name("a configuration key")?;
        self.expect(TokenKind::Eq, "'=' after the configuration key")?;
        let value = self.set_value()?;
        let options = self.option_clause()?;

        Ok(Statement::SetConfig {
            key,
            value,
            options,
        })
    }

    /// `connect format [marker] [assign] [and assign]* [as db]`
    pub(crate) fn connect_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // connect

        let format = self.identifier("a connector format")?;
        let options = self.option_clause()?;
        let db = if self.match_keyword(Keyword::As) {
            Some(self.db_ref()?)
        } else {
            None
        };

        Ok(Statement::Connect {
            format,
            options,
            db,
        })
    }

    /// `train | run` `table as format.path [marker] [assign] [and assign]*`
    pub(crate) fn train_statement(&mut self) -> ParseResult<Statement> {
        let kind = if self.advance().is_keyword(Keyword::Run) {
            TrainKind::Run
        } else {
            TrainKind::Train
        };

        let table = self.table_name()?;
        self.expect_keyword(Keyword::As, "'as' between the table and the algorithm")?;
        let target = self.format_path()?;
        let options = self.option_clause()?;

        Ok(Statement::TrainOrRun {
            kind,
            table,
            target,
            options,
        })
    }

    /// `register format.path as function [marker] [assign] [and assign]*`
    pub(crate) fn register_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // register

        let target = self.format_path()?;
        self.expect_keyword(Keyword::As, "'as' before the function name")?;
        let function = self.function_name()?;
        let options = self.option_clause()?;

        Ok(Statement::Register {
            kind: RegisterKind::Register,
            target,
            function: Some(function),
            options,
        })
    }

    /// `unregister format.path [marker] [assign] [and assign]*`
    pub(crate) fn unregister_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // unregister

        let target = self.format_path()?;
        let options = self.option_clause()?;

        Ok(Statement::Register {
            kind: RegisterKind::Unregister,
            target,
            function: None,
            options,
        })
    }

    /// `include format.path [marker] [assign] [and assign]*`
    pub(crate) fn include_statement(&mut self) -> ParseResult<Statement> {
        self.advance(); // include

        let target = self.format_path()?;
        let options = self.option_clause()?;

        Ok(Statement::Include { target, options })
    }
}
