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
    ColumnRef, DbRef, ExpressionAssign, FormatPathRef, FunctionRef, Identifier, OptionClause,
    OptionMarker, QualifiedName, SetValue, TableRef,
};
use crate::error::Diagnostic;
use crate::lexer::keywords::Keyword;
use crate::lexer::token::TokenKind;
use crate::parser::parser::{ParseResult, Parser};

impl Parser {
    /// `IDENTIFIER | BACKQUOTED_IDENTIFIER`
    ///
    /// `expected` names the grammatical role for the diagnostic
    /// ("a table name", "an option key", …).
    pub(crate) fn identifier(&mut self, expected: &str) -> ParseResult<Identifier> {
        match self.peek().kind {
            TokenKind::Identifier => Ok(Identifier::bare(self.advance().lexeme)),
            TokenKind::BackquotedIdentifier => {
                let token = self.advance();
                let value = token.value();
                if value.is_empty() {
                    return Err(Diagnostic::syntax_error(
                        format!("expected {}, found an empty backquoted name", expected),
                        token.span,
                    ));
                }
                Ok(Identifier::quoted(value))
            }
            _ => Err(self.error_at_current(expected)),
        }
    }

    /// `identifier ('.' identifier)*`
    pub(crate) fn qualified_name(&mut self, expected: &str) -> ParseResult<QualifiedName> {
        let mut parts = vec![self.identifier(expected)?];

        while self.check(TokenKind::Dot) {
            self.advance();
            parts.push(self.identifier("a name after '.'")?);
        }

        Ok(QualifiedName::new(parts))
    }

    /// `format '.' path`
    pub(crate) fn format_path(&mut self) -> ParseResult<FormatPathRef> {
        let format = self.identifier("a format name")?;
        self.expect(TokenKind::Dot, "'.' between format and path")?;
        let path = self.path()?;
        Ok(FormatPathRef { format, path })
    }

    /// A backquoted path when one is present, otherwise a bare identifier.
    pub(crate) fn path(&mut self) -> ParseResult<Identifier> {
        self.identifier("a path")
    }

    pub(crate) fn table_name(&mut self) -> ParseResult<TableRef> {
        Ok(TableRef(self.identifier("a table name")?))
    }

    pub(crate) fn function_name(&mut self) -> ParseResult<FunctionRef> {
        Ok(FunctionRef(self.identifier("a function name")?))
    }

    pub(crate) fn column_name(&mut self) -> ParseResult<ColumnRef> {
        Ok(ColumnRef(self.identifier("a column name")?))
    }

    /// A single name, or a dotted one.
    pub(crate) fn db_ref(&mut self) -> ParseResult<DbRef> {
        let mut name = self.qualified_name("a connection name")?;
        if name.parts.len() == 1 {
            if let Some(only) = name.parts.pop() {
                return Ok(DbRef::Name(only));
            }
        }
        Ok(DbRef::Qualified(name))
    }

    /// Alternatives in order: qualified name, `STRING`, `BLOCK_STRING`.
    ///
    /// A backquoted value is a one-part qualified name, so the separate
    /// quoted-identifier alternative is folded into the first.
    pub(crate) fn set_value(&mut self) -> ParseResult<SetValue> {
        match self.peek().kind {
            TokenKind::Identifier | TokenKind::BackquotedIdentifier => {
                Ok(SetValue::Name(self.qualified_name("a value")?))
            }
            TokenKind::String => Ok(SetValue::String(self.advance().value())),
            TokenKind::BlockString => Ok(SetValue::BlockString(self.advance().value())),
            _ => Err(self.error_at_current("a value after '='")),
        }
    }

    /// `('options' | 'where')? expression? ('and' expression)*`
    ///
    /// Each part is optional on its own; an identifier right after the
    /// marker (or in its place) commits to an assignment.
    pub(crate) fn option_clause(&mut self) -> ParseResult<OptionClause> {
        let mut clause = OptionClause::default();

        if self.match_keyword(Keyword::Options) {
            clause.marker = Some(OptionMarker::Options);
        } else if self.match_keyword(Keyword::Where) {
            clause.marker = Some(OptionMarker::Where);
        }

        if self.peek().kind.is_identifier() {
            clause.assign = Some(self.expression()?);
        }

        while self.match_keyword(Keyword::And) {
            clause.filters.push(self.expression()?);
        }

        Ok(clause)
    }

    /// `identifier '=' STRING`
    ///
    /// Only a plain string is accepted as the value, unlike `set`, which
    /// also takes block strings and names.
    pub(crate) fn expression(&mut self) -> ParseResult<ExpressionAssign> {
        let key = self.identifier("an option key")?;
        self.expect(TokenKind::Eq, "'=' after the option key")?;

        if self.check(TokenKind::BlockString) {
            return Err(self
                .error_at_current("a string value")
                .with_help("block strings are only accepted as `set` values; use \"...\" here"));
        }

        let value = self.expect(TokenKind::String, "a string value")?.value();
        Ok(ExpressionAssign { key, value })
    }
}
