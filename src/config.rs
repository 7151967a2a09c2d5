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
use thiserror::Error;

/// Parse options that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid parse options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Knobs for a single parse call.
///
/// Deserialisable so a host can keep them next to the rest of its
/// configuration:
/// ```json
/// { "comment_statements": false, "max_diagnostics": 10 }
/// ```
/// Missing fields take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Turn line comments in statement position into `CommentOnly`
    /// statements. When off they are skipped like any other comment.
    pub comment_statements: bool,

    /// Stop parsing once this many diagnostics have been collected. The
    /// diagnostic that reaches the limit is kept; `0` behaves like `1`.
    pub max_diagnostics: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            comment_statements: true,
            max_diagnostics: None,
        }
    }
}

impl ParseOptions {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn without_comments(mut self) -> Self {
        self.comment_statements = false;
        self
    }

    pub fn with_max_diagnostics(mut self, limit: usize) -> Self {
        self.max_diagnostics = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let options = ParseOptions::from_json(r#"{ "max_diagnostics": 3 }"#).expect("valid json");
        assert!(options.comment_statements);
        assert_eq!(options.max_diagnostics, Some(3));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = ParseOptions::from_json("{ nope").expect_err("invalid json");
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("invalid parse options: "));
    }
}
