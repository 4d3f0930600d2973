//! Pipeline configuration.

use crate::error::ConfigError;
use crate::lexer::LexOptions;
use crate::parser::FieldMapping;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options applied to every [`Pipeline::execute`](crate::pipeline::Pipeline::execute) call.
///
/// ```toml
/// add_redundant_parenthesis = true
/// requires_lexing = true
///
/// [lex_options]
/// line_references = true
///
/// [field_mapping]
/// ti = ["title"]
/// tw = ["title", "abstract"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Wrap single-line queries that are not one top-level group in parentheses
    pub add_redundant_parenthesis: bool,

    /// When false the trimmed query is handed to the parser as a single leaf
    pub requires_lexing: bool,

    /// Passed through to the lexer
    pub lex_options: LexOptions,

    /// Overrides the parser's own mapping when non-empty
    pub field_mapping: FieldMapping,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            add_redundant_parenthesis: false,
            requires_lexing: true,
            lex_options: LexOptions::default(),
            field_mapping: FieldMapping::new(),
        }
    }
}

impl PipelineOptions {
    /// Parse options from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
