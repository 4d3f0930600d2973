//! Conversion of lexed trees into the common [`BooleanQuery`] IR.
//!
//! The field mapping is passed into every `parse` call rather than stored
//! on the parser, so one parser can serve many pipelines and threads.

mod medline;

pub use medline::{default_field_mapping, MedlineParser};

use crate::error::ParseError;
use crate::ir::BooleanQuery;
use crate::lexer::Node;
use std::collections::HashMap;

/// Maps a user-facing field token (`ti`) to one or more backend field names.
pub type FieldMapping = HashMap<String, Vec<String>>;

/// Trait for query syntax parsers.
pub trait QueryParser: Send + Sync {
    /// Unique name for this parser
    fn name(&self) -> &'static str;

    /// Mapping used when the caller does not supply one
    fn field_mapping(&self) -> &FieldMapping;

    /// Parse a lexed tree into the IR using `mapping` for field qualifiers.
    fn parse(&self, ast: &Node, mapping: &FieldMapping) -> Result<BooleanQuery, ParseError>;
}
