//! Terrier query-language backend.
//!
//! Renders:
//! - `and` as a required group: ` +( ... ) `
//! - `adjN` as a quoted phrase with a proximity window: `" ... "~N `
//! - everything else as a plain group: ` ( ... ) `
//!
//! Each field of a keyword yields its own `field:term` fragment.

use crate::backend::{CompiledQuery, Compiler};
use crate::ir::{BooleanQuery, Operator};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::fmt;

/// Runs of spaces collapsed when reading a compiled query
static SPACES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").unwrap());

/// Compiled Terrier query.
///
/// The buffer keeps whatever spacing compilation produced; runs of space
/// characters are collapsed on read. Tabs and newlines are left alone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TerrierQuery {
    repr: String,
}

impl TerrierQuery {
    pub fn new(repr: impl Into<String>) -> Self {
        Self { repr: repr.into() }
    }

    /// The raw, uncollapsed buffer
    pub fn raw(&self) -> &str {
        &self.repr
    }
}

impl CompiledQuery for TerrierQuery {
    fn string(&self) -> String {
        SPACES_RE.replace_all(&self.repr, " ").into_owned()
    }

    fn representation(&self) -> Value {
        Value::String(self.string())
    }
}

impl fmt::Display for TerrierQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string())
    }
}

/// Terrier backend
#[derive(Debug, Clone, Copy, Default)]
pub struct TerrierBackend;

impl TerrierBackend {
    pub fn new() -> Self {
        Self
    }

    /// Compile to the concrete query type
    pub fn compile_query(&self, query: &BooleanQuery) -> TerrierQuery {
        let mut repr = String::new();

        match query.operator {
            Operator::And => repr.push_str(" +( "),
            Operator::Adj(_) => repr.push('"'),
            _ => repr.push_str(" ( "),
        }

        for keyword in &query.keywords {
            for field in &keyword.fields {
                repr.push_str(&format!(" {}:{} ", field, keyword.query_string));
            }
        }

        for child in &query.children {
            repr.push_str(&self.compile_query(child).string());
        }

        match query.operator {
            Operator::Adj(distance) => repr.push_str(&format!("\"~{} ", distance)),
            _ => repr.push_str(" ) "),
        }

        TerrierQuery { repr }
    }
}

impl Compiler for TerrierBackend {
    fn name(&self) -> &str {
        "terrier"
    }

    fn compile(&self, query: &BooleanQuery) -> Box<dyn CompiledQuery> {
        Box::new(self.compile_query(query))
    }
}
