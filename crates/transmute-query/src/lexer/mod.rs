//! Lexing of raw query text into a generic parse tree.
//!
//! The tree carries operator tags as plain strings; deciding what a tag
//! means is left to the [`QueryParser`](crate::parser::QueryParser).
//!
//! Multi-line input is read as a numbered search strategy: each line is a
//! statement and a bare number on a later line refers back to an earlier
//! one.
//!
//! ```text
//! 1. lung cancer.ti,ab.
//! 2. smoking.ti.
//! 3. 1 AND 2
//! ```

mod grammar;

pub use grammar::format_errors;

use crate::error::LexError;
use chumsky::Parser;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Optional `1.` numbering at the start of a strategy line, possibly
/// inside an opening parenthesis added around the whole line
static LINE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<open>\(\s*)?\d+\.\s+").unwrap());

/// Generic parse tree produced by lexing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Term text for leaves, empty for operator nodes
    pub value: String,
    pub children: Vec<Node>,
    /// Lowercase operator tag, empty for leaves
    pub operator: String,
    /// 1-based source line the node came from
    pub reference: usize,
}

impl Node {
    /// A leaf holding a single term
    pub fn leaf(value: String) -> Self {
        Self {
            value,
            ..Default::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn set_reference(&mut self, reference: usize) {
        self.reference = reference;
        for child in &mut self.children {
            child.set_reference(reference);
        }
    }
}

/// Options controlling lexing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexOptions {
    /// Resolve bare line numbers on later lines to the referenced statement
    pub line_references: bool,
}

impl Default for LexOptions {
    fn default() -> Self {
        Self {
            line_references: true,
        }
    }
}

/// Trait for turning raw query text into a generic parse tree.
pub trait QueryLexer: Send + Sync {
    /// Unique name for this lexer
    fn name(&self) -> &'static str;

    /// Lex the (already trimmed) query text
    fn lex(&self, query: &str, options: &LexOptions) -> Result<Node, LexError>;
}

/// Lexer for infix boolean queries with `AND`/`OR`/`NOT`/`ADJn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanLexer;

impl QueryLexer for BooleanLexer {
    fn name(&self) -> &'static str {
        "boolean"
    }

    fn lex(&self, query: &str, options: &LexOptions) -> Result<Node, LexError> {
        let lines: Vec<&str> = query
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let mut statements: Vec<Node> = Vec::with_capacity(lines.len());
        for (idx, line) in lines.iter().enumerate() {
            let reference = idx + 1;
            let text = LINE_NUMBER_RE.replace(line, "${open}");

            let mut node = grammar::expression()
                .parse(text.as_ref())
                .into_result()
                .map_err(|errs| LexError::Syntax {
                    line: reference,
                    message: format_errors(&errs, text.as_ref()),
                })?;
            node.set_reference(reference);

            if options.line_references && !statements.is_empty() {
                node = resolve_references(node, &statements);
            }
            statements.push(node);
        }

        statements.pop().ok_or(LexError::Empty)
    }
}

/// Lex with the default [`BooleanLexer`]
pub fn lex(query: &str, options: &LexOptions) -> Result<Node, LexError> {
    BooleanLexer.lex(query, options)
}

/// Replace numeric leaves with the earlier statements they refer to.
fn resolve_references(mut node: Node, statements: &[Node]) -> Node {
    if node.is_leaf() {
        if let Ok(line) = node.value.parse::<usize>() {
            if line >= 1 && line <= statements.len() {
                return statements[line - 1].clone();
            }
        }
        return node;
    }

    node.children = node
        .children
        .into_iter()
        .map(|child| resolve_references(child, statements))
        .collect();
    node
}
