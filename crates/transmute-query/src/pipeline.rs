//! Lex → parse → compile orchestration.
//!
//! ```text
//! raw query
//!   ├─> trim / redundant parentheses
//!   ├─> QueryLexer   (generic Node tree)   skipped when !requires_lexing
//!   ├─> QueryParser  (BooleanQuery IR)     with the effective field mapping
//!   └─> Compiler     (CompiledQuery)
//! ```
//!
//! The pipeline holds no per-call state: the field mapping is chosen per
//! call and handed to the parser, so one pipeline can be shared across
//! threads.

use crate::backend::{CompiledQuery, Compiler};
use crate::config::PipelineOptions;
use crate::error::PipelineResult;
use crate::lexer::{BooleanLexer, Node, QueryLexer};
use crate::parser::{FieldMapping, QueryParser};
use std::sync::Arc;
use tracing::{debug, info};

/// Reference marker given to the single leaf built when lexing is skipped
const UNLEXED_REFERENCE: usize = 1;

/// A full compilation pipeline for one backend.
pub struct Pipeline {
    lexer: Arc<dyn QueryLexer>,
    parser: Arc<dyn QueryParser>,
    compiler: Arc<dyn Compiler>,
    options: PipelineOptions,
}

impl Pipeline {
    /// Create a pipeline using the default [`BooleanLexer`]
    pub fn new(
        parser: Arc<dyn QueryParser>,
        compiler: Arc<dyn Compiler>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            lexer: Arc::new(BooleanLexer),
            parser,
            compiler,
            options,
        }
    }

    /// Replace the lexer
    pub fn with_lexer(mut self, lexer: Arc<dyn QueryLexer>) -> Self {
        self.lexer = lexer;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Mapping handed to the parser: the configured one when non-empty,
    /// otherwise the parser's own default.
    pub fn field_mapping(&self) -> &FieldMapping {
        if self.options.field_mapping.is_empty() {
            self.parser.field_mapping()
        } else {
            &self.options.field_mapping
        }
    }

    /// Lex, parse and compile a query.
    ///
    /// Only lexing can fail for well-formed operator tags; parsing fails
    /// when a proximity operator carries a malformed distance.
    pub fn execute(&self, query: &str) -> PipelineResult<Box<dyn CompiledQuery>> {
        let mapping = self.field_mapping();

        let mut query = query.trim().to_string();
        if self.options.add_redundant_parenthesis {
            if let Some(wrapped) = add_redundant_parenthesis(&query) {
                info!("adding a redundant set of parentheses to query");
                query = wrapped;
            }
        }

        let ast = if self.options.requires_lexing {
            let ast = self.lexer.lex(&query, &self.options.lex_options)?;
            debug!(lexer = self.lexer.name(), "lexed query");
            ast
        } else {
            Node {
                value: query,
                children: Vec::new(),
                operator: String::new(),
                reference: UNLEXED_REFERENCE,
            }
        };

        let ir = self.parser.parse(&ast, mapping)?;
        debug!(
            parser = self.parser.name(),
            keywords = ir.keyword_count(),
            "parsed query"
        );

        let compiled = self.compiler.compile(&ir);
        debug!(backend = self.compiler.name(), "compiled query");

        Ok(compiled)
    }
}

/// Wrap a single-line query in one more pair of parentheses when it is not
/// already a single top-level group.
///
/// Scans the parenthesis depth left to right; if it returns to zero at any
/// position other than the first or last character, the query holds more
/// than one top-level unit and is wrapped. Multi-line queries are never
/// wrapped. Returns `None` when no wrap is needed.
pub fn add_redundant_parenthesis(query: &str) -> Option<String> {
    if query.contains('\n') {
        return None;
    }

    let mut depth: i64 = 0;
    for (i, c) in query.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => {}
        }
        if i > 0 && i + 1 < query.len() && depth == 0 {
            return Some(format!("({})", query));
        }
    }
    None
}
