//! Boolean search-query translation.
//!
//! Turns search strategies written in a common boolean syntax into the
//! query language of a target search engine:
//!
//! ```text
//! raw text ─> lexer ─> Node tree ─> parser ─> BooleanQuery IR ─> backend ─> CompiledQuery
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//! use transmute_query::{CompiledQuery, MedlineParser, Pipeline, PipelineOptions, TerrierBackend};
//!
//! let pipeline = Pipeline::new(
//!     Arc::new(MedlineParser::new()),
//!     Arc::new(TerrierBackend::new()),
//!     PipelineOptions::default(),
//! );
//! let compiled = pipeline.execute("cancer.ti AND lung.ab").unwrap();
//! assert_eq!(compiled.string(), " +( title:cancer abstract:lung ) ");
//! ```

pub mod backend;
pub mod config;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod pipeline;

pub use backend::{CompiledQuery, Compiler, JsonBackend, JsonQuery, TerrierBackend, TerrierQuery};
pub use config::PipelineOptions;
pub use error::{ConfigError, LexError, OperatorError, ParseError, PipelineError, PipelineResult};
pub use ir::{BooleanQuery, Keyword, Operator};
pub use lexer::{lex, BooleanLexer, LexOptions, Node, QueryLexer};
pub use parser::{default_field_mapping, FieldMapping, MedlineParser, QueryParser};
pub use pipeline::{add_redundant_parenthesis, Pipeline};
