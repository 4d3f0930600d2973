//! Error types for the query pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while lexing raw query text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// Nothing to lex after trimming
    #[error("Query is empty")]
    Empty,

    /// The query text does not follow the boolean grammar
    #[error("Syntax error on line {line}:\n{message}")]
    Syntax { line: usize, message: String },
}

/// Errors raised when an operator tag cannot be turned into an [`Operator`](crate::ir::Operator)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperatorError {
    /// Proximity operator whose distance is not an unsigned integer
    #[error("Invalid proximity distance '{distance}' in operator '{tag}'")]
    InvalidDistance { tag: String, distance: String },
}

/// Errors raised while converting a lexed tree into the IR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Operator tag on a node was rejected
    #[error("Line {reference}: {source}")]
    Operator {
        reference: usize,
        #[source]
        source: OperatorError,
    },
}

/// Errors raised while loading pipeline options
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Options file could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Options file is not valid TOML for [`PipelineOptions`](crate::config::PipelineOptions)
    #[error("Invalid pipeline options: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Errors surfaced by [`Pipeline::execute`](crate::pipeline::Pipeline::execute)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Result type for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
