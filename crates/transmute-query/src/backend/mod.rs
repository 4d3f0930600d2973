//! Target backends for the boolean query IR.
//!
//! A backend [`Compiler`] turns the backend-agnostic [`BooleanQuery`] into
//! a [`CompiledQuery`] for one search engine. Compilation is total: any
//! IR tree produces some output, whether or not the engine accepts it.

mod json;
mod terrier;

pub use json::{JsonBackend, JsonQuery};
pub use terrier::{TerrierBackend, TerrierQuery};

use crate::ir::BooleanQuery;
use serde_json::Value;
use std::fmt;

/// Output of a backend compiler.
pub trait CompiledQuery: fmt::Debug + Send + Sync {
    /// Canonical query string
    fn string(&self) -> String;

    /// Human-readable form; defaults to the canonical string
    fn string_pretty(&self) -> String {
        self.string()
    }

    /// Structured form for programmatic consumers
    fn representation(&self) -> Value;
}

/// Trait for compiling the IR to a target query syntax.
pub trait Compiler: Send + Sync {
    /// Unique name for this backend
    fn name(&self) -> &str;

    /// Compile the IR tree
    fn compile(&self, query: &BooleanQuery) -> Box<dyn CompiledQuery>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Operator;

    #[derive(Debug)]
    struct MockQuery;

    impl CompiledQuery for MockQuery {
        fn string(&self) -> String {
            "mock".to_string()
        }

        fn representation(&self) -> Value {
            Value::Null
        }
    }

    struct MockCompiler;

    impl Compiler for MockCompiler {
        fn name(&self) -> &str {
            "mock"
        }

        fn compile(&self, _query: &BooleanQuery) -> Box<dyn CompiledQuery> {
            Box::new(MockQuery)
        }
    }

    #[test]
    fn test_pretty_defaults_to_canonical() {
        let compiled = MockCompiler.compile(&BooleanQuery::new(Operator::Or));
        assert_eq!(compiled.string(), "mock");
        assert_eq!(compiled.string_pretty(), "mock");
    }
}
