//! JSON backend.
//!
//! Emits the IR itself as JSON, for tools that consume the common
//! representation directly rather than an engine's query syntax.

use crate::backend::{CompiledQuery, Compiler};
use crate::ir::BooleanQuery;
use serde_json::Value;
use tracing::debug;

/// Compiled JSON query
#[derive(Debug, Clone, PartialEq)]
pub struct JsonQuery {
    value: Value,
}

impl JsonQuery {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl CompiledQuery for JsonQuery {
    fn string(&self) -> String {
        self.value.to_string()
    }

    fn string_pretty(&self) -> String {
        // Writing a `Value` to a string only fails on I/O, which cannot happen here
        serde_json::to_string_pretty(&self.value).unwrap_or_else(|err| {
            debug!(error = %err, "pretty printing failed, using canonical form");
            self.string()
        })
    }

    fn representation(&self) -> Value {
        self.value.clone()
    }
}

/// JSON backend
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBackend;

impl JsonBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Compiler for JsonBackend {
    fn name(&self) -> &str {
        "json"
    }

    fn compile(&self, query: &BooleanQuery) -> Box<dyn CompiledQuery> {
        // The IR has only string keys and plain values, so this cannot fail
        let value = serde_json::to_value(query).unwrap_or_else(|err| {
            debug!(error = %err, "serializing query failed");
            Value::Null
        });
        Box::new(JsonQuery::new(value))
    }
}
