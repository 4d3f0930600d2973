//! Parser for Medline/PubMed style search strategies.
//!
//! Field qualifiers are read from either form:
//! - Medline suffix: `lung cancer.ti,ab.`
//! - PubMed tag: `lung cancer[tiab]`
//!
//! A suffix without the closing dot (`cancer.ti`) only counts as a
//! qualifier when every token is in the field mapping, so dotted terms
//! such as `h.pylori` stay whole.
//!
//! Unqualified terms are qualified with the `default` token. Each token is
//! expanded through the field mapping; tokens with no entry are kept as-is.

use crate::error::ParseError;
use crate::ir::{BooleanQuery, Keyword, Operator};
use crate::lexer::Node;
use crate::parser::{FieldMapping, QueryParser};
use once_cell::sync::Lazy;
use regex::Regex;

/// Medline field suffix: `term.ti,ab.`; the closing dot may be missing
static MEDLINE_FIELDS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<term>.+?)\.(?P<fields>[A-Za-z]{2,}(?:,[A-Za-z]{2,})*)(?P<close>\.)?$")
        .unwrap()
});

/// PubMed field tag: `term[tiab]`
static PUBMED_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<term>.+?)\s*\[(?P<fields>[^\]]+)\]$").unwrap());

/// Field token applied to terms without a qualifier
const DEFAULT_FIELD: &str = "default";

/// Medline/PubMed strategy parser
#[derive(Debug, Clone)]
pub struct MedlineParser {
    mapping: FieldMapping,
}

impl Default for MedlineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MedlineParser {
    /// Create a parser with the built-in field mapping
    pub fn new() -> Self {
        Self {
            mapping: default_field_mapping(),
        }
    }

    /// Create a parser with a custom default mapping
    pub fn with_mapping(mapping: FieldMapping) -> Self {
        Self { mapping }
    }

    fn parse_node(&self, node: &Node, mapping: &FieldMapping) -> Result<BooleanQuery, ParseError> {
        let mut query = BooleanQuery::new(parse_operator(node)?);

        for child in &node.children {
            if child.is_leaf() {
                query.keywords.push(self.parse_keyword(&child.value, mapping));
            } else {
                query.children.push(self.parse_node(child, mapping)?);
            }
        }

        Ok(query)
    }

    /// Split a term into its query string and expanded fields
    fn parse_keyword(&self, value: &str, mapping: &FieldMapping) -> Keyword {
        let value = value.trim();

        let medline = MEDLINE_FIELDS_RE.captures(value).filter(|caps| {
            caps.name("close").is_some()
                || caps.name("fields").is_some_and(|m| {
                    m.as_str()
                        .split(',')
                        .all(|token| mapping.contains_key(&token.to_ascii_lowercase()))
                })
        });

        let (term, tokens): (&str, Vec<&str>) = if let Some(caps) = medline {
            let term = caps.name("term").map_or(value, |m| m.as_str());
            let fields = caps.name("fields").map_or("", |m| m.as_str());
            (term, fields.split(',').collect())
        } else if let Some(caps) = PUBMED_TAG_RE.captures(value) {
            let term = caps.name("term").map_or(value, |m| m.as_str());
            let fields = caps.name("fields").map_or("", |m| m.as_str());
            (term, fields.split(',').collect())
        } else {
            (value, vec![DEFAULT_FIELD])
        };

        Keyword {
            query_string: term.trim().to_string(),
            fields: expand_fields(&tokens, mapping),
        }
    }
}

impl QueryParser for MedlineParser {
    fn name(&self) -> &'static str {
        "medline"
    }

    fn field_mapping(&self) -> &FieldMapping {
        &self.mapping
    }

    fn parse(&self, ast: &Node, mapping: &FieldMapping) -> Result<BooleanQuery, ParseError> {
        if ast.is_leaf() {
            return Ok(BooleanQuery::new(parse_operator(ast)?)
                .with_keyword(self.parse_keyword(&ast.value, mapping)));
        }
        self.parse_node(ast, mapping)
    }
}

fn parse_operator(node: &Node) -> Result<Operator, ParseError> {
    node.operator
        .parse()
        .map_err(|source| ParseError::Operator {
            reference: node.reference,
            source,
        })
}

fn expand_fields(tokens: &[&str], mapping: &FieldMapping) -> Vec<String> {
    let mut fields = Vec::new();
    for token in tokens {
        let token = token.trim().to_ascii_lowercase();
        if token.is_empty() {
            continue;
        }
        match mapping.get(&token) {
            Some(mapped) => fields.extend(mapped.iter().cloned()),
            None => fields.push(token),
        }
    }
    fields
}

/// Built-in mapping from Medline/PubMed field tokens to document fields
pub fn default_field_mapping() -> FieldMapping {
    let title = || "title".to_string();
    let abstract_ = || "abstract".to_string();

    FieldMapping::from([
        ("ti".to_string(), vec![title()]),
        ("ab".to_string(), vec![abstract_()]),
        ("tw".to_string(), vec![title(), abstract_()]),
        ("tiab".to_string(), vec![title(), abstract_()]),
        ("mh".to_string(), vec!["mesh_headings".to_string()]),
        (DEFAULT_FIELD.to_string(), vec![title(), abstract_()]),
    ])
}
