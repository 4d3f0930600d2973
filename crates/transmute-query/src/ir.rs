//! Common boolean-query intermediate representation.
//!
//! Every syntax parser produces a [`BooleanQuery`] and every backend
//! compiler consumes one, so adding a backend never touches parsing.

use crate::error::OperatorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boolean combinator joining a node's keywords and children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    /// Strict conjunction
    And,
    /// Disjunction
    Or,
    /// Negation
    Not,
    /// Terms must occur within the given token distance
    Adj(u32),
    /// Plain grouping; also used for empty and unrecognised tags
    #[default]
    Group,
}

impl Operator {
    /// Proximity distance, if this is a proximity operator
    pub fn distance(&self) -> Option<u32> {
        match self {
            Operator::Adj(distance) => Some(*distance),
            _ => None,
        }
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    /// Tags are the lowercase forms the lexer emits; any other spelling,
    /// including `AND`, is a plain group.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            "not" => Ok(Operator::Not),
            // A bare "adj" carries no distance and is treated as grouping
            other if other.len() > 3 && other.starts_with("adj") => {
                let distance = &other[3..];
                distance
                    .parse::<u32>()
                    .map(Operator::Adj)
                    .map_err(|_| OperatorError::InvalidDistance {
                        tag: tag.to_string(),
                        distance: distance.to_string(),
                    })
            }
            _ => Ok(Operator::Group),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = OperatorError;

    fn try_from(tag: String) -> Result<Self, Self::Error> {
        tag.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::And => f.write_str("and"),
            Operator::Or => f.write_str("or"),
            Operator::Not => f.write_str("not"),
            Operator::Adj(distance) => write!(f, "adj{}", distance),
            Operator::Group => Ok(()),
        }
    }
}

/// A search term restricted to one or more document fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Keyword {
    /// The term as it should appear in the target query
    pub query_string: String,
    /// Fields the term applies to, in declaration order
    #[serde(default)]
    pub fields: Vec<String>,
}

impl Keyword {
    pub fn new<I, S>(query_string: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            query_string: query_string.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// A node of the boolean query tree.
///
/// Keywords and children are both combined under `operator`; renderers
/// emit keywords first, then children, each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BooleanQuery {
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default)]
    pub children: Vec<BooleanQuery>,
}

impl BooleanQuery {
    pub fn new(operator: Operator) -> Self {
        Self {
            operator,
            ..Default::default()
        }
    }

    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        self.keywords.push(keyword);
        self
    }

    pub fn with_child(mut self, child: BooleanQuery) -> Self {
        self.children.push(child);
        self
    }

    /// Total number of keywords in this node and all descendants
    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
            + self
                .children
                .iter()
                .map(BooleanQuery::keyword_count)
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("and", Operator::And ; "conjunction")]
    #[test_case("AND", Operator::Group ; "uppercase conjunction")]
    #[test_case("or", Operator::Or ; "disjunction")]
    #[test_case("not", Operator::Not ; "negation")]
    #[test_case("adj3", Operator::Adj(3) ; "proximity")]
    #[test_case("adj10", Operator::Adj(10) ; "two digit proximity")]
    #[test_case("ADJ10", Operator::Group ; "uppercase proximity")]
    #[test_case("", Operator::Group ; "empty tag")]
    #[test_case("adj", Operator::Group ; "bare adj")]
    #[test_case("near", Operator::Group ; "unknown tag")]
    fn test_operator_from_tag(tag: &str, expected: Operator) {
        assert_eq!(tag.parse::<Operator>().unwrap(), expected);
    }

    #[test]
    fn test_malformed_distance_rejected() {
        let err = "adjX".parse::<Operator>().unwrap_err();
        assert_eq!(
            err,
            OperatorError::InvalidDistance {
                tag: "adjX".to_string(),
                distance: "X".to_string(),
            }
        );
    }

    #[test]
    fn test_overflowing_distance_rejected() {
        assert!("adj99999999999".parse::<Operator>().is_err());
    }

    #[test]
    fn test_negative_distance_rejected() {
        assert!("adj-1".parse::<Operator>().is_err());
    }

    #[test]
    fn test_display_round_trips_tag() {
        for op in [
            Operator::And,
            Operator::Or,
            Operator::Not,
            Operator::Adj(4),
            Operator::Group,
        ] {
            assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn test_distance() {
        assert_eq!(Operator::Adj(2).distance(), Some(2));
        assert_eq!(Operator::And.distance(), None);
    }

    #[test]
    fn test_deserialize_query_from_json() {
        let json = r#"{
            "operator": "and",
            "keywords": [{"query_string": "cancer", "fields": ["ti"]}],
            "children": [{"operator": "adj2", "keywords": [{"query_string": "lung", "fields": ["ab"]}]}]
        }"#;
        let query: BooleanQuery = serde_json::from_str(json).unwrap();

        let expected = BooleanQuery::new(Operator::And)
            .with_keyword(Keyword::new("cancer", ["ti"]))
            .with_child(
                BooleanQuery::new(Operator::Adj(2)).with_keyword(Keyword::new("lung", ["ab"])),
            );
        assert_eq!(query, expected);
    }

    #[test]
    fn test_deserialize_uppercase_operator_is_group() {
        let json = r#"{"operator": "AND", "keywords": [{"query_string": "a", "fields": ["ti"]}]}"#;
        let query: BooleanQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.operator, Operator::Group);
    }

    #[test]
    fn test_deserialize_rejects_malformed_operator() {
        let json = r#"{"operator": "adjX"}"#;
        assert!(serde_json::from_str::<BooleanQuery>(json).is_err());
    }

    #[test]
    fn test_keyword_count_spans_tree() {
        let query = BooleanQuery::new(Operator::Or)
            .with_keyword(Keyword::new("a", ["ti"]))
            .with_child(
                BooleanQuery::new(Operator::And)
                    .with_keyword(Keyword::new("b", ["ti"]))
                    .with_keyword(Keyword::new("c", ["ab"])),
            );
        assert_eq!(query.keyword_count(), 3);
    }
}
