//! chumsky grammar for a single line of boolean query text.
//!
//! ```text
//! expr  := atom (OP atom)*
//! atom  := '(' expr ')' | "quoted phrase" | word+
//! OP    := AND | OR | NOT | ADJ<n>       (case-insensitive)
//! ```
//!
//! A run of words that are not operator keywords forms a single term, so
//! `lung cancer.ti AND smoking` has two terms.

use super::Node;
use chumsky::extra;
use chumsky::prelude::*;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Characters that can never appear inside a bare word
const RESERVED: &str = "()\" \t\r\n";

/// Normalised operator tag for a bare word, if it is an operator keyword
pub(crate) fn operator_tag(word: &str) -> Option<String> {
    let lower = word.to_ascii_lowercase();
    match lower.as_str() {
        "and" | "or" | "not" => Some(lower),
        _ => {
            let distance = lower.strip_prefix("adj")?;
            if distance.chars().all(|c| c.is_ascii_digit()) {
                Some(lower)
            } else {
                None
            }
        }
    }
}

/// Parser for one bare word that is not an operator keyword
fn word<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    none_of(RESERVED)
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| match operator_tag(s) {
            Some(_) => Err(Rich::custom(span, format!("unexpected operator '{}'", s))),
            None => Ok(s.to_string()),
        })
        .labelled("search term")
}

/// Parser for a run of words joined into one term: `lung cancer.ti`
fn term<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    word()
        .padded()
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>()
        .map(|words| words.join(" "))
}

/// Parser for a double-quoted phrase; the quotes are kept in the term
fn phrase<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    just('"')
        .ignore_then(none_of("\"").repeated().to_slice())
        .then_ignore(just('"'))
        .then(none_of(RESERVED).repeated().to_slice())
        .map(|(inner, suffix): (&str, &str)| format!("\"{}\"{}", inner, suffix))
        .labelled("quoted phrase")
}

/// Parser for an operator keyword, yielding its lowercase tag
fn operator<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric())
        .repeated()
        .at_least(1)
        .to_slice()
        .try_map(|s: &str, span| {
            operator_tag(s).ok_or_else(|| Rich::custom(span, "expected AND, OR, NOT or ADJn"))
        })
        .padded()
        .labelled("operator")
}

/// Parser for a whole line expression
pub fn expression<'src>() -> impl Parser<'src, &'src str, Node, Extra<'src>> {
    recursive(|expr| {
        let group = expr.delimited_by(just('(').padded(), just(')').padded());

        let atom = choice((group, phrase().map(Node::leaf), term().map(Node::leaf))).padded();

        atom.clone()
            .foldl(operator().then(atom).repeated(), |lhs, (op, rhs)| {
                combine(lhs, op, rhs)
            })
    })
    .then_ignore(end())
}

/// Join two operands, extending the left node when the operator chain repeats.
fn combine(mut lhs: Node, op: String, rhs: Node) -> Node {
    let associative = op == "and" || op == "or";
    if associative && lhs.operator == op {
        lhs.children.push(rhs);
        return lhs;
    }
    Node {
        value: String::new(),
        children: vec![lhs, rhs],
        operator: op,
        reference: 0,
    }
}

/// Format chumsky errors for human consumption
pub fn format_errors(errs: &[Rich<'_, char>], input: &str) -> String {
    errs.iter()
        .map(|e| {
            let start = e.span().start;
            let col = input[..start].chars().count() + 1;

            let found = e
                .found()
                .map_or("end of input".to_string(), |c| format!("'{}'", c));

            format!("column {}: {} (found {})", col, e.reason(), found)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Node {
        expression().parse(input).into_result().unwrap()
    }

    #[test]
    fn test_operator_tag() {
        assert_eq!(operator_tag("AND"), Some("and".to_string()));
        assert_eq!(operator_tag("adj3"), Some("adj3".to_string()));
        assert_eq!(operator_tag("adj"), Some("adj".to_string()));
        assert_eq!(operator_tag("adjacent"), None);
        assert_eq!(operator_tag("cancer"), None);
    }

    #[test]
    fn test_single_word() {
        let node = parse("cancer");
        assert_eq!(node.value, "cancer");
        assert!(node.children.is_empty());
        assert!(node.operator.is_empty());
    }

    #[test]
    fn test_multi_word_term() {
        let node = parse("lung cancer.ti");
        assert_eq!(node.value, "lung cancer.ti");
    }

    #[test]
    fn test_binary_and() {
        let node = parse("cancer AND lung");
        assert_eq!(node.operator, "and");
        assert_eq!(node.children.len(), 2);
        assert_eq!(node.children[0].value, "cancer");
        assert_eq!(node.children[1].value, "lung");
    }

    #[test]
    fn test_chain_folds_into_one_node() {
        let node = parse("a or b OR c");
        assert_eq!(node.operator, "or");
        assert_eq!(node.children.len(), 3);
    }

    #[test]
    fn test_mixed_operators_nest_left() {
        let node = parse("a AND b OR c");
        assert_eq!(node.operator, "or");
        assert_eq!(node.children[0].operator, "and");
        assert_eq!(node.children[1].value, "c");
    }

    #[test]
    fn test_proximity_chain_does_not_fold() {
        let node = parse("a adj2 b adj2 c");
        assert_eq!(node.operator, "adj2");
        assert_eq!(node.children[0].operator, "adj2");
        assert_eq!(node.children[1].value, "c");
    }

    #[test]
    fn test_parenthesised_group() {
        let node = parse("cancer AND (lung OR breast)");
        assert_eq!(node.operator, "and");
        assert_eq!(node.children[1].operator, "or");
        assert_eq!(node.children[1].children.len(), 2);
    }

    #[test]
    fn test_redundant_outer_parens() {
        assert_eq!(parse("(a AND b)"), parse("a AND b"));
    }

    #[test]
    fn test_quoted_phrase_with_suffix() {
        let node = parse("\"lung cancer\".ti,ab. AND smoking");
        assert_eq!(node.children[0].value, "\"lung cancer\".ti,ab.");
    }

    #[test]
    fn test_unbalanced_parens_fail() {
        assert!(expression().parse("(a AND b").into_result().is_err());
    }

    #[test]
    fn test_dangling_operator_fails() {
        assert!(expression().parse("a AND").into_result().is_err());
    }

    #[test]
    fn test_format_errors_reports_column() {
        let input = "a AND";
        let errs = expression().parse(input).into_result().unwrap_err();
        let message = format_errors(&errs, input);
        assert!(message.starts_with("column "));
    }
}
