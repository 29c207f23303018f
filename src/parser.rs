use tracing::trace;

use crate::ast::{
    Combinator, CombinatorKind, FilterKind, FilterSelector, Selector, SimpleSelector,
    SimpleSelectorKind, Token, TokenKind,
};
use crate::lexer::{self, COMBINATOR_SYMBOLS, FILTER_DELIMITERS};

/// Parse a full query into its selectors.
///
/// The query is normalized first; a query containing any character
/// outside the selector alphabet parses to no selectors at all. Each
/// comma-separated piece becomes one selector, even an empty piece,
/// which simply matches nothing.
pub fn parse_query(full_query: &str) -> Vec<Selector> {
    let query = lexer::normalize(full_query);
    if !lexer::is_valid_query(&query) {
        trace!(query = %full_query, "query rejected, character outside the selector alphabet");
        return Vec::new();
    }
    query.split(',').map(parse_selector).collect()
}

/// Parse one selector: the simple selectors between combinator symbols,
/// plus the combinators themselves in encounter order.
pub fn parse_selector(query: &str) -> Selector {
    let simple_selectors: Vec<SimpleSelector> =
        query.split(COMBINATOR_SYMBOLS).filter_map(parse_simple).collect();
    let combinators: Vec<Combinator> = query.chars().filter_map(parse_combinator).collect();

    trace!(
        query = %query,
        simple = simple_selectors.len(),
        combinators = combinators.len(),
        "parsed selector"
    );

    Selector {
        query: query.to_string(),
        simple_selectors,
        combinators,
    }
}

/// Parse one simple selector.
///
/// A leading `*` or element name becomes the main token. Any other
/// leading symbol implies `*`, and the whole text is treated as filters.
pub fn parse_simple(query: &str) -> Option<SimpleSelector> {
    let tokens = lexer::tokenize(query);
    let first = tokens.first()?;

    let (kind, main_token, filter_start) = match first.kind {
        TokenKind::Symbol if first.is_symbol('*') => {
            (SimpleSelectorKind::Universal, first.clone(), 1)
        }
        TokenKind::Symbol => (SimpleSelectorKind::Universal, Token::symbol('*'), 0),
        TokenKind::Identifier => (SimpleSelectorKind::Element, first.clone(), 1),
    };

    let filter_text: String = tokens[filter_start..]
        .iter()
        .map(|token| token.text.as_str())
        .collect();
    let filters = split_filter_clauses(&filter_text)
        .iter()
        .filter_map(|clause| parse_filter(clause))
        .collect();

    Some(SimpleSelector {
        query: query.to_string(),
        kind,
        main_token,
        filters,
    })
}

/// Split a filter region into clauses; each `.`, `#` or `[` starts a new
/// clause, and whatever precedes the first delimiter is a clause of its
/// own.
fn split_filter_clauses(text: &str) -> Vec<String> {
    let mut clauses = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if FILTER_DELIMITERS.contains(&ch) && !current.is_empty() {
            clauses.push(std::mem::take(&mut current));
        }
        current.push(ch);
    }
    if !current.is_empty() {
        clauses.push(current);
    }

    clauses
}

/// Parse one filter clause.
///
/// A clause that does not begin with a symbol parses to nothing and is
/// skipped by the caller; a clause beginning with a symbol other than
/// `.` `#` `[` stays in the chain as unsupported and matches no nodes.
pub fn parse_filter(clause: &str) -> Option<FilterSelector> {
    let tokens = lexer::tokenize(clause);
    let first = tokens.first()?;
    if first.kind != TokenKind::Symbol {
        return None;
    }

    let kind = match first.text.as_str() {
        "." => FilterKind::Style,
        "#" => FilterKind::Name,
        "[" => FilterKind::Property,
        _ => FilterKind::Unsupported,
    };

    Some(FilterSelector {
        query: clause.to_string(),
        kind,
        tokens,
    })
}

/// Map a combinator character; any other character maps to nothing.
pub fn parse_combinator(symbol: char) -> Option<Combinator> {
    let kind = match symbol {
        ' ' => CombinatorKind::Descendant,
        '>' => CombinatorKind::Child,
        '+' => CombinatorKind::Adjacent,
        _ => return None,
    };
    Some(Combinator { kind, symbol })
}
