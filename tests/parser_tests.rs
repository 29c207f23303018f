// tests/parser_tests.rs

use sceneq::ast::{CombinatorKind, FilterKind, SimpleSelectorKind};
use sceneq::parser::{parse_combinator, parse_filter, parse_query, parse_selector, parse_simple};

// ============================================================================
// Filter Clauses
// ============================================================================

#[test]
fn test_filter_kinds() {
    let test_cases = vec![
        (".Primary", FilterKind::Style),
        ("#Ok", FilterKind::Name),
        ("[Width=80]", FilterKind::Property),
        ("=B", FilterKind::Unsupported),
        ("]x", FilterKind::Unsupported),
        ("_x", FilterKind::Unsupported),
    ];

    for (input, expected) in test_cases {
        let filter = parse_filter(input).unwrap();
        assert_eq!(filter.kind, expected, "Failed for input: {}", input);
        assert_eq!(filter.query, input);
    }
}

#[test]
fn test_filter_keeps_its_tokens() {
    let filter = parse_filter("[Width=80]").unwrap();
    assert_eq!(filter.tokens.len(), 5);
    assert!(filter.tokens[0].is_symbol('['));
    assert_eq!(filter.tokens[1].text, "Width");
    assert!(filter.tokens[2].is_symbol('='));
    assert_eq!(filter.tokens[3].text, "80");
    assert!(filter.tokens[4].is_symbol(']'));
}

#[test]
fn test_clause_without_leading_symbol_is_no_filter() {
    assert!(parse_filter("foo").is_none());
    assert!(parse_filter("").is_none());
}

// ============================================================================
// Simple Selectors
// ============================================================================

#[test]
fn test_element_selector() {
    let simple = parse_simple("Button").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Element);
    assert_eq!(simple.main_token.text, "Button");
    assert!(simple.filters.is_empty());
}

#[test]
fn test_universal_selector() {
    let simple = parse_simple("*").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Universal);
    assert_eq!(simple.main_token.text, "*");
    assert!(simple.filters.is_empty());
}

#[test]
fn test_leading_filter_implies_universal() {
    let simple = parse_simple("#Ok").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Universal);
    assert_eq!(simple.main_token.text, "*");
    assert_eq!(simple.filters.len(), 1);
    assert_eq!(simple.filters[0].kind, FilterKind::Name);
}

#[test]
fn test_filters_stay_in_written_order() {
    let simple = parse_simple("Button.A#B[C=1]").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Element);
    let kinds: Vec<FilterKind> = simple.filters.iter().map(|f| f.kind).collect();
    assert_eq!(
        kinds,
        vec![FilterKind::Style, FilterKind::Name, FilterKind::Property]
    );
}

#[test]
fn test_repeated_filters_of_one_kind() {
    let simple = parse_simple("Button.First.Second").unwrap();
    assert_eq!(simple.filters.len(), 2);
    assert_eq!(simple.filters[0].query, ".First");
    assert_eq!(simple.filters[1].query, ".Second");

    let simple = parse_simple("[A=1][B=2]").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Universal);
    assert_eq!(simple.filters.len(), 2);
}

#[test]
fn test_unparseable_clause_is_skipped() {
    // "foo" trails the star without a filter delimiter, so it parses to
    // no filter at all and the star stands alone.
    let simple = parse_simple("*foo").unwrap();
    assert_eq!(simple.kind, SimpleSelectorKind::Universal);
    assert!(simple.filters.is_empty());
}

#[test]
fn test_empty_text_is_no_selector() {
    assert!(parse_simple("").is_none());
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_selector_with_child_combinator() {
    let selector = parse_selector("Panel>Button");
    assert_eq!(selector.simple_selectors.len(), 2);
    assert_eq!(selector.combinators.len(), 1);
    assert_eq!(selector.combinators[0].kind, CombinatorKind::Child);
}

#[test]
fn test_selector_interleaves_combinators() {
    let selector = parse_selector("Panel Button+Label");
    assert_eq!(selector.simple_selectors.len(), 3);
    let kinds: Vec<CombinatorKind> = selector.combinators.iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![CombinatorKind::Descendant, CombinatorKind::Adjacent]);
}

#[test]
fn test_doubled_combinator_leaves_a_surplus() {
    // The empty segment between the two '>' drops out, leaving one more
    // combinator than the selectors can consume.
    let selector = parse_selector("Panel>>Button");
    assert_eq!(selector.simple_selectors.len(), 2);
    assert_eq!(selector.combinators.len(), 2);
}

#[test]
fn test_trailing_combinator() {
    let selector = parse_selector("Button>");
    assert_eq!(selector.simple_selectors.len(), 1);
    assert_eq!(selector.combinators.len(), 1);
}

#[test]
fn test_combinator_characters() {
    assert_eq!(parse_combinator(' ').unwrap().kind, CombinatorKind::Descendant);
    assert_eq!(parse_combinator('>').unwrap().kind, CombinatorKind::Child);
    assert_eq!(parse_combinator('+').unwrap().kind, CombinatorKind::Adjacent);
    assert!(parse_combinator('.').is_none());
    assert!(parse_combinator('x').is_none());
}

// ============================================================================
// Full Queries
// ============================================================================

#[test]
fn test_query_splits_on_commas() {
    let selectors = parse_query("#Header, Button.Warning");
    assert_eq!(selectors.len(), 2);
    assert_eq!(selectors[0].simple_selectors.len(), 1);
    assert_eq!(selectors[1].simple_selectors.len(), 1);
}

#[test]
fn test_query_normalizes_before_parsing() {
    let selectors = parse_query("Panel \t>\n Button");
    assert_eq!(selectors.len(), 1);
    assert_eq!(selectors[0].query, "Panel>Button");
    assert_eq!(selectors[0].combinators[0].kind, CombinatorKind::Child);
}

#[test]
fn test_invalid_character_rejects_whole_query() {
    assert!(parse_query("Bütton").is_empty());
    assert!(parse_query("a?b").is_empty());
    assert!(parse_query("#Header, Button()").is_empty());
}

#[test]
fn test_empty_query_is_one_empty_selector() {
    let selectors = parse_query("");
    assert_eq!(selectors.len(), 1);
    assert!(selectors[0].simple_selectors.is_empty());
}

#[test]
fn test_lone_combinator_parses_to_no_simples() {
    let selectors = parse_query("+");
    assert_eq!(selectors.len(), 1);
    assert!(selectors[0].simple_selectors.is_empty());
    assert_eq!(selectors[0].combinators.len(), 1);
}
