use crate::ast::Token;

/// Every symbol character the selector grammar knows. The space is a
/// symbol too: it is the descendant combinator.
pub const SYMBOLS: &[char] = &[
    ',', '*', '.', '#', '>', '+', '[', ']', '_', '=', '!', '^', '$', '~', ' ',
];

/// Whitespace characters rewritten to plain spaces before anything else.
pub const WHITESPACE: &[char] = &[' ', '\n', '\r', '\t'];

/// Symbols that join two simple selectors.
pub const COMBINATOR_SYMBOLS: &[char] = &[' ', '>', '+'];

/// Symbols that begin a new filter clause.
pub const FILTER_DELIMITERS: &[char] = &['.', '#', '['];

/// Symbols that compare a property against a value, in operator
/// priority order.
pub const VALUE_DELIMITERS: &[char] = &['=', '!', '^', '$', '~'];

/// True for characters from the symbol alphabet.
pub fn is_symbol(ch: char) -> bool {
    SYMBOLS.contains(&ch)
}

fn is_valid_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_ascii_digit() || is_symbol(ch)
}

/// True when every character of the query belongs to the selector
/// alphabet: ASCII letters, ASCII digits, or symbols.
pub fn is_valid_query(query: &str) -> bool {
    query.chars().all(is_valid_char)
}

/// Scan left to right: every symbol character becomes one token, every
/// maximal run of other characters becomes an identifier token. Empty
/// input tokenizes to nothing.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut identifier = String::new();

    for ch in text.chars() {
        if is_symbol(ch) {
            if !identifier.is_empty() {
                tokens.push(Token::identifier(std::mem::take(&mut identifier)));
            }
            tokens.push(Token::symbol(ch));
        } else {
            identifier.push(ch);
        }
    }
    if !identifier.is_empty() {
        tokens.push(Token::identifier(identifier));
    }

    tokens
}

/// Rewrite a raw query into canonical form: newlines, returns and tabs
/// become spaces, the ends are trimmed, runs of spaces collapse to a
/// single space, and spaces hugging `>` or `+` disappear so `A > B`
/// parses exactly like `A>B`.
pub fn normalize(query: &str) -> String {
    let mut text: String = query
        .chars()
        .map(|ch| if WHITESPACE.contains(&ch) { ' ' } else { ch })
        .collect();

    text = text.trim().to_string();
    while text.contains("  ") {
        text = text.replace("  ", " ");
    }

    text.replace(" >", ">")
        .replace("> ", ">")
        .replace(" +", "+")
        .replace("+ ", "+")
}

#[test]
fn test_symbols_tokenize_one_by_one() {
    let tokens = tokenize(".#[");
    assert_eq!(
        tokens,
        vec![Token::symbol('.'), Token::symbol('#'), Token::symbol('[')]
    );
}

#[test]
fn test_identifier_runs_between_symbols() {
    let tokens = tokenize("Panel>Button");
    assert_eq!(
        tokens,
        vec![
            Token::identifier("Panel"),
            Token::symbol('>'),
            Token::identifier("Button"),
        ]
    );
}

#[test]
fn test_space_is_a_token() {
    let tokens = tokenize("a b");
    assert_eq!(
        tokens,
        vec![
            Token::identifier("a"),
            Token::symbol(' '),
            Token::identifier("b"),
        ]
    );
}
