/// Kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Maximal run of non-symbol characters
    ///
    /// # Examples
    /// ```text
    /// Button
    /// SubmitText
    /// 42
    /// ```
    Identifier,

    /// A single character from the symbol alphabet
    ///
    /// # Examples
    /// ```text
    /// *   .   #   [   >
    /// ```
    Symbol,
}

/// A lexical token of the selector language.
///
/// Selector queries decompose into exactly two kinds of token: single
/// symbol characters and the identifier runs between them. The space
/// character is itself a symbol, so it terminates identifiers and shows
/// up as a token of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    /// An identifier token.
    pub fn identifier(text: impl Into<String>) -> Self {
        Token {
            kind: TokenKind::Identifier,
            text: text.into(),
        }
    }

    /// A single-character symbol token.
    pub fn symbol(symbol: char) -> Self {
        Token {
            kind: TokenKind::Symbol,
            text: symbol.to_string(),
        }
    }

    /// True when this token is exactly the given symbol.
    pub fn is_symbol(&self, symbol: char) -> bool {
        self.kind == TokenKind::Symbol && self.text.chars().next() == Some(symbol)
    }
}
