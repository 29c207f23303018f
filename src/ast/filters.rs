use super::tokens::Token;

/// Which aspect of a node a filter clause tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Style filter
    ///
    /// Matches nodes whose style is the named style or derives from it.
    ///
    /// # Examples
    /// ```text
    /// .HighlightStyle
    /// ```
    Style,

    /// Name filter
    ///
    /// Matches nodes whose assigned name equals the text exactly.
    ///
    /// # Examples
    /// ```text
    /// #SubmitText
    /// ```
    Name,

    /// Property filter
    ///
    /// Matches nodes by a property value comparison, or by a bare
    /// non-default check when no value is given.
    ///
    /// # Examples
    /// ```text
    /// [Width=100]
    /// [Text^=Sub]
    /// [Grid_Row=2]
    /// [IsEnabled]
    /// ```
    Property,

    /// A clause introduced by any other symbol.
    ///
    /// Kept so the candidate chain dies instead of being silently
    /// widened; executes to the empty set.
    Unsupported,
}

/// One filter clause of a simple selector.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSelector {
    /// The clause text as written, delimiter included
    pub query: String,
    pub kind: FilterKind,
    /// Tokens of the clause; the first is always a symbol
    pub tokens: Vec<Token>,
}
