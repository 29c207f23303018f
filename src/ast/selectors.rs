use super::combinators::Combinator;
use super::filters::FilterSelector;
use super::tokens::Token;

/// How a simple selector picks its base set of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimpleSelectorKind {
    /// `*`, explicit or implied: every candidate passes
    Universal,

    /// An element name: candidates of that node type or a subtype
    Element,
}

/// One simple selector: a main token plus its filter chain.
///
/// A selector text that starts with a symbol other than `*` still parses;
/// the `*` is implied and the whole text is treated as filters.
///
/// # Examples
/// ```text
/// Button
/// *.WarningStyle
/// CheckBox#Remember[IsChecked=true]
/// #Footer
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleSelector {
    /// The selector text as written
    pub query: String,
    pub kind: SimpleSelectorKind,
    /// `*` or the element name token
    pub main_token: Token,
    pub filters: Vec<FilterSelector>,
}

/// A full selector: simple selectors joined by combinators.
///
/// By construction `combinators.len() >= simple_selectors.len() - 1`;
/// surplus combinators (from malformed queries such as `A>>B`) are inert
/// at execution.
///
/// # Examples
/// ```text
/// Panel > Button.Warning
/// ListBox ListBoxItem + TextBlock
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    /// The selector text, one comma branch of the full query
    pub query: String,
    pub simple_selectors: Vec<SimpleSelector>,
    pub combinators: Vec<Combinator>,
}
