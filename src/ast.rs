//! # Scene Selector Language - Syntax Tree
//!
//! This module defines the parsed form of the selector language, a small
//! CSS-like syntax for finding nodes in a UI scene tree.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the tokenizer
//! - **[filters]** - Filter clauses (style, name, property)
//! - **[combinators]** - Relations between simple selectors
//! - **[selectors]** - Simple selectors and full selectors
//!
//! ## Grammar
//!
//! ```text
//! query      := selector (',' selector)*
//! selector   := simple (combinator simple)*
//! combinator := ' ' | '>' | '+'
//! simple     := ('*' | element)? filter*
//! filter     := '.' ident          -- style
//!             | '#' ident          -- name
//!             | '[' property ']'   -- property
//! property   := descriptor (op value)?
//! descriptor := ident ('_' ident)?
//! op         := '=' | '!=' | '^=' | '$=' | '~='
//! ```
//!
//! ## Examples
//!
//! ### Every button below any panel
//!
//! ```text
//! Panel Button
//! ```
//!
//! ### Direct children with a derived style
//!
//! ```text
//! StackPanel > *.EmphasisStyle
//! ```
//!
//! ### Property comparisons
//!
//! ```text
//! TextBox[Text^=Error]
//! *[Grid_Row=2]
//! Slider[Value!=0]
//! ```
//!
//! ### Comma-separated branches
//!
//! ```text
//! #Header, #Footer, Button.Warning
//! ```
//!
//! Parsing lives in [`crate::parser`]; execution against a tree lives in
//! [`crate::evaluator`]. The types here are plain data.
pub mod tokens;
pub mod filters;
pub mod combinators;
pub mod selectors;

pub use tokens::{Token, TokenKind};
pub use filters::{FilterKind, FilterSelector};
pub use combinators::{Combinator, CombinatorKind};
pub use selectors::{Selector, SimpleSelector, SimpleSelectorKind};
