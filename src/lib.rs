pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod evaluator;
pub mod lexer;
pub mod node;
pub mod nodeset;
pub mod parser;
pub mod registry;
pub mod scene;
pub mod style;
pub mod value;

pub use ast::{
    Combinator, CombinatorKind, FilterKind, FilterSelector, Selector, SimpleSelector,
    SimpleSelectorKind, Token, TokenKind,
};
pub use evaluator::{search, QueryContext, QueryError};
pub use node::{ancestors, descendants, tree_root, PropertyError, UiNode};
pub use nodeset::NodeSet;
pub use parser::parse_query;
pub use registry::{Getter, RegistryError, TypeId, TypeRegistry};
pub use scene::{load_scene, NodeSpec, SceneError, SceneNode};
pub use style::{StyleId, StyleResolver, StyleSheet};
pub use value::{CompareOp, PropertyValue};
