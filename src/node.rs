use std::error::Error;
use std::fmt;

use crate::nodeset::NodeSet;
use crate::registry::TypeId;
use crate::style::StyleId;
use crate::value::PropertyValue;

/// Error raised by a host getter while reading a property value.
///
/// This is the one failure the engine propagates to callers; every other
/// problem with a query degrades to an empty result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyError {
    /// Name of the property being read
    pub property: String,
    /// Host-supplied description of what went wrong
    pub message: String,
}

impl PropertyError {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        PropertyError {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "reading property '{}': {}", self.property, self.message)
    }
}

impl Error for PropertyError {}

/// A node of a host scene tree.
///
/// Implementations are lightweight handles: cloning must be cheap and
/// equality must mean "the same node", never structural likeness. The
/// engine borrows the tree through this trait and keeps no nodes beyond
/// the result sets it returns.
pub trait UiNode: Clone + PartialEq {
    /// Direct children, in document order.
    fn children(&self) -> Vec<Self>;

    /// Structural parent, if any.
    fn parent(&self) -> Option<Self>;

    /// Whether the node's type holds children the way a panel does. Only
    /// containers take part in child and sibling narrowing.
    fn is_container(&self) -> bool;

    /// Tag of the node's registered type.
    fn type_id(&self) -> TypeId;

    /// The node's assigned name; empty when unnamed.
    fn name(&self) -> String;

    /// The style applied to this node, if any.
    fn style(&self) -> Option<StyleId>;

    /// Read one of the node's own properties by name.
    ///
    /// `Ok(None)` means the node has no such property. `Err` signals a
    /// genuine host failure and aborts the whole query.
    fn property(&self, name: &str) -> Result<Option<PropertyValue>, PropertyError>;
}

/// Every node below `node` in pre-order: each child followed by its own
/// subtree. The node itself is not included, and no node appears twice.
pub fn descendants<N: UiNode>(node: &N) -> NodeSet<N> {
    let mut set = NodeSet::new();
    collect_subtree(node, &mut set);
    set
}

fn collect_subtree<N: UiNode>(node: &N, out: &mut NodeSet<N>) {
    for child in node.children() {
        out.push(child.clone());
        collect_subtree(&child, out);
    }
}

/// The chain of ancestors, nearest parent first.
pub fn ancestors<N: UiNode>(node: &N) -> NodeSet<N> {
    let mut set = NodeSet::new();
    let mut current = node.parent();
    while let Some(parent) = current {
        current = parent.parent();
        set.push(parent);
    }
    set
}

/// The topmost ancestor, or the node itself when detached.
pub fn tree_root<N: UiNode>(node: &N) -> N {
    let mut root = node.clone();
    while let Some(parent) = root.parent() {
        root = parent;
    }
    root
}
