use crate::node::UiNode;
use crate::registry::{TypeId, TypeRegistry};

/// An ordered collection of node handles.
///
/// Sets preserve insertion order and may hold duplicates until
/// [`NodeSet::dedup`] runs; containment uses the handle's identity
/// equality. Query results are node sets, and the positional helpers
/// (`even`, `odd`, `gt`, `lt`) slice them further.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet<N> {
    nodes: Vec<N>,
}

impl<N> NodeSet<N> {
    pub fn new() -> Self {
        NodeSet { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node; duplicates are allowed.
    pub fn push(&mut self, node: N) {
        self.nodes.push(node);
    }

    pub fn first(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn get(&self, index: usize) -> Option<&N> {
        self.nodes.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, N> {
        self.nodes.iter()
    }

    pub fn as_slice(&self) -> &[N] {
        self.nodes.as_slice()
    }
}

impl<N: Clone> NodeSet<N> {
    /// Nodes at even positions (0-based).
    pub fn even(&self) -> NodeSet<N> {
        self.nodes.iter().step_by(2).cloned().collect()
    }

    /// Nodes at odd positions (0-based).
    pub fn odd(&self) -> NodeSet<N> {
        self.nodes.iter().skip(1).step_by(2).cloned().collect()
    }

    /// Nodes after the given position.
    pub fn gt(&self, index: usize) -> NodeSet<N> {
        self.nodes.iter().skip(index + 1).cloned().collect()
    }

    /// Nodes before the given position.
    pub fn lt(&self, index: usize) -> NodeSet<N> {
        self.nodes.iter().take(index).cloned().collect()
    }
}

impl<N: PartialEq> NodeSet<N> {
    /// Identity containment.
    pub fn contains(&self, node: &N) -> bool {
        self.nodes.iter().any(|n| n == node)
    }
}

impl<N: Clone + PartialEq> NodeSet<N> {
    /// Drop repeated nodes, keeping the first occurrence of each in
    /// order.
    pub fn dedup(&self) -> NodeSet<N> {
        let mut unique = NodeSet::new();
        for node in &self.nodes {
            if !unique.contains(node) {
                unique.push(node.clone());
            }
        }
        unique
    }

    /// Nodes of this set that do not appear in `other`.
    pub fn not(&self, other: &NodeSet<N>) -> NodeSet<N> {
        self.nodes
            .iter()
            .filter(|node| !other.contains(node))
            .cloned()
            .collect()
    }
}

impl<N: UiNode> NodeSet<N> {
    /// Keep nodes whose type is `type_id` or a subtype of it.
    pub fn filter_by_type(&self, type_id: TypeId, types: &TypeRegistry<N>) -> NodeSet<N> {
        self.nodes
            .iter()
            .filter(|node| types.is_instance(node.type_id(), type_id))
            .cloned()
            .collect()
    }
}

impl<N> Default for NodeSet<N> {
    fn default() -> Self {
        NodeSet::new()
    }
}

impl<N> From<Vec<N>> for NodeSet<N> {
    fn from(nodes: Vec<N>) -> Self {
        NodeSet { nodes }
    }
}

impl<N> FromIterator<N> for NodeSet<N> {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        NodeSet {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl<N> Extend<N> for NodeSet<N> {
    fn extend<I: IntoIterator<Item = N>>(&mut self, iter: I) {
        self.nodes.extend(iter);
    }
}

impl<N> IntoIterator for NodeSet<N> {
    type Item = N;
    type IntoIter = std::vec::IntoIter<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a NodeSet<N> {
    type Item = &'a N;
    type IntoIter = std::slice::Iter<'a, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
