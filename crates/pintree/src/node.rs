//! Tree nodes and the group-header classification.
//!
//! A [`Node`] is an immutable snapshot supplied by the caller. The component
//! never mutates nodes; edits go through the change callback configured on
//! the [`StickyTree`](crate::tree::StickyTree).
//!
//! # Example
//!
//! ```
//! use pintree::node::{Node, NodeId, flatten};
//!
//! let roots = vec![
//!     Node::new(1, "fruits")
//!         .child(Node::new(2, "apple"))
//!         .child(Node::new(3, "pear")),
//!     Node::new(4, "empty"),
//! ];
//!
//! let rows = flatten(&roots);
//! assert_eq!(rows.len(), 4);
//! assert_eq!(rows[1].id(), NodeId(2));
//! assert_eq!(rows[1].deepness(), 1);
//! assert!(rows[0].is_group_header());
//! assert!(!rows[3].is_group_header());
//! ```

use std::fmt;
use std::sync::Arc;

/// Stable node identifier, unique within one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// A single tree entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    id: NodeId,
    /// Nesting level, 0 for top-level nodes.
    pub(crate) deepness: usize,
    /// Shared so that flattened rows reuse their subtree instead of
    /// copying it.
    children: Arc<Vec<Node<T>>>,
    data: T,
}

impl<T> Node<T> {
    /// Create a top-level node without children.
    #[must_use]
    pub fn new(id: u64, data: T) -> Self {
        Self {
            id: NodeId(id),
            deepness: 0,
            children: Arc::new(Vec::new()),
            data,
        }
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<Node<T>>) -> Self {
        self.children = Arc::new(nodes);
        self
    }

    /// Set the nesting level.
    #[must_use]
    pub fn with_deepness(mut self, deepness: usize) -> Self {
        self.deepness = deepness;
        self
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn deepness(&self) -> usize {
        self.deepness
    }

    #[must_use]
    pub fn children(&self) -> &[Node<T>] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Caller payload.
    #[must_use]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Whether this node heads a group: top level with at least one child.
    ///
    /// Derived from the node's attributes on every call, never stored.
    #[must_use]
    pub fn is_group_header(&self) -> bool {
        self.deepness == 0 && self.has_children()
    }
}

impl<T: Clone> Node<T> {
    /// Add a child node.
    ///
    /// Copies the existing children only if they are shared with another
    /// node.
    #[must_use]
    pub fn child(mut self, node: Node<T>) -> Self {
        Arc::make_mut(&mut self.children).push(node);
        self
    }
}

/// Flatten nested roots into display order, assigning `deepness`.
///
/// Each parent is immediately followed by its whole subtree. Rows share
/// their `children` with the input, so the group-header check still works
/// on the flattened rows and each row costs one payload clone. Walks with
/// an explicit stack; nesting depth is not limited by the call stack.
#[must_use]
pub fn flatten<T: Clone>(roots: &[Node<T>]) -> Vec<Node<T>> {
    let mut out = Vec::new();
    let mut stack: Vec<(&Node<T>, usize)> = roots.iter().rev().map(|root| (root, 0)).collect();
    while let Some((node, deepness)) = stack.pop() {
        out.push(node.clone().with_deepness(deepness));
        stack.extend(node.children.iter().rev().map(|child| (child, deepness + 1)));
    }
    out
}
