//! Uniform row access over the two node-sequence representations.
//!
//! Callers hand the tree either a literal, pre-flattened slice of nodes or a
//! handle into an external flattening service. [`NodeSequence`] tags which
//! one it holds and implements [`NodeSource`] by matching on that tag, so
//! every consumer (header index, row adapter) sees the same three queries.
//!
//! # Identity
//!
//! Both variants share their storage through an `Arc`. Two sequences have
//! the same identity when they point at the same storage; replacing the
//! sequence with a structurally equal copy still counts as new data.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::node::Node;

/// Row-level access to a flattened tree.
///
/// Indices outside `0..row_count()` are a caller bug; implementations panic.
pub trait NodeSource<T: Clone> {
    /// Number of rows in display order.
    fn row_count(&self) -> usize;

    /// Node displayed at `index`, with `deepness` set.
    fn node_at(&self, index: usize) -> Cow<'_, Node<T>>;

    /// Nesting level of the row at `index`.
    ///
    /// Must agree with `node_at(index).deepness()`.
    fn deepness_at(&self, index: usize) -> usize;

    /// Whether the row at `index` is a group header.
    ///
    /// Checks the deepness first so that deeper rows never materialize
    /// their node.
    fn is_group_header_at(&self, index: usize) -> bool {
        self.deepness_at(index) == 0 && self.node_at(index).has_children()
    }
}

/// External tree-flattening service.
///
/// All three queries are expected to be O(1) or O(log n).
pub trait TreeHandle<T> {
    /// Number of flattened rows.
    fn node_count(&self) -> usize;

    /// Node at a flattened index. Its `deepness` is ignored; the sequence
    /// overwrites it with [`deepness_at_index`](Self::deepness_at_index).
    fn node_at_index(&self, index: usize) -> Node<T>;

    /// Nesting level at a flattened index, answered without building the node.
    fn deepness_at_index(&self, index: usize) -> usize;
}

/// A flattened node sequence, tagged by representation.
pub enum NodeSequence<T> {
    /// Literal pre-flattened rows with `deepness` attached.
    Flat(Arc<[Node<T>]>),
    /// Lazily queried handle into external tree state.
    Lazy(Arc<dyn TreeHandle<T>>),
}

impl<T> NodeSequence<T> {
    /// Wrap a pre-flattened vec.
    #[must_use]
    pub fn flat(nodes: Vec<Node<T>>) -> Self {
        Self::Flat(nodes.into())
    }

    /// Wrap an external tree handle.
    #[must_use]
    pub fn lazy(handle: impl TreeHandle<T> + 'static) -> Self {
        Self::Lazy(Arc::new(handle))
    }

    /// Whether `other` refers to the same underlying storage.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Flat(a), Self::Flat(b)) => Arc::ptr_eq(a, b),
            (Self::Lazy(a), Self::Lazy(b)) => {
                // Compare data pointers only; vtable pointers may differ
                // across codegen units for the same object.
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }

    /// Short tag used in log output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Flat(_) => "flat",
            Self::Lazy(_) => "lazy",
        }
    }
}

impl<T> Clone for NodeSequence<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Flat(nodes) => Self::Flat(Arc::clone(nodes)),
            Self::Lazy(handle) => Self::Lazy(Arc::clone(handle)),
        }
    }
}

impl<T> fmt::Debug for NodeSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat(nodes) => f.debug_struct("Flat").field("len", &nodes.len()).finish(),
            Self::Lazy(handle) => f
                .debug_struct("Lazy")
                .field("len", &handle.node_count())
                .finish(),
        }
    }
}

impl<T> From<Vec<Node<T>>> for NodeSequence<T> {
    fn from(nodes: Vec<Node<T>>) -> Self {
        Self::flat(nodes)
    }
}

impl<T: Clone> NodeSource<T> for NodeSequence<T> {
    fn row_count(&self) -> usize {
        match self {
            Self::Flat(nodes) => nodes.len(),
            Self::Lazy(handle) => handle.node_count(),
        }
    }

    fn node_at(&self, index: usize) -> Cow<'_, Node<T>> {
        match self {
            Self::Flat(nodes) => Cow::Borrowed(&nodes[index]),
            Self::Lazy(handle) => {
                let deepness = handle.deepness_at_index(index);
                Cow::Owned(handle.node_at_index(index).with_deepness(deepness))
            }
        }
    }

    fn deepness_at(&self, index: usize) -> usize {
        match self {
            Self::Flat(nodes) => nodes[index].deepness(),
            Self::Lazy(handle) => handle.deepness_at_index(index),
        }
    }
}
