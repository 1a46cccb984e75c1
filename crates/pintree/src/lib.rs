#![forbid(unsafe_code)]

//! Windowed tree rendering with a pinned group header.
//!
//! A large tree is shown as a flat list of rows, of which only the visible
//! window is rendered by an external viewport. While the user scrolls, the
//! top-level group header whose subtree is under the viewport's top edge is
//! pinned above the rows.
//!
//! - [`node`]: nodes and the group-header rule
//! - [`source`]: uniform access to flat and lazy node sequences
//! - [`height_cache`]: measured row heights
//! - [`headers`]: header offsets and sticky selection
//! - [`sticky`]: the sticky header state machine
//! - [`render`]: row and pinned-header presentation metadata
//! - [`viewport`]: the contract with the external virtualizer
//! - [`tree`]: the component tying them together

pub mod config;
pub mod error;
pub mod headers;
pub mod height_cache;
pub mod node;
pub mod render;
pub mod source;
pub mod sticky;
pub mod tree;
pub mod viewport;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use headers::{HeaderRecord, headers_for, select_sticky};
pub use height_cache::{RowHeightCache, RowMeasurement};
pub use node::{Node, NodeId, flatten};
pub use render::{RowProps, RowStyle, StickyContainerStyle, StickyHeader};
pub use source::{NodeSequence, NodeSource, TreeHandle};
pub use sticky::{StickyHeaderTracker, StickyState, StickyTransition};
pub use tree::{StickyTree, StickyTreeBuilder};
pub use viewport::{CellStyle, ListProps, ScrollAlignment, ScrollEvent, Viewport};

pub mod prelude {
    pub use crate::{
        CellStyle, Error, Node, NodeId, NodeSequence, NodeSource, Result, RowProps,
        ScrollAlignment, ScrollEvent, StickyTree, TreeConfig, TreeHandle, Viewport, flatten,
    };
}
