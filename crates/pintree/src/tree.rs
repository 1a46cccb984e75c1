//! The sticky tree component.
//!
//! [`StickyTree`] owns the row height cache and the sticky header state for
//! one node sequence, and exposes the lifecycle as explicit methods for the
//! embedding harness to call:
//!
//! | Host event | Method |
//! |------------|--------|
//! | first layout done | [`mount`](StickyTree::mount) |
//! | scroll | [`on_scroll`](StickyTree::on_scroll) |
//! | row measured | [`record_row_height`](StickyTree::record_row_height) |
//! | new data | [`set_nodes`](StickyTree::set_nodes) |
//! | paint row N | [`render_row`](StickyTree::render_row) |
//! | paint overlay | [`render_sticky_header`](StickyTree::render_sticky_header) |
//!
//! # Example
//!
//! ```
//! use pintree::prelude::*;
//!
//! struct Resting(f32);
//! impl Viewport for Resting {
//!     fn scroll_top(&self) -> f32 { self.0 }
//!     fn recompute_row_heights(&mut self, _start: usize) {}
//! }
//!
//! let rows = flatten(&[
//!     Node::new(1, "fruits").child(Node::new(2, "apple")),
//!     Node::new(3, "veg").child(Node::new(4, "leek")),
//! ]);
//!
//! let mut tree = StickyTree::builder(rows)
//!     .row_renderer(|props| format!("{}:{}", props.index, props.node.data()))
//!     .on_change(|_node| {})
//!     .build()
//!     .unwrap();
//!
//! tree.mount(&Resting(45.0));
//! let sticky = tree.render_sticky_header().unwrap();
//! assert_eq!(sticky.content, "2:veg");
//! ```

use std::fmt;

use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::headers::{HeaderRecord, headers_for};
use crate::height_cache::RowHeightCache;
use crate::node::Node;
use crate::render::{RowAdapter, RowProps, StickyContainerStyle, StickyHeader};
use crate::source::{NodeSequence, NodeSource};
use crate::sticky::{StickyHeaderTracker, StickyState, StickyTransition};
use crate::viewport::{CellStyle, ListProps, ScrollAlignment, ScrollEvent, Viewport};

/// Caller-supplied row renderer.
pub type RowRenderFn<T, R> = Box<dyn Fn(RowProps<'_, T>) -> R>;

/// Caller-supplied change callback.
pub type ChangeFn<T> = Box<dyn Fn(&Node<T>)>;

/// Windowed tree with a pinned group header.
pub struct StickyTree<T, R> {
    nodes: NodeSequence<T>,
    config: TreeConfig,
    cache: RowHeightCache,
    tracker: StickyHeaderTracker,
    adapter: RowAdapter,
    row_renderer: RowRenderFn<T, R>,
    on_change: ChangeFn<T>,
    mounted: bool,
    repaint_requested: bool,
    /// Height of the pinned copy, measured on its own.
    sticky_height: Option<f32>,
}

impl<T, R> fmt::Debug for StickyTree<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyTree")
            .field("nodes", &self.nodes)
            .field("config", &self.config)
            .field("sticky", self.tracker.state())
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`StickyTree`], failing on missing callbacks.
pub struct StickyTreeBuilder<T, R> {
    nodes: NodeSequence<T>,
    config: TreeConfig,
    row_renderer: Option<RowRenderFn<T, R>>,
    on_change: Option<ChangeFn<T>>,
}

impl<T: Clone, R> StickyTreeBuilder<T, R> {
    #[must_use]
    pub fn config(mut self, config: TreeConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn row_renderer(mut self, render: impl Fn(RowProps<'_, T>) -> R + 'static) -> Self {
        self.row_renderer = Some(Box::new(render));
        self
    }

    #[must_use]
    pub fn on_change(mut self, callback: impl Fn(&Node<T>) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Validate the configuration and build the tree.
    pub fn build(self) -> Result<StickyTree<T, R>> {
        let row_renderer = self.row_renderer.ok_or(Error::MissingRowRenderer)?;
        let on_change = self.on_change.ok_or(Error::MissingChangeCallback)?;
        self.config.validate()?;

        let mut cache = RowHeightCache::new(self.config.min_row_height);
        if let Some(height) = self.config.default_row_height {
            cache = cache.with_default_height(height);
        }
        debug!(
            kind = self.nodes.kind(),
            rows = self.nodes.row_count(),
            "sticky tree built"
        );

        Ok(StickyTree {
            adapter: RowAdapter::new(self.config.indent_per_level),
            nodes: self.nodes,
            config: self.config,
            cache,
            tracker: StickyHeaderTracker::new(),
            row_renderer,
            on_change,
            mounted: false,
            repaint_requested: false,
            sticky_height: None,
        })
    }
}

impl<T: Clone, R> StickyTree<T, R> {
    /// Start building a tree over `nodes`.
    #[must_use]
    pub fn builder(nodes: impl Into<NodeSequence<T>>) -> StickyTreeBuilder<T, R> {
        StickyTreeBuilder {
            nodes: nodes.into(),
            config: TreeConfig::default(),
            row_renderer: None,
            on_change: None,
        }
    }

    #[must_use]
    pub fn nodes(&self) -> &NodeSequence<T> {
        &self.nodes
    }

    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    #[must_use]
    pub fn height_cache(&self) -> &RowHeightCache {
        &self.cache
    }

    #[must_use]
    pub fn sticky_state(&self) -> &StickyState {
        self.tracker.state()
    }

    /// Number of observable sticky header changes so far.
    #[must_use]
    pub fn sticky_updates(&self) -> u64 {
        self.tracker.updates()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    // --- Viewport callbacks ---------------------------------------------

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.nodes.row_count()
    }

    /// Cache-backed height of row `index`.
    #[must_use]
    pub fn row_height(&self, index: usize) -> f32 {
        self.cache.height_of(index)
    }

    /// Settings the viewport windows the rows with.
    #[must_use]
    pub fn list_props(&self) -> ListProps {
        ListProps {
            row_count: self.row_count(),
            width: self.config.width,
            overscan_row_count: self.config.overscan_row_count,
            scroll_to_index: self.config.scroll_to_index,
            scroll_to_alignment: self.config.scroll_to_alignment,
        }
    }

    /// Request that the viewport bring `index` into view.
    pub fn set_scroll_to(&mut self, index: Option<usize>, alignment: ScrollAlignment) {
        self.config.scroll_to_index = index;
        self.config.scroll_to_alignment = alignment;
    }

    /// Current header index, rebuilt from the latest heights.
    #[must_use]
    pub fn all_headers(&self) -> Vec<HeaderRecord> {
        headers_for(&self.nodes, &self.cache)
    }

    // --- Lifecycle --------------------------------------------------------

    /// Mark the tree mounted and pin whatever header the viewport is
    /// already scrolled past.
    pub fn mount(&mut self, viewport: &dyn Viewport) -> StickyTransition {
        self.mounted = true;
        debug!(rows = self.row_count(), "sticky tree mounted");
        let headers = self.all_headers();
        self.tracker.prime(viewport, &headers)
    }

    /// Stop reacting to scroll events.
    pub fn unmount(&mut self) {
        self.mounted = false;
        debug!("sticky tree unmounted");
    }

    /// Recompute the pinned header for a scroll event.
    ///
    /// Ignored until the tree is mounted.
    pub fn on_scroll(&mut self, event: ScrollEvent) -> StickyTransition {
        if !self.mounted {
            trace!(scroll_top = event.scroll_top, "scroll before mount ignored");
            return StickyTransition::Unchanged;
        }
        let headers = self.all_headers();
        self.tracker.on_scroll(event.scroll_top, &headers)
    }

    /// Reselect the pinned header at the viewport's resting offset.
    ///
    /// Scroll events are the only other trigger, so a host calls this after
    /// measurements moved header offsets without any scrolling. Ignored
    /// until the tree is mounted.
    pub fn refresh_sticky(&mut self, viewport: &dyn Viewport) -> StickyTransition {
        if !self.mounted {
            return StickyTransition::Unchanged;
        }
        let headers = self.all_headers();
        self.tracker.on_scroll(viewport.scroll_top(), &headers)
    }

    /// Record the measured height of a windowed row.
    ///
    /// Returns `true` when the row's height changed; the viewport should
    /// then recompute positions from `index` on, and the pinned header may
    /// need [`refresh_sticky`](Self::refresh_sticky).
    pub fn record_row_height(&mut self, index: usize, height: f32) -> bool {
        self.cache.record_measured(index, height)
    }

    /// Record the measured height of the pinned copy.
    ///
    /// Kept apart from the row cache: the pinned copy is styled differently
    /// and its height says nothing about the windowed row.
    pub fn record_sticky_height(&mut self, height: f32) {
        if height.is_finite() && height >= 0.0 {
            self.sticky_height = Some(height);
        }
    }

    /// Height of the pinned copy, if it has been measured.
    #[must_use]
    pub fn sticky_height(&self) -> Option<f32> {
        self.sticky_height
    }

    /// Replace the node sequence.
    ///
    /// A sequence with the same identity is a no-op. Otherwise every cached
    /// height is dropped, the viewport recomputes all row heights, a repaint
    /// is requested, and the pinned header is reselected against the new
    /// data. Returns whether the sequence was replaced.
    pub fn set_nodes(
        &mut self,
        nodes: impl Into<NodeSequence<T>>,
        viewport: &mut dyn Viewport,
    ) -> bool {
        let nodes = nodes.into();
        if self.nodes.same_identity(&nodes) {
            return false;
        }

        debug!(
            kind = nodes.kind(),
            old_rows = self.row_count(),
            new_rows = nodes.row_count(),
            "node sequence replaced"
        );
        self.nodes = nodes;
        self.cache.invalidate_all();
        self.sticky_height = None;
        viewport.recompute_row_heights(0);
        self.repaint_requested = true;

        self.tracker.reset();
        if self.mounted {
            let headers = self.all_headers();
            self.tracker.prime(&*viewport, &headers);
        }
        true
    }

    /// Take the pending repaint request, clearing it.
    pub fn take_repaint_request(&mut self) -> bool {
        std::mem::take(&mut self.repaint_requested)
    }

    // --- Rendering --------------------------------------------------------

    /// Render the windowed row at `index` with the viewport's positioning.
    pub fn render_row(&self, index: usize, key: &str, cell: CellStyle) -> R {
        let node = self.nodes.node_at(index);
        trace!(index, key, "render row");
        let props = self
            .adapter
            .row_props(&*node, index, key.to_owned(), cell, &*self.on_change);
        (self.row_renderer)(props)
    }

    /// Render the pinned header, if one is active.
    ///
    /// Independent of the windowed range: the header row itself is usually
    /// scrolled out of view.
    pub fn render_sticky_header(&self) -> Option<StickyHeader<R>> {
        let record = *self.tracker.state().record()?;
        let node = self.nodes.node_at(record.index);
        let props = self
            .adapter
            .sticky_props(&*node, record.index, &*self.on_change);
        let key = props.key.clone();
        let content = (self.row_renderer)(props);
        Some(StickyHeader {
            id: record.id,
            index: record.index,
            key,
            container: StickyContainerStyle::with_height(self.cache.height_of(record.index)),
            content,
        })
    }
}
