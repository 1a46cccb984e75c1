//! A tree, a scripted viewport, and the paint loop between them.

use std::ops::Range;

use pintree::{CellStyle, NodeId, NodeSequence, ScrollEvent, StickyHeader, StickyTree, Viewport};
use tracing::debug;

use crate::viewport::{
    ScriptedViewport, offset_for_index, render_range, row_offsets, visible_range,
};

type MeasureFn<R> = Box<dyn Fn(&R) -> f32>;

/// One row painted into the window.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedRow<R> {
    pub index: usize,
    /// Positioning handed to the row renderer.
    pub cell: CellStyle,
    pub content: R,
}

/// Output of one paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<R> {
    pub scroll_top: f32,
    pub width: f32,
    /// Rendered rows, overscan included.
    pub range: Range<usize>,
    pub rows: Vec<PaintedRow<R>>,
    pub sticky: Option<StickyHeader<R>>,
}

impl<R> Frame<R> {
    /// The painted row at `index`, if it is in the window.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&PaintedRow<R>> {
        self.rows.iter().find(|row| row.index == index)
    }
}

/// What a paint looked like, kept for every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub scroll_top: f32,
    pub range: Range<usize>,
    pub sticky: Option<NodeId>,
    /// Rows measured during this paint.
    pub measured: usize,
}

/// Drives a [`StickyTree`] through mount, scroll, measure and replace.
pub struct Session<T, R> {
    tree: StickyTree<T, R>,
    viewport: ScriptedViewport,
    measure: MeasureFn<R>,
    history: Vec<FrameSummary>,
}

impl<T: Clone, R> Session<T, R> {
    /// `measure` reports the painted height of rendered content; it is
    /// called once per row that has no cached height, and for every
    /// pinned header copy.
    pub fn new(
        tree: StickyTree<T, R>,
        client_height: f32,
        width: f32,
        measure: impl Fn(&R) -> f32 + 'static,
    ) -> Self {
        Self {
            tree,
            viewport: ScriptedViewport::new(client_height, width),
            measure: Box::new(measure),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn tree(&self) -> &StickyTree<T, R> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut StickyTree<T, R> {
        &mut self.tree
    }

    #[must_use]
    pub fn viewport(&self) -> &ScriptedViewport {
        &self.viewport
    }

    #[must_use]
    pub fn history(&self) -> &[FrameSummary] {
        &self.history
    }

    /// Top offset of every row, from the tree's cached heights.
    #[must_use]
    pub fn offsets(&self) -> Vec<f32> {
        row_offsets(self.tree.row_count(), |i| self.tree.row_height(i))
    }

    /// Honor any requested scroll target, mount the tree, and paint.
    pub fn mount(&mut self) -> Frame<R> {
        let list = self.tree.list_props();
        if let Some(index) = list.scroll_to_index {
            let top = offset_for_index(
                &self.offsets(),
                index,
                list.scroll_to_alignment,
                self.viewport.scroll_top(),
                self.viewport.client_height(),
            );
            self.viewport.set_scroll_top(top);
        }
        self.tree.mount(&self.viewport);
        self.paint()
    }

    /// Scroll to `scroll_top`, deliver the scroll event, and paint.
    pub fn scroll_to(&mut self, scroll_top: f32) -> Frame<R> {
        self.viewport.set_scroll_top(scroll_top);
        let scroll_height = self
            .tree
            .height_cache()
            .total_height(self.tree.row_count());
        self.tree.on_scroll(ScrollEvent {
            scroll_top,
            scroll_height,
            client_height: self.viewport.client_height(),
        });
        self.paint()
    }

    pub fn scroll_by(&mut self, delta: f32) -> Frame<R> {
        self.scroll_to(self.viewport.scroll_top() + delta)
    }

    /// Replace the tree's nodes; repaints when the tree asks for it.
    pub fn replace(&mut self, nodes: impl Into<NodeSequence<T>>) -> Option<Frame<R>> {
        self.tree.set_nodes(nodes, &mut self.viewport);
        self.tree.take_repaint_request().then(|| self.paint())
    }

    /// Window, render, and measure until no row height changes.
    ///
    /// When a measurement moved rows, the pinned header is reselected at
    /// the resting offset before it is rendered.
    pub fn paint(&mut self) -> Frame<R> {
        let mut measured = 0;
        let mut relaid = false;
        let (range, rows) = loop {
            let (range, rows) = self.render_window();
            let mut first_changed = None;
            for row in rows.iter().filter(|row| row.cell.height.is_none()) {
                let height = (self.measure)(&row.content);
                let changed = self.tree.record_row_height(row.index, height);
                if self.tree.height_cache().is_measured(row.index) {
                    measured += 1;
                }
                if changed {
                    first_changed.get_or_insert(row.index);
                }
            }
            match first_changed {
                Some(index) => {
                    relaid = true;
                    self.viewport.recompute_row_heights(index);
                }
                None => break (range, rows),
            }
        };
        if relaid {
            self.tree.refresh_sticky(&self.viewport);
        }

        let sticky = self.tree.render_sticky_header();
        if let Some(header) = &sticky {
            self.tree.record_sticky_height((self.measure)(&header.content));
        }

        let list = self.tree.list_props();
        let scroll_top = self.viewport.scroll_top();
        let summary = FrameSummary {
            scroll_top,
            range: range.clone(),
            sticky: sticky.as_ref().map(|header| header.id),
            measured,
        };
        debug!(
            frame = self.history.len(),
            scroll_top,
            start = range.start,
            end = range.end,
            measured,
            sticky = ?summary.sticky,
            "frame painted"
        );
        self.history.push(summary);

        Frame {
            scroll_top,
            width: list.resolve_width(self.viewport.width()),
            range,
            rows,
            sticky,
        }
    }

    fn render_window(&self) -> (Range<usize>, Vec<PaintedRow<R>>) {
        let list = self.tree.list_props();
        let width = list.resolve_width(self.viewport.width());
        let offsets = self.offsets();
        let visible = visible_range(
            &offsets,
            self.viewport.scroll_top(),
            self.viewport.client_height(),
        );
        let cache = self.tree.height_cache();
        let range = render_range(visible, list.overscan_row_count, list.row_count);
        let rows = range
            .clone()
            .map(|index| {
                let cell = CellStyle {
                    top: offsets[index],
                    left: 0.0,
                    height: cache
                        .is_measured(index)
                        .then(|| cache.height_of(index)),
                    width,
                };
                let content = self.tree.render_row(index, &format!("row-{index}"), cell);
                PaintedRow {
                    index,
                    cell,
                    content,
                }
            })
            .collect();
        (range, rows)
    }
}
