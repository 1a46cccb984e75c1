//! Group-header index over the full, unvirtualized content.
//!
//! [`headers_for`] walks every row once, accumulating row heights, and emits
//! a [`HeaderRecord`] for each group header at the offset of its own top
//! edge. The result is rebuilt on every call: heights may have been
//! corrected by measurements since the last scroll, and a linear pass over
//! cached heights is cheap next to a repaint.
//!
//! [`select_sticky`] answers "which header has the viewport scrolled past"
//! for a given scroll offset.

use crate::height_cache::RowHeightCache;
use crate::node::NodeId;
use crate::source::NodeSource;

/// Position of a group header within the full content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderRecord {
    /// Id of the header node.
    pub id: NodeId,
    /// Row index of the header.
    pub index: usize,
    /// Sum of the heights of all rows strictly before `index`.
    pub top: f32,
}

/// Build the header index for `source` using heights from `cache`.
///
/// Records come out in strictly ascending `index` and `top` order, given
/// the positive minimum row height every validated configuration has.
#[must_use]
pub fn headers_for<T, S>(source: &S, cache: &RowHeightCache) -> Vec<HeaderRecord>
where
    T: Clone,
    S: NodeSource<T> + ?Sized,
{
    let rows = source.row_count();
    let _span = tracing::debug_span!("header_index", rows).entered();

    let mut headers = Vec::new();
    let mut top = 0.0f32;
    for index in 0..rows {
        if source.is_group_header_at(index) {
            headers.push(HeaderRecord {
                id: source.node_at(index).id(),
                index,
                top,
            });
        }
        top += cache.height_of(index);
    }

    tracing::trace!(rows, headers = headers.len(), total = top, "header index built");
    headers
}

/// The header with the greatest `top` not exceeding `scroll_top`.
///
/// `headers` must be sorted as returned by [`headers_for`]. Among headers
/// sharing a `top`, the one with the highest index wins. Returns `None`
/// when `scroll_top` lies above every header.
#[must_use]
pub fn select_sticky(headers: &[HeaderRecord], scroll_top: f32) -> Option<&HeaderRecord> {
    let past = headers.partition_point(|h| h.top <= scroll_top);
    past.checked_sub(1).map(|i| &headers[i])
}
