//! Scripted stand-in for the external virtualizer.

use std::ops::Range;

use pintree::{ScrollAlignment, Viewport};

/// A viewport whose offset and size are set by the test.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptedViewport {
    scroll_top: f32,
    client_height: f32,
    width: f32,
    recompute_calls: Vec<usize>,
}

impl ScriptedViewport {
    #[must_use]
    pub fn new(client_height: f32, width: f32) -> Self {
        Self {
            scroll_top: 0.0,
            client_height,
            width,
            recompute_calls: Vec::new(),
        }
    }

    /// Move the top edge. Out-of-range offsets are kept as given, like an
    /// overscrolling host.
    pub fn set_scroll_top(&mut self, scroll_top: f32) {
        self.scroll_top = scroll_top;
    }

    #[must_use]
    pub fn client_height(&self) -> f32 {
        self.client_height
    }

    /// Width the auto-sizer would report.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Start indices of every recompute request, oldest first.
    #[must_use]
    pub fn recompute_calls(&self) -> &[usize] {
        &self.recompute_calls
    }
}

impl Viewport for ScriptedViewport {
    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn recompute_row_heights(&mut self, start_index: usize) {
        tracing::trace!(start_index, "recompute row heights");
        self.recompute_calls.push(start_index);
    }
}

/// Top offset of every row plus the total height as the final entry.
#[must_use]
pub fn row_offsets(row_count: usize, height_of: impl Fn(usize) -> f32) -> Vec<f32> {
    let mut offsets = Vec::with_capacity(row_count + 1);
    let mut top = 0.0f32;
    offsets.push(top);
    for index in 0..row_count {
        top += height_of(index);
        offsets.push(top);
    }
    offsets
}

/// Rows intersecting `[scroll_top, scroll_top + client_height)`.
#[must_use]
pub fn visible_range(offsets: &[f32], scroll_top: f32, client_height: f32) -> Range<usize> {
    let rows = offsets.len().saturating_sub(1);
    if rows == 0 || client_height <= 0.0 {
        return 0..0;
    }
    let top = scroll_top.max(0.0);
    let bottom = scroll_top + client_height;
    // First row whose bottom edge lies below the top of the viewport.
    let start = offsets[1..].partition_point(|&end| end <= top).min(rows);
    let end = offsets[..rows].partition_point(|&begin| begin < bottom).max(start);
    start..end
}

/// [`visible_range`] widened by `overscan` rows on both sides.
#[must_use]
pub fn render_range(visible: Range<usize>, overscan: usize, row_count: usize) -> Range<usize> {
    let start = visible.start.saturating_sub(overscan);
    let end = (visible.end + overscan).min(row_count);
    start..end
}

/// Offset that brings row `index` into view with `alignment`.
///
/// Clamped to the scrollable extent.
#[must_use]
pub fn offset_for_index(
    offsets: &[f32],
    index: usize,
    alignment: ScrollAlignment,
    scroll_top: f32,
    client_height: f32,
) -> f32 {
    let rows = offsets.len().saturating_sub(1);
    if rows == 0 {
        return 0.0;
    }
    let index = index.min(rows - 1);
    let row_top = offsets[index];
    let row_bottom = offsets[index + 1];
    let start = row_top;
    let end = row_bottom - client_height;
    let target = match alignment {
        ScrollAlignment::Start => start,
        ScrollAlignment::End => end,
        ScrollAlignment::Center => row_top + (row_bottom - row_top) / 2.0 - client_height / 2.0,
        ScrollAlignment::Auto => {
            if row_top < scroll_top {
                start
            } else if row_bottom > scroll_top + client_height {
                end
            } else {
                scroll_top
            }
        }
    };
    let max = (offsets[rows] - client_height).max(0.0);
    target.clamp(0.0, max)
}
