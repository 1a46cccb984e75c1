//! Measured row heights, keyed by row index.
//!
//! Rows have a fixed width and a variable height. The viewport measures a
//! row after painting it and records the result here; until then the row
//! reads as [`RowMeasurement::Pending`] and contributes the default height
//! to any offset computation.
//!
//! # Invalidation
//!
//! Entries are keyed by index, not by node id, so they only stay valid for
//! the node sequence they were measured against. [`RowHeightCache::invalidate_all`]
//! drops every entry and bumps the generation; callers use the generation to
//! tell whether heights they read earlier may be stale.
//!
//! # Example
//!
//! ```
//! use pintree::height_cache::{RowHeightCache, RowMeasurement};
//!
//! let mut cache = RowHeightCache::new(20.0);
//! assert_eq!(cache.height_of(3), 20.0);
//! assert_eq!(cache.measurement(3), RowMeasurement::Pending);
//!
//! cache.record_measured(3, 48.0);
//! assert_eq!(cache.height_of(3), 48.0);
//!
//! cache.invalidate_all();
//! assert_eq!(cache.height_of(3), 20.0);
//! ```

use tracing::{trace, warn};

/// Default lower bound for row heights, in pixels.
pub const DEFAULT_MIN_ROW_HEIGHT: f32 = 20.0;

/// Measurement state of a single row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowMeasurement {
    /// Not measured since the last invalidation.
    Pending,
    /// Measured height as recorded, before the minimum is applied.
    Measured(f32),
}

/// Per-row height cache with a default for unmeasured rows.
#[derive(Debug, Clone)]
pub struct RowHeightCache {
    /// Heights indexed by row; `None` means pending.
    heights: Vec<Option<f32>>,
    /// Height reported for pending rows. Never below `min_height`.
    default_height: f32,
    /// Lower bound applied to every reported height.
    min_height: f32,
    /// Bumped on every `invalidate_all`.
    generation: u64,
    /// Number of `Some` entries in `heights`.
    measured: usize,
}

impl Default for RowHeightCache {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_ROW_HEIGHT)
    }
}

impl RowHeightCache {
    /// Create a cache whose default height equals its minimum height.
    #[must_use]
    pub fn new(min_height: f32) -> Self {
        Self {
            heights: Vec::new(),
            default_height: min_height,
            min_height,
            generation: 0,
            measured: 0,
        }
    }

    /// Set the height reported for unmeasured rows.
    ///
    /// Clamped so that it never drops below the minimum height.
    #[must_use]
    pub fn with_default_height(mut self, height: f32) -> Self {
        self.default_height = height.max(self.min_height);
        self
    }

    /// Rows share one width; only heights vary.
    #[must_use]
    pub const fn fixed_width(&self) -> bool {
        true
    }

    #[must_use]
    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    #[must_use]
    pub fn default_height(&self) -> f32 {
        self.default_height
    }

    /// Invalidation generation, starting at 0.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of rows with a recorded height.
    #[must_use]
    pub fn measured_count(&self) -> usize {
        self.measured
    }

    /// Height of the row at `index`.
    ///
    /// Returns the default height when the row has not been measured,
    /// including rows far beyond anything rendered so far.
    #[must_use]
    pub fn height_of(&self, index: usize) -> f32 {
        match self.measurement(index) {
            RowMeasurement::Pending => self.default_height,
            RowMeasurement::Measured(h) => h.max(self.min_height),
        }
    }

    /// Raw measurement state of the row at `index`.
    #[must_use]
    pub fn measurement(&self, index: usize) -> RowMeasurement {
        match self.heights.get(index).copied().flatten() {
            Some(h) => RowMeasurement::Measured(h),
            None => RowMeasurement::Pending,
        }
    }

    /// Whether the row at `index` has been measured.
    #[must_use]
    pub fn is_measured(&self, index: usize) -> bool {
        matches!(self.measurement(index), RowMeasurement::Measured(_))
    }

    /// Record the measured height of the row at `index`.
    ///
    /// Returns `true` when the reported height of the row changed, which
    /// means every offset below it moved. Non-finite or negative heights
    /// are rejected and leave the entry untouched.
    pub fn record_measured(&mut self, index: usize, height: f32) -> bool {
        if !height.is_finite() || height < 0.0 {
            warn!(index, height, "rejected row measurement");
            return false;
        }
        let before = self.height_of(index);
        if index >= self.heights.len() {
            self.heights.resize(index + 1, None);
        }
        if self.heights[index].replace(height).is_none() {
            self.measured += 1;
        }
        let after = self.height_of(index);
        trace!(index, height, changed = before != after, "row measured");
        before != after
    }

    /// Drop every recorded height.
    pub fn invalidate_all(&mut self) {
        self.heights.clear();
        self.measured = 0;
        self.generation = self.generation.wrapping_add(1);
        trace!(generation = self.generation, "row heights invalidated");
    }

    /// Sum of the heights of rows `0..row_count`.
    #[must_use]
    pub fn total_height(&self, row_count: usize) -> f32 {
        (0..row_count).map(|i| self.height_of(i)).sum()
    }
}
