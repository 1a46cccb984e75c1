//! Sticky header state machine.
//!
//! The tracker starts with no pinned header. Every scroll event selects the
//! last header whose top edge the viewport has scrolled past (see
//! [`select_sticky`]). The observable state only moves when the selected
//! header's [`NodeId`] differs from the current one, so scrolling within the
//! span owned by one header produces no updates.
//!
//! A tree mounted at a restored scroll position gets no scroll event for its
//! resting offset; [`StickyHeaderTracker::prime`] reads that offset from the
//! viewport once after mount.

use tracing::debug;

use crate::headers::{HeaderRecord, select_sticky};
use crate::node::NodeId;
use crate::viewport::Viewport;

/// Current pinned header, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum StickyState {
    #[default]
    None,
    Active(HeaderRecord),
}

impl StickyState {
    #[must_use]
    pub fn record(&self) -> Option<&HeaderRecord> {
        match self {
            Self::None => None,
            Self::Active(record) => Some(record),
        }
    }

    /// Id used for change detection.
    #[must_use]
    pub fn id(&self) -> Option<NodeId> {
        self.record().map(|r| r.id)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}

/// Outcome of feeding one scroll offset to the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StickyTransition {
    /// The pinned header changed identity (including to or from none).
    Changed {
        from: Option<NodeId>,
        to: Option<NodeId>,
    },
    /// Same header as before; nothing observable happened.
    Unchanged,
}

impl StickyTransition {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        matches!(self, Self::Changed { .. })
    }
}

/// Tracks which group header is pinned.
#[derive(Debug, Clone, Default)]
pub struct StickyHeaderTracker {
    state: StickyState,
    /// Count of observable state changes.
    updates: u64,
}

impl StickyHeaderTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &StickyState {
        &self.state
    }

    /// Number of observable updates since construction.
    #[must_use]
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Apply the selection rule for `scroll_top` against `headers`.
    pub fn on_scroll(&mut self, scroll_top: f32, headers: &[HeaderRecord]) -> StickyTransition {
        let selected = select_sticky(headers, scroll_top).copied();
        let from = self.state.id();
        let to = selected.map(|r| r.id);
        if from == to {
            return StickyTransition::Unchanged;
        }

        self.state = match selected {
            Some(record) => StickyState::Active(record),
            None => StickyState::None,
        };
        self.updates += 1;
        debug!(
            scroll_top,
            from = ?from,
            to = ?to,
            "sticky header changed"
        );
        StickyTransition::Changed { from, to }
    }

    /// Seed the state from the viewport's resting scroll offset.
    pub fn prime(&mut self, viewport: &dyn Viewport, headers: &[HeaderRecord]) -> StickyTransition {
        let scroll_top = viewport.scroll_top();
        debug!(scroll_top, "priming sticky header");
        self.on_scroll(scroll_top, headers)
    }

    /// Forget the pinned header without counting an update.
    pub fn reset(&mut self) {
        self.state = StickyState::None;
    }
}
