//! Contract with the external viewport virtualizer.
//!
//! The virtualizer owns windowing, scroll position and auto-sizing. The tree
//! never scrolls or measures anything itself; it reads the current offset,
//! asks for height recomputation, and hands the virtualizer the
//! [`ListProps`] it needs to drive row callbacks.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Operations the tree needs from the virtualizer.
pub trait Viewport {
    /// Current scroll offset, read synchronously.
    fn scroll_top(&self) -> f32;

    /// Discard cached row positions from `start_index` on and recompute
    /// them before the next paint.
    fn recompute_row_heights(&mut self, start_index: usize);
}

/// Scroll notification emitted by the virtualizer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollEvent {
    /// Offset of the viewport's top edge within the content.
    pub scroll_top: f32,
    /// Total content height.
    pub scroll_height: f32,
    /// Visible viewport height.
    pub client_height: f32,
}

impl ScrollEvent {
    /// Event carrying only a scroll offset.
    #[must_use]
    pub fn at(scroll_top: f32) -> Self {
        Self {
            scroll_top,
            ..Self::default()
        }
    }
}

/// Where a row requested via `scroll_to_index` lands in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    /// Scroll the least amount that makes the row visible.
    #[default]
    Auto,
    Start,
    Center,
    End,
}

impl ScrollAlignment {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Start => "start",
            Self::Center => "center",
            Self::End => "end",
        }
    }
}

impl fmt::Display for ScrollAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScrollAlignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "start" => Ok(Self::Start),
            "center" => Ok(Self::Center),
            "end" => Ok(Self::End),
            other => Err(Error::InvalidConfig {
                field: "scroll_to_alignment",
                reason: format!("unknown alignment {other:?}"),
            }),
        }
    }
}

/// Positioning the virtualizer assigns to a windowed row.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellStyle {
    pub top: f32,
    pub left: f32,
    /// `None` while the row is still being measured.
    pub height: Option<f32>,
    pub width: f32,
}

/// Everything the virtualizer needs to window the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ListProps {
    pub row_count: usize,
    /// Explicit width; when set and non-zero, auto width measurement is
    /// disabled.
    pub width: Option<f32>,
    pub overscan_row_count: usize,
    pub scroll_to_index: Option<usize>,
    pub scroll_to_alignment: ScrollAlignment,
}

impl ListProps {
    /// Whether the auto-sizer should leave the width alone.
    #[must_use]
    pub fn disable_auto_width(&self) -> bool {
        self.explicit_width().is_some()
    }

    /// Width to lay out with, given the auto-sizer's measurement.
    #[must_use]
    pub fn resolve_width(&self, auto_width: f32) -> f32 {
        self.explicit_width().unwrap_or(auto_width)
    }

    /// A zero width counts as unset.
    fn explicit_width(&self) -> Option<f32> {
        self.width.filter(|&width| width > 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_round_trips_through_str() {
        for a in [
            ScrollAlignment::Auto,
            ScrollAlignment::Start,
            ScrollAlignment::Center,
            ScrollAlignment::End,
        ] {
            assert_eq!(a.as_str().parse::<ScrollAlignment>().ok(), Some(a));
        }
    }

    #[test]
    fn alignment_rejects_unknown() {
        let err = "middle".parse::<ScrollAlignment>().unwrap_err();
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn explicit_width_wins() {
        let props = ListProps {
            row_count: 3,
            width: Some(320.0),
            overscan_row_count: 20,
            scroll_to_index: None,
            scroll_to_alignment: ScrollAlignment::Auto,
        };
        assert!(props.disable_auto_width());
        assert_eq!(props.resolve_width(800.0), 320.0);

        let auto = ListProps {
            width: None,
            ..props
        };
        assert!(!auto.disable_auto_width());
        assert_eq!(auto.resolve_width(800.0), 800.0);
    }

    #[test]
    fn zero_width_falls_back_to_auto() {
        let props = ListProps {
            row_count: 3,
            width: Some(0.0),
            overscan_row_count: 20,
            scroll_to_index: None,
            scroll_to_alignment: ScrollAlignment::Auto,
        };
        assert!(!props.disable_auto_width());
        assert_eq!(props.resolve_width(800.0), 800.0);
    }

    #[test]
    fn scroll_event_at() {
        let ev = ScrollEvent::at(42.0);
        assert_eq!(ev.scroll_top, 42.0);
        assert_eq!(ev.client_height, 0.0);
    }
}
