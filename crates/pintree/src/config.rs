//! Tree configuration.
//!
//! [`TreeConfig`] holds every tunable that is not a callback. Values are
//! checked once, when the tree is built, by [`TreeConfig::validate`].

use crate::error::{Error, Result};
use crate::height_cache::DEFAULT_MIN_ROW_HEIGHT;
use crate::viewport::ScrollAlignment;

/// Default horizontal indentation per nesting level, in pixels.
pub const DEFAULT_INDENT_PER_LEVEL: f32 = 30.0;

/// Default number of rows rendered beyond each edge of the viewport.
pub const DEFAULT_OVERSCAN_ROW_COUNT: usize = 20;

/// Presentation and windowing settings for a sticky tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    /// Left margin added per level of `deepness`.
    pub indent_per_level: f32,
    /// Fixed list width. `None` lets the viewport auto-size horizontally.
    pub width: Option<f32>,
    /// Row to bring into view on the next layout.
    pub scroll_to_index: Option<usize>,
    /// Where `scroll_to_index` lands in the viewport.
    pub scroll_to_alignment: ScrollAlignment,
    /// Extra rows rendered above and below the visible window.
    pub overscan_row_count: usize,
    /// Lower bound for every row height. Must be positive.
    pub min_row_height: f32,
    /// Height assumed for rows not yet measured. `None` means the minimum.
    /// Must be positive when set.
    pub default_row_height: Option<f32>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            indent_per_level: DEFAULT_INDENT_PER_LEVEL,
            width: None,
            scroll_to_index: None,
            scroll_to_alignment: ScrollAlignment::Auto,
            overscan_row_count: DEFAULT_OVERSCAN_ROW_COUNT,
            min_row_height: DEFAULT_MIN_ROW_HEIGHT,
            default_row_height: None,
        }
    }
}

impl TreeConfig {
    #[must_use]
    pub fn with_indent_per_level(mut self, indent: f32) -> Self {
        self.indent_per_level = indent;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn with_scroll_to_index(mut self, index: usize) -> Self {
        self.scroll_to_index = Some(index);
        self
    }

    #[must_use]
    pub fn with_scroll_to_alignment(mut self, alignment: ScrollAlignment) -> Self {
        self.scroll_to_alignment = alignment;
        self
    }

    #[must_use]
    pub fn with_overscan_row_count(mut self, rows: usize) -> Self {
        self.overscan_row_count = rows;
        self
    }

    #[must_use]
    pub fn with_min_row_height(mut self, height: f32) -> Self {
        self.min_row_height = height;
        self
    }

    #[must_use]
    pub fn with_default_row_height(mut self, height: f32) -> Self {
        self.default_row_height = Some(height);
        self
    }

    /// Check that every numeric setting is usable.
    pub fn validate(&self) -> Result<()> {
        non_negative("indent_per_level", self.indent_per_level)?;
        positive("min_row_height", self.min_row_height)?;
        if let Some(width) = self.width {
            non_negative("width", width)?;
        }
        if let Some(height) = self.default_row_height {
            positive("default_row_height", height)?;
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidConfig {
            field,
            reason: format!("must be finite, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(Error::InvalidConfig {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(())
}

/// Row heights of zero would give two headers the same offset.
fn positive(field: &'static str, value: f32) -> Result<()> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(Error::InvalidConfig {
            field,
            reason: "must be greater than zero".to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TreeConfig::default();
        assert_eq!(config.indent_per_level, 30.0);
        assert_eq!(config.overscan_row_count, 20);
        assert_eq!(config.min_row_height, 20.0);
        assert_eq!(config.width, None);
        assert_eq!(config.scroll_to_alignment, ScrollAlignment::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_sets_fields() {
        let config = TreeConfig::default()
            .with_indent_per_level(12.0)
            .with_width(400.0)
            .with_scroll_to_index(9)
            .with_scroll_to_alignment(ScrollAlignment::Center)
            .with_overscan_row_count(4)
            .with_min_row_height(16.0)
            .with_default_row_height(24.0);
        assert_eq!(config.indent_per_level, 12.0);
        assert_eq!(config.width, Some(400.0));
        assert_eq!(config.scroll_to_index, Some(9));
        assert_eq!(config.scroll_to_alignment, ScrollAlignment::Center);
        assert_eq!(config.overscan_row_count, 4);
        assert_eq!(config.min_row_height, 16.0);
        assert_eq!(config.default_row_height, Some(24.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_nan_indent() {
        let err = TreeConfig::default()
            .with_indent_per_level(f32::NAN)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "indent_per_level",
                ..
            }
        ));
    }

    #[test]
    fn rejects_negative_width_and_heights() {
        assert!(TreeConfig::default().with_width(-1.0).validate().is_err());
        assert!(
            TreeConfig::default()
                .with_min_row_height(-20.0)
                .validate()
                .is_err()
        );
        assert!(
            TreeConfig::default()
                .with_default_row_height(f32::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn rejects_zero_row_heights() {
        let err = TreeConfig::default()
            .with_min_row_height(0.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            Error::InvalidConfig {
                field: "min_row_height",
                reason: "must be greater than zero".to_owned(),
            }
        );

        let err = TreeConfig::default()
            .with_default_row_height(0.0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "default_row_height",
                ..
            }
        ));

        // A zero width or indent is still fine.
        assert!(
            TreeConfig::default()
                .with_indent_per_level(0.0)
                .with_width(0.0)
                .validate()
                .is_ok()
        );
    }
}
