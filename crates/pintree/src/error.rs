//! Construction-time errors.
//!
//! Rendering has no recoverable failure modes: out-of-range indices are
//! caller bugs and panic, and panics from the row renderer propagate to the
//! host untouched. What can fail is assembling a tree from incomplete or
//! nonsensical configuration, and that fails at build time.

use std::fmt;

/// Errors reported while configuring a [`StickyTree`](crate::tree::StickyTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No row-render function was supplied.
    MissingRowRenderer,
    /// No change callback was supplied.
    MissingChangeCallback,
    /// A configuration value is out of range.
    InvalidConfig {
        field: &'static str,
        reason: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRowRenderer => write!(f, "sticky tree requires a row renderer"),
            Self::MissingChangeCallback => write!(f, "sticky tree requires a change callback"),
            Self::InvalidConfig { field, reason } => {
                write!(f, "invalid tree configuration `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Standard result type for pintree APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_missing_piece() {
        assert!(Error::MissingRowRenderer.to_string().contains("row renderer"));
        assert!(
            Error::MissingChangeCallback
                .to_string()
                .contains("change callback")
        );
        let err = Error::InvalidConfig {
            field: "indent_per_level",
            reason: "must be finite".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid tree configuration `indent_per_level`: must be finite"
        );
    }
}
