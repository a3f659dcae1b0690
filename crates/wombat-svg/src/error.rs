//! Errors raised while interpreting a document.
//!
//! None of these are recovered from inside the renderer: a failure anywhere
//! in the tree aborts the whole render.

use thiserror::Error;

use crate::values::Unit;

/// Failure while resolving values or rendering the tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SvgError {
    /// A path data command letter outside the handled set.
    #[error("unsupported path command '{0}'")]
    UnsupportedPathCommand(char),

    /// A length uses a unit with no absolute size (`em`, `ex`, `%`).
    #[error("unit '{unit}' cannot be resolved to an absolute length in {value:?}")]
    UnresolvedUnit {
        /// The unit that was matched.
        unit: Unit,
        /// The attribute text.
        value: String,
    },

    /// An attribute value that cannot be parsed or has the wrong number of
    /// components.
    #[error("malformed value {value:?}: {reason}")]
    MalformedAttributeValue {
        /// The offending text.
        value: String,
        /// What was expected.
        reason: &'static str,
    },

    /// A referenced document could not be located or parsed.
    #[error("cannot resolve reference {href:?}: {reason}")]
    ReferenceResolution {
        /// The reference as written in the document.
        href: String,
        /// Why loading failed.
        reason: String,
    },
}

impl SvgError {
    /// Shorthand for [`SvgError::MalformedAttributeValue`].
    pub(crate) fn malformed(value: impl Into<String>, reason: &'static str) -> Self {
        Self::MalformedAttributeValue {
            value: value.into(),
            reason,
        }
    }
}
