//! Recoverable failure modes of the reveal core.
//!
//! None of these ever reach the caller: each one is logged where it is
//! detected and replaced by a safe, visible default.

/// Every failure the reveal/formatting core knows how to recover from.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RevealError {
    /// An icon key that the glyph table cannot resolve.  Rendered as a blank
    /// placeholder slot.
    #[error("icon '{icon}' could not be resolved")]
    MissingIconReference { icon: String },

    /// Zero items handed to the formatter or the orchestrator.  Produces an
    /// empty result.
    #[error("empty list supplied to {context}")]
    EmptyListInput { context: &'static str },

    /// The host cannot report viewport intersections.  Observers fire on
    /// their first poll instead.
    #[error("viewport intersection detection is unavailable")]
    ObserverUnsupported,

    /// A catalog record failed its structural check and never enters the core.
    #[error("malformed {kind} record: {reason}")]
    MalformedRecord { kind: &'static str, reason: String },
}

impl RevealError {
    pub fn missing_icon(icon: impl Into<String>) -> Self {
        Self::MissingIconReference { icon: icon.into() }
    }

    pub fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            kind,
            reason: reason.into(),
        }
    }
}
