use thiserror::Error;

/// Failures raised by tainted text operations.
///
/// Every failure is reported synchronously at the call site that first
/// detects it. None of these are transient: a [`TaintError::TrustBoundary`]
/// is a logic error in how the caller handles the trust boundary, and the
/// boundary variants mirror the failure the host text type would raise for
/// the same input.
///
/// Error messages never contain tainted payload text, only variant names
/// and placeholder keys.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaintError {
    /// A tainted value was requested from an absent payload.
    #[error("tainted value cannot be built from an absent payload")]
    AbsentPayload,

    /// Untrusted content was about to reach a trusted-only channel.
    ///
    /// Raised before any output is produced, e.g. when a tainted argument
    /// is substituted into a trusted template or a tainted element is
    /// assembled by a trusted join.
    #[error("trust boundary violation: {reason}")]
    TrustBoundary {
        /// What was rejected. Never includes the tainted payload itself.
        reason: String,
    },

    /// A character index fell outside the valid range.
    ///
    /// Negative indices count from the end and are resolved before the
    /// range check, matching the slicing semantics of the operations that
    /// produce this error.
    #[error("character index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The index as supplied by the caller.
        index: isize,
        /// Character length of the receiver.
        len: usize,
    },

    /// A lookup whose contract requires a match found none.
    #[error("no match for the requested text")]
    NoMatch,

    /// The template text itself could not be parsed.
    #[error("malformed template: {reason}")]
    MalformedTemplate {
        /// Parser diagnostic.
        reason: String,
    },
}
