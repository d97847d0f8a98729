//! Common result and error types for the gosling toolchain.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an infrastructure failure inside the analysis engine
/// (a bug in gosling or a broken worker), not a problem with the code
/// under analysis. Issues found in analyzed source are reported as
/// findings and the operation still returns `Ok`.
pub type GoslingResult<T> = Result<T, InternalError>;

/// An internal engine error indicating a bug in gosling, not a problem
/// with the analyzed source.
///
/// These errors should never occur during normal operation. The engine
/// propagates them to its caller instead of terminating the process;
/// deciding on an exit code belongs to the outermost entry point.
#[derive(Debug, Clone, thiserror::Error)]
#[error("internal analysis error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
