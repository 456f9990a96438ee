//! The facade's top-level error type.
//!
//! One variant per failure mode a caller needs to branch on, nothing
//! collapsed into a single opaque string.

use uxf_util::Diagnostic;

#[derive(Debug, thiserror::Error)]
pub enum UxfError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// At least one fatal diagnostic was reported during load (§4.6
    /// "fatal=true terminates by propagating a typed error").
    #[error("{message}")]
    Invalid {
        message: String,
        diagnostics: Vec<Diagnostic>,
    },
}
