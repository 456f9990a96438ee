//! Error handling module for the uxf-cli CLI.
//!
//! This module provides the top-level error type the CLI maps onto the
//! exit codes `0`/`1`/`2`/`3` (usage / parse-validate / I/O; §6 "CLI
//! surface"). The library crates never panic on malformed input, and
//! this type is how that propagates all the way out to `main`.

use thiserror::Error;
use uxf::{Diagnostic, UxfError};

/// Main error type for the uxf-cli application.
#[derive(Error, Debug)]
pub enum CliError {
    /// Bad arguments or flag combination - never reaches the parser.
    #[error("usage error: {0}")]
    Usage(String),

    /// The document failed to parse or validate. Carries every
    /// diagnostic collected, not just the first fatal one, so `lint`
    /// can report everything in one pass.
    #[error("{message}")]
    Invalid {
        message: String,
        diagnostics: Vec<Diagnostic>,
    },

    /// Reading or writing a file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file present but malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// The process exit code this error maps onto (§6 "CLI surface").
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 1,
            CliError::Invalid { .. } => 2,
            CliError::Io(_) => 3,
            CliError::Config(_) => 3,
        }
    }
}

impl From<UxfError> for CliError {
    fn from(err: UxfError) -> Self {
        match err {
            UxfError::Io(e) => CliError::Io(e),
            UxfError::InvalidUtf8(e) => CliError::Invalid {
                message: e.to_string(),
                diagnostics: Vec::new(),
            },
            UxfError::Invalid { message, diagnostics } => CliError::Invalid { message, diagnostics },
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_error_exits_one() {
        assert_eq!(CliError::Usage("bad flag".into()).exit_code(), 1);
    }

    #[test]
    fn invalid_document_exits_two() {
        let err = CliError::Invalid { message: "bad doc".into(), diagnostics: Vec::new() };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn io_error_exits_three() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: CliError = io_err.into();
        assert_eq!(err.exit_code(), 3);
    }
}
