//! Diagnostic severity levels.

use std::fmt;

/// Diagnostic severity.
///
/// Error vs. warning (§4.6, §7) is distinguished only via the `fatal` flag
/// on the error-handler callback; `Note`/`Help` exist so a
/// handler can attach extra context without inventing a new channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
    Help,
}

impl Level {
    /// Whether this level, left unhandled, should abort a load/dump.
    pub fn is_fatal_by_default(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
            Level::Help => write!(f, "help"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_convention() {
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Note.to_string(), "note");
        assert_eq!(Level::Help.to_string(), "help");
    }

    #[test]
    fn only_error_is_fatal_by_default() {
        assert!(Level::Error.is_fatal_by_default());
        assert!(!Level::Warning.is_fatal_by_default());
    }
}
