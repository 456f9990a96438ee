//! Validation modes (§4.3): strict rejection vs. best-effort fix-up.

/// How the validator treats a convertible type mismatch (§4.3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    /// The first violation is fatal; the load aborts (§4.3 "Strict (default)").
    Strict,
    /// Convertible mismatches (`int<->real`, `str` via `naturalize`) are
    /// coerced with a warning; everything else is still an error (§4.3
    /// "Fix-types").
    FixTypes,
}

impl Default for ValidationMode {
    fn default() -> Self {
        ValidationMode::Strict
    }
}
