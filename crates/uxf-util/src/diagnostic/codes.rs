//! Stable diagnostic codes.
//!
//! Codes are stable strings prefixed by phase: `E-LEX-*`, `E-PARSE-*`,
//! `E-TYPE-*`, `E-IMP-*`, `W-*` for warnings. These are `&'static str`
//! since the string form is the stable identifier callers match on, not
//! a number.

use std::fmt;

/// A stable diagnostic code, e.g. `E-TYPE-RESERVED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiagnosticCode(pub &'static str);

impl DiagnosticCode {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Lexical errors.
pub const E_LEX_BAD_HEADER: DiagnosticCode = DiagnosticCode::new("E-LEX-BAD-HEADER");
pub const E_LEX_UNEXPECTED_CHAR: DiagnosticCode = DiagnosticCode::new("E-LEX-UNEXPECTED-CHAR");
pub const E_LEX_UNTERMINATED_STRING: DiagnosticCode =
    DiagnosticCode::new("E-LEX-UNTERMINATED-STRING");
pub const E_LEX_UNTERMINATED_BYTES: DiagnosticCode =
    DiagnosticCode::new("E-LEX-UNTERMINATED-BYTES");
pub const E_LEX_BAD_BYTE_PAIR: DiagnosticCode = DiagnosticCode::new("E-LEX-BAD-BYTE-PAIR");
pub const E_LEX_BAD_ENTITY: DiagnosticCode = DiagnosticCode::new("E-LEX-BAD-ENTITY");
pub const E_LEX_RAW_RESERVED_CHAR: DiagnosticCode =
    DiagnosticCode::new("E-LEX-RAW-RESERVED-CHAR");
pub const E_LEX_INVALID_NUMBER: DiagnosticCode = DiagnosticCode::new("E-LEX-INVALID-NUMBER");
pub const E_LEX_INVALID_IDENT: DiagnosticCode = DiagnosticCode::new("E-LEX-INVALID-IDENT");

// Syntactic errors.
pub const E_PARSE_UNEXPECTED_TOKEN: DiagnosticCode =
    DiagnosticCode::new("E-PARSE-UNEXPECTED-TOKEN");
pub const E_PARSE_UNTERMINATED_CONTAINER: DiagnosticCode =
    DiagnosticCode::new("E-PARSE-UNTERMINATED-CONTAINER");
pub const E_PARSE_MISSING_VALUE: DiagnosticCode = DiagnosticCode::new("E-PARSE-MISSING-VALUE");
pub const E_PARSE_ODD_MAP_ITEMS: DiagnosticCode = DiagnosticCode::new("E-PARSE-ODD-MAP-ITEMS");
pub const E_PARSE_TABLE_LEN: DiagnosticCode = DiagnosticCode::new("E-PARSE-TABLE-LEN");
pub const E_PARSE_DUPLICATE_TTYPE: DiagnosticCode =
    DiagnosticCode::new("E-PARSE-DUPLICATE-TTYPE");
pub const E_PARSE_UNKNOWN_TTYPE: DiagnosticCode = DiagnosticCode::new("E-PARSE-UNKNOWN-TTYPE");

// Structural/type errors.
pub const E_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new("E-TYPE-MISMATCH");
pub const E_TYPE_UNKNOWN: DiagnosticCode = DiagnosticCode::new("E-TYPE-UNKNOWN");
pub const E_TYPE_RESERVED: DiagnosticCode = DiagnosticCode::new("E-TYPE-RESERVED");
pub const E_TYPE_CONFLICT: DiagnosticCode = DiagnosticCode::new("E-TYPE-CONFLICT");
pub const E_TYPE_BAD_KEY: DiagnosticCode = DiagnosticCode::new("E-TYPE-BAD-KEY");
pub const E_TYPE_RANGE: DiagnosticCode = DiagnosticCode::new("E-TYPE-RANGE");

// Import errors.
pub const E_IMP_NOT_FOUND: DiagnosticCode = DiagnosticCode::new("E-IMP-NOT-FOUND");
pub const E_IMP_CYCLE: DiagnosticCode = DiagnosticCode::new("E-IMP-CYCLE");
pub const E_IMP_NETWORK: DiagnosticCode = DiagnosticCode::new("E-IMP-NETWORK");
pub const E_IMP_GZIP: DiagnosticCode = DiagnosticCode::new("E-IMP-GZIP");

// Warnings are never suppressed silently.
pub const W_VERSION: DiagnosticCode = DiagnosticCode::new("W-VERSION");
pub const W_UNUSED_TTYPE: DiagnosticCode = DiagnosticCode::new("W-UNUSED-TTYPE");
pub const W_DUPLICATE_KEY: DiagnosticCode = DiagnosticCode::new("W-DUPLICATE-KEY");
pub const W_FIX_TYPE: DiagnosticCode = DiagnosticCode::new("W-FIX-TYPE");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_code() {
        assert_eq!(E_TYPE_RESERVED.to_string(), "E-TYPE-RESERVED");
    }

    #[test]
    fn codes_compare_by_string() {
        assert_eq!(DiagnosticCode::new("E-IMP-CYCLE"), E_IMP_CYCLE);
    }
}
