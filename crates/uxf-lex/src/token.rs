//! Token vocabulary (§4.1: "Output: token stream, one token per grammar
//! terminal").
//!
//! Date/time literals are carried as their raw scanned components rather
//! than as `uxf-model` types: calendar validation (leap years, hour
//! ranges) is the parser's job once it has a field's declared vtype to
//! check against, so the lexer stays free of a dependency on the model
//! crate.

use uxf_util::{Span, Symbol};

#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    Header {
        version: f64,
        custom: Option<String>,
    },
    Comment(String),
    ImportDirective(String),
    /// `=`, starting a TTYPEDEF.
    TtypeBegin,
    MapOpen,
    MapClose,
    ListOpen,
    ListClose,
    TableOpen,
    TableClose,
    Bytes(Vec<u8>),
    Str(String),
    Null,
    Bool(bool),
    Int(i64),
    Real(f64),
    Date {
        year: i32,
        month: u32,
        day: u32,
    },
    DateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        /// Offset in minutes from UTC, if a `Z`/`±HH[:MM]` suffix was
        /// present (§4.2 "retained as an offset in minutes").
        offset_minutes: Option<i32>,
    },
    /// One of the reserved built-in type names (§ Glossary).
    Typename(Symbol),
    Ident(Symbol),
    /// The bareword `null`, distinct from the `?` null value literal
    /// ([`Token::Null`]). Reserved in identifier position like any other
    /// reserved word (§ Glossary).
    ReservedNullWord,
    Colon,
    Eof,
}

impl Token {
    pub fn is_eof(&self) -> bool {
        matches!(self, Token::Eof)
    }

    /// A short label for diagnostics, e.g. "MAP_OPEN" or "IDENT".
    pub fn label(&self) -> &'static str {
        match self {
            Token::Header { .. } => "HEADER",
            Token::Comment(_) => "COMMENT",
            Token::ImportDirective(_) => "IMPORT_DIRECTIVE",
            Token::TtypeBegin => "TTYPE_BEGIN",
            Token::MapOpen => "MAP_OPEN",
            Token::MapClose => "MAP_CLOSE",
            Token::ListOpen => "LIST_OPEN",
            Token::ListClose => "LIST_CLOSE",
            Token::TableOpen => "TABLE_OPEN",
            Token::TableClose => "TABLE_CLOSE",
            Token::Bytes(_) => "BYTES",
            Token::Str(_) => "STR",
            Token::Null => "NULL",
            Token::Bool(_) => "BOOL",
            Token::Int(_) => "INT",
            Token::Real(_) => "REAL",
            Token::Date { .. } => "DATE",
            Token::DateTime { .. } => "DATETIME",
            Token::Typename(_) => "TYPENAME",
            Token::Ident(_) => "IDENT",
            Token::ReservedNullWord => "NULL",
            Token::Colon => "COLON",
            Token::Eof => "EOF",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}
