//! In-memory data model for UXF documents: the `Value`/`Key` tagged
//! unions, the `List`/`Map`/`Table` containers, `TClass` schemas, and the
//! `Uxf` document root (§3 "Data model").
//!
//! This crate has no knowledge of text syntax; it's the shared vocabulary
//! the lexer, parser, validator, writer, and import resolver all build on
//! top of.

pub mod datetime;
pub mod document;
pub mod list;
pub mod map;
pub mod table;
pub mod tclass;
pub mod types;
pub mod value;

pub use datetime::{DateTimeError, UtcOffset, UxfDate, UxfDateTime};
pub use document::{RootValue, TClassEntry, TClassOrigin, Uxf};
pub use list::UxfList;
pub use map::UxfMap;
pub use table::{RecordLenMismatch, UxfTable};
pub use tclass::{Field, TClass};
pub use types::{is_reserved_word, is_valid_identifier, BuiltinType, KType, TypeName, RESERVED_WORDS};
pub use value::{Key, Value};
