//! uxf-util - Shared foundation types for the UXF reader/writer crates.
//!
//! Every other crate in this workspace (`uxf-lex`, `uxf-par`, `uxf-sem`,
//! `uxf-import`, `uxf-io`, `uxf`) builds on the three things defined here:
//!
//! - [`span`] - byte-offset + line/column source locations and the
//!   [`span::SourceMap`] that tracks every file a load touches (including
//!   transitively imported ones).
//! - [`symbol`] - interned identifiers, since ttype/field/key names repeat
//!   constantly across a typed document.
//! - [`diagnostic`] - the pluggable `(line, code, message, filename,
//!   fatal)` error-handler sink callers hook into (§4.6).

pub mod diagnostic;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, Handler, Level};
pub use span::{FileId, SourceFile, SourceMap, Span};
pub use symbol::Symbol;
