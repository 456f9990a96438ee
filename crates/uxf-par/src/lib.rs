//! uxf-par - the recursive-descent parser (§4.2).
//!
//! Consumes the token stream from `uxf-lex` and builds a `uxf-model`
//! `Uxf` tree, calling into `uxf-sem`'s [`uxf_sem::Validator`] inline as
//! each typed slot (list item, map value, table cell, map key) is filled
//! in - the validator is not a separate pass over the finished tree.
//!
//! Import resolution is behind the [`Importer`] trait rather than a
//! direct dependency on `uxf-import`, so that crate can depend on this
//! one (to recursively parse imported documents) without a cycle.

mod importer;
mod parser;

pub use importer::Importer;
pub use parser::{parse, SUPPORTED_VERSION};
