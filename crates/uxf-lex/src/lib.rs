//! Lexer: UXF source text → token stream (§4.1).
//!
//! Knows nothing about the document tree being built; it only recognizes
//! grammar terminals and reports `E-LEX-*` diagnostics through a
//! [`uxf_util::Handler`].

mod lexer;
mod token;

pub use lexer::Lexer;
pub use token::{SpannedToken, Token};
