//! Command modules for the uxf-cli CLI.
//!
//! Each subcommand is implemented in its own file; `common` holds the
//! input/output plumbing every one of them shares.

pub mod common;

pub mod compress;
pub mod inline;
pub mod lint;
pub mod pprint;
pub mod uncompress;

pub use compress::{run_compress, CompressArgs};
pub use inline::{run_inline, InlineArgs};
pub use lint::{run_lint, LintArgs};
pub use pprint::{run_pprint, PprintArgs};
pub use uncompress::{run_uncompress, UncompressArgs};
