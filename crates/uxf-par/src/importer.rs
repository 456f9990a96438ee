//! The seam between the parser and import resolution (§4.4).
//!
//! `uxf-par` only needs to know "given this import source, what ttypes
//! does it contribute" — it has no business knowing how a system name,
//! relative path, or URL gets turned into bytes. `uxf-import` depends on
//! this crate (to recursively parse an imported document) and implements
//! [`Importer`]; that keeps the dependency edge one-directional.

use uxf_model::TClass;
use uxf_util::{Handler, Symbol};

/// Resolves one `! <source>` directive into the ttypes it contributes.
///
/// Implementations are responsible for the whole of §4.4: system-name
/// registry lookup, relative/absolute/URL resolution, cycle detection,
/// gzip transparency, and structural-identity coalescing across repeated
/// imports of the same source. The parser only merges whatever comes
/// back into its own ttype table.
pub trait Importer {
    /// Resolve `source`, importing on behalf of `importing_file` (used for
    /// relative-path resolution). Returns the resolved ttypes, or `None`
    /// if the source could not be resolved at all (the implementation is
    /// expected to have already reported an `E-IMP-*` diagnostic via
    /// `handler` in that case).
    fn resolve_import(
        &mut self,
        source: &str,
        importing_file: &str,
        handler: &Handler,
    ) -> Option<Vec<(Symbol, TClass)>>;
}
