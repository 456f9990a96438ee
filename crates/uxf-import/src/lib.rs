//! uxf-import - resolves `! <source>` directives into ttypes (§4.4).
//!
//! Implements `uxf-par`'s [`uxf_par::Importer`] seam rather than being
//! depended on by it, so `uxf-par` stays ignorant of filesystems, the
//! network, and gzip while this crate freely depends on `uxf-par` to
//! recursively parse whatever it fetches.

mod registry;
mod resolver;

pub use resolver::ImportResolver;
