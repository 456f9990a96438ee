//! Load-time options (§6 "Library API (informative)").

use uxf_sem::ValidationMode;

#[derive(Clone, Debug)]
pub struct LoadOptions {
    pub mode: ValidationMode,
    /// Resolve `! <source>` imports via [`uxf_import::ImportResolver`].
    /// Disabling this leaves `Uxf::imports` populated with the raw
    /// source strings but contributes no ttypes from them - useful for
    /// callers that only want a document's own local ttypes and value
    /// tree without touching the filesystem or network.
    pub resolve_imports: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            resolve_imports: true,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_resolve_imports(mut self, resolve_imports: bool) -> Self {
        self.resolve_imports = resolve_imports;
        self
    }
}
