//! Turns one `! <source>` directive into the bytes of a UXF document, then
//! recursively parses it (§4.4).

use std::io::Read;
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashMap, FxHashSet};

use uxf_model::TClass;
use uxf_par::Importer;
use uxf_sem::ValidationMode;
use uxf_util::diagnostic::codes::{E_IMP_CYCLE, E_IMP_GZIP, E_IMP_NETWORK, E_IMP_NOT_FOUND};
use uxf_util::{Handler, Span, Symbol};

use crate::registry;

enum ImportKind<'a> {
    System(&'a str),
    Url(&'a str),
    Path(&'a str),
}

fn classify(source: &str) -> ImportKind<'_> {
    if source.starts_with("http://") || source.starts_with("https://") {
        ImportKind::Url(source)
    } else if source.contains('.') || source.contains('/') || source.contains('\\') {
        ImportKind::Path(source)
    } else {
        ImportKind::System(source)
    }
}

/// Search order for a relative filename (§4.4 "A relative filename"):
/// the importing file's own directory, then each `UXF_PATH` entry, then
/// the process's current working directory. Absolute paths skip the
/// search and are used as-is.
fn resolve_path(source: &str, importing_file: &str) -> Option<PathBuf> {
    let path = Path::new(source);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    let mut candidates = Vec::new();
    if let Some(dir) = Path::new(importing_file).parent().filter(|d| !d.as_os_str().is_empty()) {
        candidates.push(dir.join(path));
    }
    if let Ok(uxf_path) = std::env::var("UXF_PATH") {
        candidates.extend(std::env::split_paths(&uxf_path).map(|dir| dir.join(path)));
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(path));
    }
    candidates.into_iter().find(|p| p.is_file())
}

/// Fetch the raw bytes for one import source, along with a stable label
/// used for cycle detection, caching, and as the `importing_file` handed
/// to the recursive parse.
fn fetch_bytes(kind: &ImportKind<'_>, importing_file: &str, handler: &Handler) -> Option<(String, Vec<u8>)> {
    match kind {
        ImportKind::System(name) => match registry::lookup(name) {
            Some(text) => Some((format!("<system:{name}>"), text.as_bytes().to_vec())),
            None => {
                handler
                    .build_error(Span::DUMMY, format!("no such system import '{name}'"))
                    .code(E_IMP_NOT_FOUND)
                    .emit(handler);
                None
            }
        },
        ImportKind::Url(url) => match ureq::get(url).call() {
            Ok(response) => {
                let mut bytes = Vec::new();
                match response.into_reader().read_to_end(&mut bytes) {
                    Ok(_) => Some((url.to_string(), bytes)),
                    Err(err) => {
                        handler
                            .build_error(Span::DUMMY, format!("failed reading response body from '{url}': {err}"))
                            .code(E_IMP_NETWORK)
                            .emit(handler);
                        None
                    }
                }
            }
            Err(err) => {
                handler
                    .build_error(Span::DUMMY, format!("failed to fetch import '{url}': {err}"))
                    .code(E_IMP_NETWORK)
                    .emit(handler);
                None
            }
        },
        ImportKind::Path(source) => {
            let Some(path) = resolve_path(source, importing_file) else {
                handler
                    .build_error(Span::DUMMY, format!("import '{source}' not found"))
                    .code(E_IMP_NOT_FOUND)
                    .emit(handler);
                return None;
            };
            match std::fs::read(&path) {
                Ok(bytes) => Some((path.display().to_string(), bytes)),
                Err(err) => {
                    handler
                        .build_error(Span::DUMMY, format!("failed to read import '{}': {err}", path.display()))
                        .code(E_IMP_NOT_FOUND)
                        .emit(handler);
                    None
                }
            }
        }
    }
}

/// Transparently decompress gzip-magic-bytes content (§4.4 "Import text
/// can reference gzipped UXF").
fn maybe_gunzip(bytes: Vec<u8>, label: &str, handler: &Handler) -> Option<Vec<u8>> {
    if bytes.len() < 2 || bytes[0] != 0x1f || bytes[1] != 0x8b {
        return Some(bytes);
    }
    let mut decoder = flate2::read::GzDecoder::new(&bytes[..]);
    let mut out = Vec::new();
    match decoder.read_to_end(&mut out) {
        Ok(_) => Some(out),
        Err(err) => {
            handler
                .build_error(Span::DUMMY, format!("failed to gunzip import '{label}': {err}"))
                .code(E_IMP_GZIP)
                .emit(handler);
            None
        }
    }
}

fn decode_text(bytes: &[u8], label: &str, handler: &Handler) -> Option<String> {
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s.to_string()),
        Err(_) => {
            handler
                .build_error(Span::DUMMY, format!("import '{label}' is not valid UTF-8"))
                .code(E_IMP_NOT_FOUND)
                .emit(handler);
            None
        }
    }
}

/// Resolves `! <source>` directives into ttypes, recursively, with cycle
/// detection and cross-import caching (§4.4).
pub struct ImportResolver {
    mode: ValidationMode,
    in_progress: FxHashSet<String>,
    cache: FxHashMap<String, Vec<(Symbol, TClass)>>,
}

impl ImportResolver {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            in_progress: FxHashSet::default(),
            cache: FxHashMap::default(),
        }
    }
}

impl Importer for ImportResolver {
    fn resolve_import(&mut self, source: &str, importing_file: &str, handler: &Handler) -> Option<Vec<(Symbol, TClass)>> {
        let kind = classify(source);
        let (label, raw) = fetch_bytes(&kind, importing_file, handler)?;

        if let Some(cached) = self.cache.get(&label) {
            return Some(cached.clone());
        }
        if self.in_progress.contains(&label) {
            handler
                .build_error(Span::DUMMY, format!("import cycle detected resolving '{label}'"))
                .code(E_IMP_CYCLE)
                .emit(handler);
            return None;
        }

        let gunzipped = maybe_gunzip(raw, &label, handler)?;
        let text = decode_text(&gunzipped, &label, handler)?;

        self.in_progress.insert(label.clone());
        let doc = uxf_par::parse(&text, handler, self.mode, &label, Some(&mut *self));
        self.in_progress.remove(&label);

        let doc = doc?;
        let ttypes: Vec<(Symbol, TClass)> = doc.tclasses.into_iter().map(|(name, entry)| (name, entry.tclass)).collect();
        self.cache.insert(label, ttypes.clone());
        Some(ttypes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_system_url_and_path_sources() {
        assert!(matches!(classify("ttype-test"), ImportKind::System(_)));
        assert!(matches!(classify("https://example.com/x.uxf"), ImportKind::Url(_)));
        assert!(matches!(classify("./shapes.uxf"), ImportKind::Path(_)));
        assert!(matches!(classify("/abs/shapes.uxf"), ImportKind::Path(_)));
    }

    #[test]
    fn system_import_resolves_ttype_test() {
        let handler = Handler::new("-");
        let mut resolver = ImportResolver::new(ValidationMode::Strict);
        let ttypes = resolver
            .resolve_import("ttype-test", "-", &handler)
            .expect("ttype-test must resolve");
        assert!(ttypes.iter().any(|(name, _)| name.as_str() == "Point"));
        assert!(!handler.has_errors());
    }

    #[test]
    fn unknown_system_import_reports_not_found() {
        let handler = Handler::new("-");
        let mut resolver = ImportResolver::new(ValidationMode::Strict);
        let result = resolver.resolve_import("does-not-exist", "-", &handler);
        assert!(result.is_none());
        assert!(handler.has_errors());
    }

    #[test]
    fn relative_import_reads_from_importing_files_directory() {
        let dir = tempfile::tempdir().unwrap();
        let imported = dir.path().join("shapes.uxf");
        std::fs::write(&imported, "uxf 1.0\n=Shape kind:str\n[]\n").unwrap();
        let importing_file = dir.path().join("main.uxf");

        let handler = Handler::new("-");
        let mut resolver = ImportResolver::new(ValidationMode::Strict);
        let ttypes = resolver
            .resolve_import("shapes.uxf", importing_file.to_str().unwrap(), &handler)
            .expect("shapes.uxf must resolve relative to main.uxf's directory");
        assert!(ttypes.iter().any(|(name, _)| name.as_str() == "Shape"));
    }

    #[test]
    fn missing_relative_import_reports_not_found() {
        let handler = Handler::new("-");
        let mut resolver = ImportResolver::new(ValidationMode::Strict);
        let result = resolver.resolve_import("nope.uxf", "-", &handler);
        assert!(result.is_none());
        assert!(handler.has_errors());
    }
}
