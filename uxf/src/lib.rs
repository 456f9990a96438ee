//! uxf - load and dump UXF (Uniform eXchange Format) documents (§1, §6).
//!
//! This crate is the library surface `uxf-cli` is built on: it wires the
//! lexer/parser/validator/import-resolver/writer crates together behind
//! four entry points - [`load`]/[`loads`] for reading, [`dump`]/[`dumps`]
//! for writing.

mod error;
mod options;

pub use error::UxfError;
pub use options::LoadOptions;

pub use uxf_io::{write_gz, Format};
pub use uxf_model::{
    BuiltinType, DateTimeError, Field, Key, KType, RecordLenMismatch, RootValue, TClass,
    TClassEntry, TClassOrigin, TypeName, Uxf, UxfDate, UxfDateTime, UxfList, UxfMap, UxfTable,
    UtcOffset, Value,
};
pub use uxf_sem::ValidationMode;
pub use uxf_util::{Diagnostic, Handler, Level};

use std::io::Read;
use std::path::Path;

use uxf_import::ImportResolver;

/// A document together with every diagnostic (including non-fatal
/// warnings) the load produced.
#[derive(Debug)]
pub struct LoadedDocument {
    pub uxf: Uxf,
    pub diagnostics: Vec<Diagnostic>,
}

/// Load a UXF document from a file, transparently gunzipping it if it
/// starts with the gzip magic bytes and stripping a UTF-8 BOM if present
/// (§4.4 gzip transparency; §9 BOM handling).
pub fn load(path: impl AsRef<Path>, options: &LoadOptions) -> Result<LoadedDocument, UxfError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let bytes = maybe_gunzip(bytes)?;
    let text = decode_utf8_strip_bom(bytes)?;
    loads(&text, &path.display().to_string(), options)
}

/// Load a UXF document from an in-memory string. `filename` is used only
/// for diagnostics and relative-import resolution; pass `"-"` for text
/// with no file of its own (§7 "the default filename").
pub fn loads(text: &str, filename: &str, options: &LoadOptions) -> Result<LoadedDocument, UxfError> {
    let handler = Handler::new(filename);
    let doc = if options.resolve_imports {
        let mut resolver = ImportResolver::new(options.mode);
        uxf_par::parse(text, &handler, options.mode, filename, Some(&mut resolver))
    } else {
        uxf_par::parse(text, &handler, options.mode, filename, None)
    };
    let diagnostics = handler.diagnostics();
    match doc {
        Some(uxf) => Ok(LoadedDocument { uxf, diagnostics }),
        None => {
            let message = diagnostics
                .iter()
                .find(|d| d.fatal)
                .map(Diagnostic::format_default)
                .unwrap_or_else(|| "invalid UXF document".to_string());
            Err(UxfError::Invalid { message, diagnostics })
        }
    }
}

/// Write a document to a file as canonical UXF text.
pub fn dump(path: impl AsRef<Path>, doc: &Uxf, format: &Format) -> Result<(), UxfError> {
    std::fs::write(path, dumps(doc, format)).map_err(UxfError::from)
}

/// Write a document to a file as gzip-compressed UXF text.
pub fn dump_gz(path: impl AsRef<Path>, doc: &Uxf, format: &Format) -> Result<(), UxfError> {
    let bytes = write_gz(doc, format)?;
    std::fs::write(path, bytes).map_err(UxfError::from)
}

/// Render a document as canonical UXF text. Infallible - a valid `Uxf`
/// tree always has a valid textual rendering.
pub fn dumps(doc: &Uxf, format: &Format) -> String {
    uxf_io::write_string(doc, format)
}

fn maybe_gunzip(bytes: Vec<u8>) -> std::io::Result<Vec<u8>> {
    if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
        let mut decoder = flate2::read::GzDecoder::new(&bytes[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    } else {
        Ok(bytes)
    }
}

fn decode_utf8_strip_bom(bytes: Vec<u8>) -> Result<String, UxfError> {
    let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes[3..].to_vec()
    } else {
        bytes
    };
    String::from_utf8(bytes).map_err(UxfError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_a_minimal_document() {
        let loaded = loads("uxf 1.0\n[1 2 3]\n", "-", &LoadOptions::default()).unwrap();
        assert_eq!(loaded.uxf.version, 1.0);
        let text = dumps(&loaded.uxf, &Format::default());
        assert_eq!(text, "uxf 1.0\n[1 2 3]\n");
    }

    #[test]
    fn invalid_document_reports_a_typed_error() {
        let err = loads("uxf 1.0\n", "-", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, UxfError::Invalid { .. }));
    }

    #[test]
    fn load_and_dump_round_trip_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.uxf");
        std::fs::write(&path, "uxf 1.0\n[<a> <b>]\n").unwrap();
        let loaded = load(&path, &LoadOptions::default()).unwrap();
        let out_path = dir.path().join("out.uxf");
        dump(&out_path, &loaded.uxf, &Format::default()).unwrap();
        let text = std::fs::read_to_string(&out_path).unwrap();
        assert_eq!(text, "uxf 1.0\n[<a> <b>]\n");
    }

    #[test]
    fn property_roundtrip_int_list_through_write_and_parse() {
        use proptest::prelude::*;

        proptest!(|(values in prop::collection::vec(any::<i64>(), 0..20))| {
            let text = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
            let source = format!("uxf 1.0\n[{}]\n", text);
            let loaded = loads(&source, "-", &LoadOptions::default()).unwrap();
            let rendered = dumps(&loaded.uxf, &Format::default());
            let reloaded = loads(&rendered, "-", &LoadOptions::default()).unwrap();
            prop_assert_eq!(loaded.uxf.value, reloaded.uxf.value);
        });
    }

    #[test]
    fn gzip_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.uxf.gz");
        let loaded = loads("uxf 1.0\n[1 2 3]\n", "-", &LoadOptions::default()).unwrap();
        dump_gz(&path, &loaded.uxf, &Format::default()).unwrap();
        let reloaded = load(&path, &LoadOptions::default()).unwrap();
        assert_eq!(reloaded.uxf, loaded.uxf);
    }
}
