//! Shared I/O helpers for uxf-cli commands.
//!
//! Every command reads from a file path or `-` (stdin) and writes to a
//! file path or `-` (stdout), so the read/write boundary lives here once
//! instead of once per command.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use uxf::{LoadOptions, LoadedDocument, UxfError};

use crate::error::{CliError, Result};

/// Read all bytes from a path, or from stdin if `path` is `-`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read(path)?)
    }
}

/// Write bytes to a path, or to stdout if `path` is `-` (or absent).
pub fn write_output(path: Option<&Path>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) if path != Path::new("-") => {
            std::fs::write(path, bytes)?;
        }
        _ => {
            std::io::stdout().write_all(bytes)?;
        }
    }
    Ok(())
}

/// Parse bytes read via [`read_input`] into a document, undoing gzip
/// transparency and a UTF-8 BOM the same way [`uxf::load`] does for a
/// real path (§4.4 gzip transparency; §9 BOM handling) - duplicated here
/// because stdin has no path for `uxf::load` to gunzip/decode itself.
pub fn load_bytes(bytes: Vec<u8>, label: &str, options: &LoadOptions) -> Result<LoadedDocument> {
    let bytes = maybe_gunzip(bytes)?;
    let text = decode_utf8_strip_bom(bytes)?;
    Ok(uxf::loads(&text, label, options)?)
}

fn maybe_gunzip(bytes: Vec<u8>) -> Result<Vec<u8>> {
    if bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b {
        let mut decoder = flate2::read::GzDecoder::new(&bytes[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    } else {
        Ok(bytes)
    }
}

fn decode_utf8_strip_bom(bytes: Vec<u8>) -> Result<String> {
    let bytes = if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        bytes[3..].to_vec()
    } else {
        bytes
    };
    String::from_utf8(bytes).map_err(|e| CliError::from(UxfError::InvalidUtf8(e)))
}

/// `"-"` when no path was given, matching the input/output convention.
pub fn display_path(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_else(|| "-".to_string())
}

#[allow(dead_code)]
pub fn to_path_buf(path: &Path) -> PathBuf {
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_from_a_real_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.uxf");
        std::fs::write(&path, b"uxf 1.0\n[]\n").unwrap();
        let bytes = read_input(&path).unwrap();
        assert_eq!(bytes, b"uxf 1.0\n[]\n");
    }

    #[test]
    fn writes_to_a_real_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.uxf");
        write_output(Some(&path), b"uxf 1.0\n[]\n").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"uxf 1.0\n[]\n");
    }
}
