//! uxf-io - the canonical text writer (§4.5).
//!
//! Builds the whole document as one string rather than printing
//! piecemeal, so a container's final rendered size is known before any
//! of it is written.

mod format;
mod writer;

pub use format::Format;
pub use writer::write_string;

use std::io::{self, Write};

/// Write a document as gzip-compressed UXF text (§4.4 "Import text can
/// reference gzipped UXF"; the writer's symmetric counterpart).
pub fn write_gz(doc: &uxf_model::Uxf, format: &Format) -> io::Result<Vec<u8>> {
    let text = write_string(doc, format);
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(text.as_bytes())?;
    encoder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxf_model::{RootValue, Uxf, UxfList};

    #[test]
    fn gzipped_output_starts_with_the_gzip_magic_bytes() {
        let doc = Uxf::new(RootValue::List(UxfList::new()));
        let bytes = write_gz(&doc, &Format::default()).unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
