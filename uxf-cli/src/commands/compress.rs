//! Compress command: load a document and write it back out gzipped
//! (§4.4 gzip transparency).

use std::path::PathBuf;

use uxf::LoadOptions;

use crate::commands::common::{load_bytes, read_input, write_output};
use crate::config::FormatConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct CompressArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn run_compress(args: CompressArgs, format: &FormatConfig) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let label = args.input.display().to_string();
    let loaded = load_bytes(bytes, &label, &LoadOptions::default())?;

    if args.verbose {
        eprintln!("compress: {}", label);
    }

    let gz = uxf::write_gz(&loaded.uxf, &format.to_format())?;
    write_output(args.output.as_deref(), &gz)
}
