//! Uncompress command: load a (possibly gzipped) document and write it
//! back out as plain canonical UXF text.

use std::path::PathBuf;

use uxf::LoadOptions;

use crate::commands::common::{load_bytes, read_input, write_output};
use crate::config::FormatConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct UncompressArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn run_uncompress(args: UncompressArgs, format: &FormatConfig) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let label = args.input.display().to_string();
    let loaded = load_bytes(bytes, &label, &LoadOptions::default())?;

    if args.verbose {
        eprintln!("uncompress: {}", label);
    }

    let text = uxf::dumps(&loaded.uxf, &format.to_format());
    write_output(args.output.as_deref(), text.as_bytes())
}
