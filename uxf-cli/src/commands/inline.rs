//! Import-inlining command: resolve every `! <source>` directive and
//! write the result back out with the imported ttypes embedded instead
//! of referenced (§6 "CLI surface"; `Format::replace_imports`).

use std::path::PathBuf;

use uxf::LoadOptions;

use crate::commands::common::{load_bytes, read_input, write_output};
use crate::config::FormatConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct InlineArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn run_inline(args: InlineArgs, format: &FormatConfig) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let label = args.input.display().to_string();
    let options = LoadOptions::new().with_resolve_imports(true);
    let loaded = load_bytes(bytes, &label, &options)?;

    if args.verbose {
        eprintln!("inline: {} ({} import(s) resolved)", label, loaded.uxf.imports.len());
    }

    let format = format.to_format().with_replace_imports(true);
    let text = uxf::dumps(&loaded.uxf, &format);
    write_output(args.output.as_deref(), text.as_bytes())
}
