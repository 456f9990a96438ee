//! Pretty-print command: re-serialize a document in canonical form,
//! applying the configured [`uxf::Format`] (§6 "CLI surface").

use std::path::PathBuf;

use uxf::LoadOptions;

use crate::commands::common::{display_path, load_bytes, read_input, write_output};
use crate::config::FormatConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct PprintArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

pub fn run_pprint(args: PprintArgs, format: &FormatConfig) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let label = args.input.display().to_string();
    let loaded = load_bytes(bytes, &label, &LoadOptions::default())?;

    if args.verbose {
        eprintln!("pprint: {} -> {}", label, display_path(args.output.as_deref()));
    }

    let text = uxf::dumps(&loaded.uxf, &format.to_format());
    write_output(args.output.as_deref(), text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn pretty_prints_to_a_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.uxf");
        let output = dir.path().join("out.uxf");
        std::fs::write(&input, "uxf 1.0\n[1 2 3]").unwrap();

        run_pprint(
            PprintArgs { input, output: Some(output.clone()), verbose: false },
            &FormatConfig::default(),
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert_eq!(text, "uxf 1.0\n[1 2 3]\n");
    }

    #[test]
    fn rejects_invalid_documents() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.uxf");
        std::fs::write(&input, "uxf 1.0\n").unwrap();

        let result = run_pprint(
            PprintArgs { input, output: None, verbose: false },
            &FormatConfig::default(),
        );
        assert!(result.is_err());
    }
}
