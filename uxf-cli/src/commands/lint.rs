//! Lint command: validate a document and report every diagnostic
//! (warnings included) without writing anything back out (§6 "CLI
//! surface"; §7 "Error handling design").
//!
//! Diagnostics are printed as they're emitted by [`uxf::Handler`]'s
//! default stderr sink; this command only turns the result into the
//! right exit code and, if `--verbose`, a one-line summary.

use std::path::PathBuf;

use uxf::{Level, LoadOptions};

use crate::commands::common::{load_bytes, read_input};
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LintArgs {
    pub input: PathBuf,
    pub verbose: bool,
}

pub fn run_lint(args: LintArgs) -> Result<()> {
    let bytes = read_input(&args.input)?;
    let label = args.input.display().to_string();

    match load_bytes(bytes, &label, &LoadOptions::default()) {
        Ok(loaded) => {
            if args.verbose {
                let warnings = loaded.diagnostics.iter().filter(|d| d.level == Level::Warning).count();
                eprintln!("lint: {} - 0 error(s), {} warning(s)", label, warnings);
            }
            Ok(())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn valid_document_lints_clean() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.uxf");
        std::fs::write(&input, "uxf 1.0\n[1 2 3]\n").unwrap();

        let result = run_lint(LintArgs { input, verbose: false });
        assert!(result.is_ok());
    }

    #[test]
    fn invalid_document_reports_diagnostics_and_fails() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.uxf");
        std::fs::write(&input, "uxf 1.0\n").unwrap();

        let result = run_lint(LintArgs { input, verbose: false });
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().exit_code(), 2);
    }

}
