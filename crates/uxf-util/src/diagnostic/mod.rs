//! Diagnostic module - pluggable error/warning reporting.
//!
//! A callable injected into load/dump with signature `(line, code,
//! message, filename, fatal)`. [`Handler`] collects [`Diagnostic`]s and
//! forwards each one to
//! a pluggable sink closure as it is emitted, so callers embedding the
//! library can accumulate warnings without aborting, or replace the sink
//! entirely to route diagnostics elsewhere.
//!
//! # Examples
//!
//! ```
//! use uxf_util::diagnostic::{Handler, Span};
//!
//! let mut handler = Handler::new("-");
//! handler.build_error(Span::at_line(3), "unexpected token")
//!     .emit(&handler);
//!
//! assert!(handler.has_errors());
//! ```

pub mod codes;
mod builder;
mod level;

pub use builder::{DiagnosticBuilder, SourceSnippet};
pub use codes::DiagnosticCode;
pub use level::Level;

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// A single diagnostic: an error, warning, note, or help message tied to a
/// source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: Option<DiagnosticCode>,
    pub filename: String,
    /// Whether this diagnostic should abort the load/dump in progress.
    /// Defaults to `level == Error`; callers (e.g. fix-types mode) may
    /// downgrade specific errors to non-fatal before emitting.
    pub fatal: bool,
    pub notes: Vec<String>,
    pub helps: Vec<String>,
    pub snippets: Vec<SourceSnippet>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span) -> Self {
        let fatal = level.is_fatal_by_default();
        Self {
            level,
            message: message.into(),
            span,
            code: None,
            filename: "-".to_string(),
            fatal,
            notes: Vec::new(),
            helps: Vec::new(),
            snippets: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, message, span)
    }

    pub fn warning(message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Warning, message, span)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.helps.push(help.into());
        self
    }

    /// Render the default single-line diagnostic format: `filename:line:
    /// level[code]: message`.
    pub fn format_default(&self) -> String {
        let code = self
            .code
            .map(|c| format!("[{}] ", c.as_str()))
            .unwrap_or_default();
        if self.span.line > 0 {
            format!(
                "{}:{}: {}{}: {}",
                self.filename, self.span.line, code, self.level, self.message
            )
        } else {
            format!("{}: {}{}: {}", self.filename, code, self.level, self.message)
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_default())
    }
}

/// Signature of the pluggable error-handler sink: `(line, code, message,
/// filename, fatal)`.
pub type ErrorSink = dyn FnMut(u32, &str, &str, &str, bool);

fn default_sink(line: u32, code: &str, message: &str, filename: &str, fatal: bool) {
    let level = if fatal { "error" } else { "warning" };
    if line > 0 {
        eprintln!("{}:{}: {} [{}]: {}", filename, line, level, code, message);
    } else {
        eprintln!("{}: {} [{}]: {}", filename, level, code, message);
    }
}

/// Collects [`Diagnostic`]s for one load/dump call and forwards each to a
/// replaceable sink as it arrives.
///
/// The default sink writes to stderr; install a different one with
/// [`Handler::with_sink`] to accumulate warnings silently, route them to a
/// log, or turn them into a collected `Vec` for a test assertion.
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
    sink: RefCell<Box<ErrorSink>>,
    default_filename: String,
}

impl Handler {
    /// Create a handler whose sink writes formatted diagnostics to stderr.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            sink: RefCell::new(Box::new(default_sink)),
            default_filename: filename.into(),
        }
    }

    /// Replace the sink with a caller-supplied callback, matching the
    /// `(line, code, message, filename, fatal)` contract.
    pub fn with_sink(filename: impl Into<String>, sink: impl FnMut(u32, &str, &str, &str, bool) + 'static) -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
            sink: RefCell::new(Box::new(sink)),
            default_filename: filename.into(),
        }
    }

    fn emit(&self, mut diagnostic: Diagnostic) {
        if diagnostic.filename == "-" && self.default_filename != "-" {
            diagnostic.filename = self.default_filename.clone();
        }
        let code = diagnostic.code.map(|c| c.as_str()).unwrap_or("");
        (self.sink.borrow_mut())(
            diagnostic.span.line,
            code,
            &diagnostic.message,
            &diagnostic.filename,
            diagnostic.fatal,
        );
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn emit_diagnostic(&self, diagnostic: Diagnostic) {
        self.emit(diagnostic);
    }

    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::error(message).span(span)
    }

    pub fn build_warning(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder {
        DiagnosticBuilder::warning(message).span(span)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.level == Level::Error)
    }

    /// True once any emitted diagnostic was marked fatal; callers should
    /// stop processing, since a fatal diagnostic aborts the load.
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.borrow().iter().any(|d| d.fatal)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Warning)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codes::E_TYPE_RESERVED;

    #[test]
    fn emitting_error_flags_has_errors() {
        let handler = Handler::new("-");
        handler
            .build_error(Span::at_line(1), "reserved word used as identifier")
            .code(E_TYPE_RESERVED)
            .emit(&handler);

        assert!(handler.has_errors());
        assert!(handler.has_fatal());
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn warnings_are_not_fatal_by_default() {
        let handler = Handler::new("-");
        handler.build_warning(Span::at_line(2), "unused ttype").emit(&handler);

        assert!(!handler.has_errors());
        assert!(!handler.has_fatal());
        assert_eq!(handler.warning_count(), 1);
    }

    #[test]
    fn custom_sink_receives_all_fields() {
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<(u32, String, String, String, bool)>>> =
            Rc::new(RefCell::new(Vec::new()));
        let seen_in_sink = Rc::clone(&seen);
        let handler = Handler::with_sink("doc.uxf", move |line, code, message, filename, fatal| {
            seen_in_sink.borrow_mut().push((
                line,
                code.to_string(),
                message.to_string(),
                filename.to_string(),
                fatal,
            ));
        });

        handler
            .build_error(Span::at_line(5), "bad value")
            .code(E_TYPE_RESERVED)
            .emit(&handler);

        let recorded = seen.borrow();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].0, 5);
        assert_eq!(recorded[0].1, "E-TYPE-RESERVED");
        assert_eq!(recorded[0].3, "doc.uxf");
        assert!(recorded[0].4);
    }

    #[test]
    fn clear_removes_all_diagnostics() {
        let handler = Handler::new("-");
        handler.build_error(Span::DUMMY, "x").emit(&handler);
        handler.clear();
        assert!(!handler.has_errors());
    }
}
