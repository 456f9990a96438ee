//! Fluent builder for constructing [`Diagnostic`]s.

use super::codes::DiagnosticCode;
use super::level::Level;
use super::Diagnostic;
use crate::Span;

/// A snippet of source text shown alongside a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceSnippet {
    pub line_text: String,
    pub line: u32,
    pub column: u32,
}

impl SourceSnippet {
    pub fn point(line_text: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            line_text: line_text.into(),
            line,
            column,
        }
    }
}

/// Fluent builder for a [`Diagnostic`].
///
/// ```
/// use uxf_util::diagnostic::{DiagnosticBuilder, Span, codes::E_TYPE_MISMATCH};
///
/// let diag = DiagnosticBuilder::error("value does not match field vtype")
///     .code(E_TYPE_MISMATCH)
///     .span(Span::DUMMY)
///     .with_help("declare the field as `real` or change the literal")
///     .build();
/// ```
#[derive(Clone, Debug)]
pub struct DiagnosticBuilder {
    diag: Diagnostic,
}

impl DiagnosticBuilder {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            diag: Diagnostic::error(message, Span::DUMMY),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            diag: Diagnostic::warning(message, Span::DUMMY),
        }
    }

    pub fn span(mut self, span: Span) -> Self {
        self.diag.span = span;
        self
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.diag.code = Some(code);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.diag.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diag.helps.push(help.into());
        self
    }

    pub fn with_snippet(mut self, snippet: SourceSnippet) -> Self {
        self.diag.snippets.push(snippet);
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.diag.filename = filename.into();
        self
    }

    pub fn build(self) -> Diagnostic {
        self.diag
    }

    /// Build and hand the diagnostic to a handler in one step.
    pub fn emit(self, handler: &super::Handler) {
        handler.emit_diagnostic(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::codes::E_IMP_CYCLE;

    #[test]
    fn builder_applies_all_fields() {
        let diag = DiagnosticBuilder::error("cycle detected")
            .code(E_IMP_CYCLE)
            .span(Span::new(0, 0, 3, 1))
            .with_note("a imports b")
            .with_help("break the cycle")
            .filename("a.uxf")
            .build();

        assert_eq!(diag.level, Level::Error);
        assert_eq!(diag.code, Some(E_IMP_CYCLE));
        assert_eq!(diag.span.line, 3);
        assert_eq!(diag.notes, vec!["a imports b"]);
        assert_eq!(diag.helps, vec!["break the cycle"]);
        assert_eq!(diag.filename, "a.uxf");
    }
}
