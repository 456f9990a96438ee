//! `Format` - the writer's configuration knobs (§4.5).

use std::time::Duration;

/// Controls how [`crate::write_string`] renders a document.
#[derive(Clone, Debug, PartialEq)]
pub struct Format {
    /// Per-level indent string; `""` produces compact output.
    pub indent: String,
    /// Soft line-wrap target in columns, for wrapped bytes literals.
    pub wrap_width: usize,
    /// Decimal digits after `.` for reals; `None` = minimal round-trip
    /// precision (whatever `f64`'s shortest representation needs).
    pub realdp: Option<u32>,
    /// If a collection's single-line render is at most this many
    /// characters (and has no embedded newlines), keep it on one line.
    pub max_short_len: usize,
    /// Emit `true`/`false` for booleans; otherwise `yes`/`no`.
    pub use_true_false: bool,
    /// Expand retained imports into inline ttype definitions instead of
    /// writing `! <source>` directives (§9 "ReplaceImports" - a
    /// supplemented writer mode the distilled spec didn't separately
    /// name but the design notes call for as an explicit `Format` field).
    pub replace_imports: bool,
    /// Drop local ttypes that no value in the tree actually uses before
    /// writing (§9 "drop_unused").
    pub drop_unused: bool,
    /// Per-call timeout for network imports fetched while resolving
    /// before a write (§5 "implementations SHOULD provide a per-call
    /// timeout configurable in the Format/load options"); `None` means no
    /// timeout is enforced beyond the transport's own defaults.
    pub timeout: Option<Duration>,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            wrap_width: 96,
            realdp: None,
            max_short_len: 32,
            use_true_false: false,
            replace_imports: false,
            drop_unused: false,
            timeout: None,
        }
    }
}

impl Format {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    pub fn with_realdp(mut self, realdp: Option<u32>) -> Self {
        self.realdp = realdp;
        self
    }

    pub fn with_max_short_len(mut self, max_short_len: usize) -> Self {
        self.max_short_len = max_short_len;
        self
    }

    pub fn with_use_true_false(mut self, use_true_false: bool) -> Self {
        self.use_true_false = use_true_false;
        self
    }

    pub fn with_replace_imports(mut self, replace_imports: bool) -> Self {
        self.replace_imports = replace_imports;
        self
    }

    pub fn with_drop_unused(mut self, drop_unused: bool) -> Self {
        self.drop_unused = drop_unused;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_documented_defaults() {
        let format = Format::default();
        assert_eq!(format.indent, "  ");
        assert_eq!(format.wrap_width, 96);
        assert_eq!(format.realdp, None);
        assert!(!format.use_true_false);
    }

    #[test]
    fn builder_methods_chain() {
        let format = Format::new().with_indent("\t").with_wrap_width(40).with_use_true_false(true);
        assert_eq!(format.indent, "\t");
        assert_eq!(format.wrap_width, 40);
        assert!(format.use_true_false);
    }
}
