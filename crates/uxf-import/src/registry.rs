//! The built-in system-name registry (§4.4 "A system name... resolved
//! against a built-in registry provided by the implementation. Presence
//! of `ttype-test` is REQUIRED").
//!
//! Each entry is a complete UXF document's text, embedded at compile
//! time, rather than anything read from disk - that's what makes a
//! system name different from a relative filename.

/// `ttype-test`: a couple of small ttypes used by this crate's own tests
/// and available to any document that wants a system import with no
/// filesystem dependency.
const TTYPE_TEST: &str = "uxf 1.0\n\
=Point x:real y:real\n\
=Suit\n\
[]\n";

/// Look up a system name, returning its embedded UXF source text.
pub fn lookup(name: &str) -> Option<&'static str> {
    match name {
        "ttype-test" => Some(TTYPE_TEST),
        _ => None,
    }
}
