//! Type-name vocabulary: reserved words, identifier rules, and the
//! `vtype`/`ktype` constraint types (§3 "Invariants" I2, GLOSSARY).

use uxf_util::Symbol;

/// Words that may never be used as a ttype, field name, or any other
/// identifier (GLOSSARY "Reserved words").
pub const RESERVED_WORDS: &[&str] = &[
    "bool", "bytes", "date", "datetime", "int", "list", "map", "null", "real", "str", "table",
    "yes", "no",
];

pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

/// Validate an identifier per Invariant I2: case-sensitive, 1-60 UTF
/// letters/digits/underscores, starting with a letter or underscore, and
/// not a reserved word.
pub fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_alphabetic() || first == '_') {
        return false;
    }
    if !chars.clone().all(|c| c.is_alphanumeric() || c == '_') {
        return false;
    }
    let len = s.chars().count();
    if len == 0 || len > 60 {
        return false;
    }
    !is_reserved_word(s)
}

/// The built-in value kinds that can appear as a `vtype` (GLOSSARY,
/// grammar `VTYPE`). `null` is excluded by Invariant on List/vtype:
/// "absent = any" and null is only ever a *value*, never a declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Bool,
    Int,
    Real,
    Date,
    DateTime,
    Str,
    Bytes,
    List,
    Map,
    Table,
}

impl BuiltinType {
    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::Bool => "bool",
            BuiltinType::Int => "int",
            BuiltinType::Real => "real",
            BuiltinType::Date => "date",
            BuiltinType::DateTime => "datetime",
            BuiltinType::Str => "str",
            BuiltinType::Bytes => "bytes",
            BuiltinType::List => "list",
            BuiltinType::Map => "map",
            BuiltinType::Table => "table",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "bool" => BuiltinType::Bool,
            "int" => BuiltinType::Int,
            "real" => BuiltinType::Real,
            "date" => BuiltinType::Date,
            "datetime" => BuiltinType::DateTime,
            "str" => BuiltinType::Str,
            "bytes" => BuiltinType::Bytes,
            "list" => BuiltinType::List,
            "map" => BuiltinType::Map,
            "table" => BuiltinType::Table,
            _ => return None,
        })
    }
}

/// The key types a `Map`'s `ktype` may restrict to (grammar `KTYPE`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KType {
    Int,
    Date,
    DateTime,
    Str,
    Bytes,
}

impl KType {
    pub fn name(&self) -> &'static str {
        match self {
            KType::Int => "int",
            KType::Date => "date",
            KType::DateTime => "datetime",
            KType::Str => "str",
            KType::Bytes => "bytes",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        Some(match s {
            "int" => KType::Int,
            "date" => KType::Date,
            "datetime" => KType::DateTime,
            "str" => KType::Str,
            "bytes" => KType::Bytes,
            _ => return None,
        })
    }

    pub fn as_builtin(&self) -> BuiltinType {
        match self {
            KType::Int => BuiltinType::Int,
            KType::Date => BuiltinType::Date,
            KType::DateTime => BuiltinType::DateTime,
            KType::Str => BuiltinType::Str,
            KType::Bytes => BuiltinType::Bytes,
        }
    }
}

/// A resolved `vtype`/field-type name: either a built-in kind or a
/// reference to a user-defined ttype, resolved by name (§9 "Arena + index
/// for TClass references" - we store the name, not a pointer, and
/// validation resolves it by lookup in the document's `tclasses` table).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeName {
    Builtin(BuiltinType),
    Ttype(Symbol),
}

impl TypeName {
    pub fn builtin_or_ttype(name: &str) -> Self {
        match BuiltinType::from_name(name) {
            Some(b) => TypeName::Builtin(b),
            None => TypeName::Ttype(Symbol::intern(name)),
        }
    }

    pub fn name(&self) -> std::borrow::Cow<'static, str> {
        match self {
            TypeName::Builtin(b) => std::borrow::Cow::Borrowed(b.name()),
            TypeName::Ttype(sym) => std::borrow::Cow::Borrowed(sym.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_words_are_rejected() {
        for word in RESERVED_WORDS {
            assert!(!is_valid_identifier(word), "{word} should be reserved");
        }
    }

    #[test]
    fn valid_identifiers_accepted() {
        assert!(is_valid_identifier("PriceList"));
        assert!(is_valid_identifier("_private"));
        assert!(is_valid_identifier("a1"));
    }

    #[test]
    fn identifiers_cannot_start_with_digit() {
        assert!(!is_valid_identifier("1abc"));
    }

    #[test]
    fn identifiers_cap_at_60_chars() {
        let ok = "a".repeat(60);
        let too_long = "a".repeat(61);
        assert!(is_valid_identifier(&ok));
        assert!(!is_valid_identifier(&too_long));
    }

    #[test]
    fn empty_identifier_is_invalid() {
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn builtin_type_name_roundtrips() {
        for b in [
            BuiltinType::Bool,
            BuiltinType::Int,
            BuiltinType::Real,
            BuiltinType::Date,
            BuiltinType::DateTime,
            BuiltinType::Str,
            BuiltinType::Bytes,
            BuiltinType::List,
            BuiltinType::Map,
            BuiltinType::Table,
        ] {
            assert_eq!(BuiltinType::from_name(b.name()), Some(b));
        }
    }

    #[test]
    fn ktype_excludes_bool_and_collections() {
        assert_eq!(KType::from_name("bool"), None);
        assert_eq!(KType::from_name("list"), None);
        assert_eq!(KType::from_name("str"), Some(KType::Str));
    }

    #[test]
    fn type_name_resolves_ttype_vs_builtin() {
        assert_eq!(
            TypeName::builtin_or_ttype("int"),
            TypeName::Builtin(BuiltinType::Int)
        );
        match TypeName::builtin_or_ttype("PriceList") {
            TypeName::Ttype(sym) => assert_eq!(sym.as_str(), "PriceList"),
            _ => panic!("expected ttype"),
        }
    }
}
