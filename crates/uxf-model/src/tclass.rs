//! `TClass` - a named record schema: an ordered list of fields, each with
//! an optional `vtype` constraint (§3 "TClass", §4.4 "ttype declarations").

use crate::types::TypeName;
use uxf_util::Symbol;

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    pub name: Symbol,
    pub vtype: Option<TypeName>,
}

impl Field {
    pub fn new(name: Symbol) -> Self {
        Self { name, vtype: None }
    }

    pub fn with_vtype(name: Symbol, vtype: TypeName) -> Self {
        Self {
            name,
            vtype: Some(vtype),
        }
    }
}

/// A ttype declaration: `ttype` name plus its field list (possibly empty,
/// for an enumeration-style fieldless table, §4.4).
#[derive(Clone, Debug, PartialEq)]
pub struct TClass {
    pub ttype: Symbol,
    pub fields: Vec<Field>,
    pub comment: Option<String>,
}

impl TClass {
    pub fn new(ttype: Symbol) -> Self {
        Self {
            ttype,
            fields: Vec::new(),
            comment: None,
        }
    }

    pub fn with_fields(ttype: Symbol, fields: Vec<Field>) -> Self {
        Self {
            ttype,
            fields,
            comment: None,
        }
    }

    pub fn is_fieldless(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_index(&self, name: Symbol) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Two `TClass`es are structurally identical when their field lists
    /// match by name and vtype, ignoring `ttype` name and `comment`; the
    /// import resolver uses this to coalesce repeated imports of the same
    /// ttype (§5.4 "Duplicate ttype coalescing").
    pub fn is_structurally_identical(&self, other: &TClass) -> bool {
        self.fields == other.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fieldless_tclass_reports_as_such() {
        let tclass = TClass::new(Symbol::intern("Suit"));
        assert!(tclass.is_fieldless());
    }

    #[test]
    fn field_index_finds_field_by_name() {
        let tclass = TClass::with_fields(
            Symbol::intern("Point"),
            vec![Field::new(Symbol::intern("x")), Field::new(Symbol::intern("y"))],
        );
        assert_eq!(tclass.field_index(Symbol::intern("y")), Some(1));
        assert_eq!(tclass.field_index(Symbol::intern("z")), None);
    }

    #[test]
    fn structural_identity_ignores_ttype_name_and_comment() {
        let mut a = TClass::with_fields(
            Symbol::intern("PointA"),
            vec![Field::new(Symbol::intern("x")), Field::new(Symbol::intern("y"))],
        );
        a.comment = Some("a".into());
        let b = TClass::with_fields(
            Symbol::intern("PointB"),
            vec![Field::new(Symbol::intern("x")), Field::new(Symbol::intern("y"))],
        );
        assert!(a.is_structurally_identical(&b));
    }

    #[test]
    fn structural_identity_requires_matching_fields() {
        let a = TClass::with_fields(Symbol::intern("A"), vec![Field::new(Symbol::intern("x"))]);
        let b = TClass::with_fields(Symbol::intern("B"), vec![Field::new(Symbol::intern("y"))]);
        assert!(!a.is_structurally_identical(&b));
    }
}
