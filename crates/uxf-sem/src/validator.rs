//! The semantic validator: Invariants I1-I8 (§3), strict vs. fix-types
//! coercion (§4.3), unused-ttype detection, and duplicate ttype-conflict
//! detection (§4.3, §7).

use indexmap::IndexMap;
use uxf_util::diagnostic::codes::*;
use uxf_util::{Handler, Span, Symbol};

use uxf_model::{
    BuiltinType, Field, Key, KType, RootValue, TClass, TClassEntry, TypeName, Uxf, UxfList, UxfMap,
    UxfTable, Value,
};

use crate::mode::ValidationMode;
use crate::naturalize::{naturalize, naturalize_key};

/// Runs the checks in §4.3 against values as they are built (inline during
/// parsing) or against an already-constructed tree (on demand).
pub struct Validator<'a> {
    mode: ValidationMode,
    handler: &'a Handler,
}

impl<'a> Validator<'a> {
    pub fn new(mode: ValidationMode, handler: &'a Handler) -> Self {
        Self { mode, handler }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    fn report_mismatch(&self, span: Span, message: impl Into<String>) {
        let fatal = self.mode == ValidationMode::Strict;
        let mut diag = self.handler.build_error(span, message).code(E_TYPE_MISMATCH).build();
        diag.fatal = fatal;
        self.handler.emit_diagnostic(diag);
    }

    fn report_fixed(&self, span: Span, message: impl Into<String>) {
        self.handler
            .build_warning(span, message)
            .code(W_FIX_TYPE)
            .emit(self.handler);
    }

    /// Enforce I3/I4/I5/I6 for one value sitting in a typed slot (a list
    /// element, a map value, or a table cell), coercing it in fix-types
    /// mode when the mismatch is convertible. Always returns a value -
    /// the original one if no coercion applied or was possible, matching
    /// the "pass a handler down the stack rather than raise" design (§9).
    pub fn check_typed_slot(
        &self,
        value: Value,
        expected: Option<&TypeName>,
        tclasses: &IndexMap<Symbol, TClassEntry>,
        span: Span,
    ) -> Value {
        if value.is_null() {
            return value; // I6: null is assignable to any typed slot.
        }
        let Some(expected) = expected else {
            return value; // absent vtype = any.
        };
        match expected {
            TypeName::Builtin(BuiltinType::Real) => self.coerce_real(value, span),
            TypeName::Builtin(BuiltinType::Int) => self.coerce_int(value, span),
            TypeName::Builtin(want) => self.coerce_builtin(value, *want, span),
            TypeName::Ttype(name) => self.coerce_ttype(value, *name, tclasses, span),
        }
    }

    fn coerce_real(&self, value: Value, span: Span) -> Value {
        match value {
            Value::Real(_) => value,
            // "MUST be promoted to real" - unconditional, not gated on
            // fix-types mode (§4.2 "Numeric coercion").
            Value::Int(i) => Value::Real(i as f64),
            Value::Str(s) if self.mode == ValidationMode::FixTypes => match naturalize(&s) {
                Value::Int(i) => {
                    self.report_fixed(span, format!("naturalized \"{s}\" to real"));
                    Value::Real(i as f64)
                }
                Value::Real(r) => {
                    self.report_fixed(span, format!("naturalized \"{s}\" to real"));
                    Value::Real(r)
                }
                _ => {
                    self.report_mismatch(span, format!("\"{s}\" is not assignable to real"));
                    Value::Str(s)
                }
            },
            other => {
                self.report_mismatch(
                    span,
                    format!(
                        "value of type {} is not assignable to real",
                        other.builtin_type_name().unwrap_or("null")
                    ),
                );
                other
            }
        }
    }

    fn coerce_int(&self, value: Value, span: Span) -> Value {
        match value {
            Value::Int(_) => value,
            Value::Real(r) if r.fract() == 0.0 && self.mode == ValidationMode::FixTypes => {
                self.report_fixed(span, format!("truncated {r} to int"));
                Value::Int(r as i64)
            }
            Value::Str(s) if self.mode == ValidationMode::FixTypes => match naturalize(&s) {
                Value::Int(i) => {
                    self.report_fixed(span, format!("naturalized \"{s}\" to int"));
                    Value::Int(i)
                }
                _ => {
                    self.report_mismatch(span, format!("\"{s}\" is not assignable to int"));
                    Value::Str(s)
                }
            },
            Value::Real(r) => {
                self.report_mismatch(span, format!("real {r} is not assignable to int"));
                Value::Real(r)
            }
            other => {
                self.report_mismatch(
                    span,
                    format!(
                        "value of type {} is not assignable to int",
                        other.builtin_type_name().unwrap_or("null")
                    ),
                );
                other
            }
        }
    }

    fn coerce_builtin(&self, value: Value, want: BuiltinType, span: Span) -> Value {
        if value.builtin_type_name() == Some(want.name()) {
            return value;
        }
        if self.mode == ValidationMode::FixTypes {
            if let Value::Str(s) = &value {
                let natural = naturalize(s);
                if natural.builtin_type_name() == Some(want.name()) {
                    self.report_fixed(span, format!("naturalized \"{s}\" to {}", want.name()));
                    return natural;
                }
            }
        }
        self.report_mismatch(
            span,
            format!(
                "value of type {} is not assignable to {}",
                value.builtin_type_name().unwrap_or("null"),
                want.name()
            ),
        );
        value
    }

    fn coerce_ttype(
        &self,
        value: Value,
        name: Symbol,
        tclasses: &IndexMap<Symbol, TClassEntry>,
        span: Span,
    ) -> Value {
        match &value {
            Value::Table(t) if t.ttype == name => value,
            _ => {
                if !tclasses.contains_key(&name) {
                    self.handler
                        .build_error(span, format!("unknown ttype '{}'", name.as_str()))
                        .code(E_TYPE_UNKNOWN)
                        .emit(self.handler);
                } else {
                    self.report_mismatch(span, format!("value is not a '{}' table", name.as_str()));
                }
                value
            }
        }
    }

    /// Enforce I3's key half: a map key must match the declared `ktype`.
    pub fn check_key(&self, key: Key, ktype: Option<KType>, span: Span) -> Key {
        let Some(ktype) = ktype else {
            return key;
        };
        if key.builtin_type_name() == ktype.name() {
            return key;
        }
        if self.mode == ValidationMode::FixTypes {
            if let Key::Str(s) = &key {
                let natural = naturalize_key(s);
                if natural.builtin_type_name() == ktype.name() {
                    self.report_fixed(span, format!("naturalized key \"{s}\" to {}", ktype.name()));
                    return natural;
                }
            }
        }
        self.handler
            .build_error(
                span,
                format!("key of type {} does not match ktype {}", key.builtin_type_name(), ktype.name()),
            )
            .code(E_TYPE_BAD_KEY)
            .emit(self.handler);
        key
    }

    /// Re-check an already-built tree's invariants (§4.3 "on demand, over
    /// a constructed tree"): unknown ttype references (I1) and
    /// unused-ttype warnings. Per-value type matching is already enforced
    /// by [`Validator::check_typed_slot`]/[`Validator::check_key`] at
    /// construction time, so this pass focuses on whole-tree concerns a
    /// single insertion point can't see.
    pub fn validate_document(&self, doc: &Uxf) {
        for tclass in doc.local_tclasses() {
            self.check_tclass_field_types(tclass, &doc.tclasses);
        }
        let used = doc.used_ttypes();
        for (name, entry) in &doc.tclasses {
            if entry.origin == uxf_model::TClassOrigin::Local && !used.contains(name) {
                self.handler
                    .build_warning(Span::DUMMY, format!("ttype '{}' is never referenced", name.as_str()))
                    .code(W_UNUSED_TTYPE)
                    .emit(self.handler);
            }
        }
    }

    fn check_tclass_field_types(&self, tclass: &TClass, tclasses: &IndexMap<Symbol, TClassEntry>) {
        for field in &tclass.fields {
            if let Some(TypeName::Ttype(name)) = &field.vtype {
                if !tclasses.contains_key(name) {
                    self.handler
                        .build_error(
                            Span::DUMMY,
                            format!(
                                "field '{}' of ttype '{}' refers to unknown ttype '{}'",
                                field.name.as_str(),
                                tclass.ttype.as_str(),
                                name.as_str()
                            ),
                        )
                        .code(E_TYPE_UNKNOWN)
                        .emit(self.handler);
                }
            }
        }
    }

    /// Remove local ttypes with no referencing table/field anywhere in the
    /// document (§9 "drop_unused"). Only ever removes `Local`-origin
    /// entries; imported-but-unused ttypes stay (dropping them is the
    /// import resolver's job via `replace_imports`, not this one's).
    pub fn drop_unused(&self, doc: &mut Uxf) {
        let used = doc.used_ttypes();
        doc.tclasses
            .retain(|name, entry| entry.origin != uxf_model::TClassOrigin::Local || used.contains(name));
    }
}

/// Check a list's elements all match its declared `vtype` (I4), coercing
/// in place when fix-types mode allows it.
pub fn revalidate_list(validator: &Validator<'_>, list: &mut UxfList, tclasses: &IndexMap<Symbol, TClassEntry>) {
    let vtype = list.vtype.clone();
    for item in list.iter_mut() {
        let taken = std::mem::replace(item, Value::Null);
        *item = validator.check_typed_slot(taken, vtype.as_ref(), tclasses, Span::DUMMY);
    }
}

/// Check a map's keys/values all match its declared `ktype`/`vtype` (I3).
pub fn revalidate_map(validator: &Validator<'_>, map: &mut UxfMap, tclasses: &IndexMap<Symbol, TClassEntry>) {
    let vtype = map.vtype.clone();
    for (_, value) in map.iter_mut() {
        let taken = std::mem::replace(value, Value::Null);
        *value = validator.check_typed_slot(taken, vtype.as_ref(), tclasses, Span::DUMMY);
    }
}

/// Check a table's cells all match their field's declared vtype (I5).
pub fn revalidate_table(
    validator: &Validator<'_>,
    table: &mut UxfTable,
    tclass: &TClass,
    tclasses: &IndexMap<Symbol, TClassEntry>,
) {
    let ncols = table.ncols();
    for row in 0..table.nrows() {
        for col in 0..ncols {
            let Some(field) = tclass.fields.get(col) else { continue };
            let vtype = field.vtype.clone();
            if let Some(cell) = table.get_mut(row, col) {
                let taken = std::mem::replace(cell, Value::Null);
                *cell = validator.check_typed_slot(taken, vtype.as_ref(), tclasses, Span::DUMMY);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> Handler {
        Handler::new("-")
    }

    fn empty_tclasses() -> IndexMap<Symbol, TClassEntry> {
        IndexMap::new()
    }

    #[test]
    fn int_is_promoted_to_real_unconditionally() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        let out = v.check_typed_slot(
            Value::Int(2),
            Some(&TypeName::Builtin(BuiltinType::Real)),
            &empty_tclasses(),
            Span::DUMMY,
        );
        assert_eq!(out, Value::Real(2.0));
        assert!(!h.has_errors());
    }

    #[test]
    fn real_with_fraction_into_int_is_fatal_in_strict_mode() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        v.check_typed_slot(
            Value::Real(3.14),
            Some(&TypeName::Builtin(BuiltinType::Int)),
            &empty_tclasses(),
            Span::DUMMY,
        );
        assert!(h.has_errors());
        assert!(h.has_fatal());
    }

    #[test]
    fn real_with_zero_fraction_truncates_in_fix_types_mode() {
        let h = handler();
        let v = Validator::new(ValidationMode::FixTypes, &h);
        let out = v.check_typed_slot(
            Value::Real(3.0),
            Some(&TypeName::Builtin(BuiltinType::Int)),
            &empty_tclasses(),
            Span::DUMMY,
        );
        assert_eq!(out, Value::Int(3));
        assert!(!h.has_errors());
        assert_eq!(h.warning_count(), 1);
    }

    #[test]
    fn null_is_always_accepted() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        let out = v.check_typed_slot(
            Value::Null,
            Some(&TypeName::Builtin(BuiltinType::Int)),
            &empty_tclasses(),
            Span::DUMMY,
        );
        assert_eq!(out, Value::Null);
        assert!(!h.has_errors());
    }

    #[test]
    fn fix_types_naturalizes_strings_into_declared_type() {
        let h = handler();
        let v = Validator::new(ValidationMode::FixTypes, &h);
        let out = v.check_typed_slot(
            Value::Str("42".to_string()),
            Some(&TypeName::Builtin(BuiltinType::Int)),
            &empty_tclasses(),
            Span::DUMMY,
        );
        assert_eq!(out, Value::Int(42));
    }

    #[test]
    fn ktype_mismatch_is_an_error() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        v.check_key(Key::Str("x".into()), Some(KType::Int), Span::DUMMY);
        assert!(h.has_errors());
    }

    #[test]
    fn unused_local_ttype_warns() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        let mut doc = Uxf::new(RootValue::List(UxfList::new()));
        let ttype = Symbol::intern("Unused");
        doc.tclasses.insert(ttype, TClassEntry::local(TClass::new(ttype)));
        v.validate_document(&doc);
        assert_eq!(h.warning_count(), 1);
    }

    fn outer_inner_doc() -> Uxf {
        let inner = TClass::with_fields(Symbol::intern("Inner"), vec![Field::new(Symbol::intern("x"))]);
        let outer = TClass::with_fields(
            Symbol::intern("Outer"),
            vec![Field::with_vtype(
                Symbol::intern("p"),
                TypeName::Ttype(Symbol::intern("Inner")),
            )],
        );
        let mut outer_table = UxfTable::new(Symbol::intern("Outer"), 1);
        outer_table.push_row(vec![Value::Null]).unwrap();
        let mut doc = Uxf::new(RootValue::Table(outer_table));
        doc.tclasses.insert(Symbol::intern("Outer"), TClassEntry::local(outer));
        doc.tclasses.insert(Symbol::intern("Inner"), TClassEntry::local(inner));
        doc
    }

    #[test]
    fn ttype_referenced_only_as_a_field_vtype_is_not_unused() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        let doc = outer_inner_doc();
        v.validate_document(&doc);
        assert_eq!(h.warning_count(), 0);
    }

    #[test]
    fn drop_unused_keeps_a_ttype_referenced_only_as_a_field_vtype() {
        let h = handler();
        let v = Validator::new(ValidationMode::Strict, &h);
        let mut doc = outer_inner_doc();
        v.drop_unused(&mut doc);
        assert!(doc.tclasses.contains_key(&Symbol::intern("Inner")));
    }
}
