//! `Uxf` - the document root produced by the parser and consumed by the
//! writer (§3 "Uxf document", §4.1 "Header").

use indexmap::IndexMap;
use uxf_util::Symbol;

use crate::list::UxfList;
use crate::map::UxfMap;
use crate::table::UxfTable;
use crate::tclass::TClass;
use crate::types::TypeName;

/// Where a ttype entry in a document's table came from: declared inline in
/// this document's header, or pulled in by an `import` (§5 "Imports").
/// Imported entries are dropped from the written output unless the
/// generating options ask for import inlining (§9 "ReplaceImports").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TClassOrigin {
    Local,
    Imported,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TClassEntry {
    pub tclass: TClass,
    pub origin: TClassOrigin,
}

impl TClassEntry {
    pub fn local(tclass: TClass) -> Self {
        Self {
            tclass,
            origin: TClassOrigin::Local,
        }
    }

    pub fn imported(tclass: TClass) -> Self {
        Self {
            tclass,
            origin: TClassOrigin::Imported,
        }
    }
}

/// The single top-level value a document carries: a List, Map, or Table
/// (§4.1 "a Uxf file has exactly one root value").
#[derive(Clone, Debug, PartialEq)]
pub enum RootValue {
    List(UxfList),
    Map(UxfMap),
    Table(UxfTable),
}

/// A parsed (and, once validated, semantically checked) UXF document.
#[derive(Clone, Debug, PartialEq)]
pub struct Uxf {
    /// The `uxf` header version number (§4.1), e.g. `1.0`.
    pub version: f64,
    pub custom: Option<String>,
    pub comment: Option<String>,
    /// Import sources in declaration order, exactly as written (§5.1),
    /// before resolution.
    pub imports: Vec<String>,
    /// ttypes in first-seen order: local declarations followed by ones
    /// pulled in transitively from imports (§5.4).
    pub tclasses: IndexMap<Symbol, TClassEntry>,
    pub value: RootValue,
}

impl Uxf {
    pub fn new(value: RootValue) -> Self {
        Self {
            version: 1.0,
            custom: None,
            comment: None,
            imports: Vec::new(),
            tclasses: IndexMap::new(),
            value,
        }
    }

    pub fn get_tclass(&self, ttype: Symbol) -> Option<&TClass> {
        self.tclasses.get(&ttype).map(|entry| &entry.tclass)
    }

    pub fn local_tclasses(&self) -> impl Iterator<Item = &TClass> {
        self.tclasses
            .values()
            .filter(|e| e.origin == TClassOrigin::Local)
            .map(|e| &e.tclass)
    }

    /// ttypes actually referenced somewhere in the value tree, plus every
    /// ttype transitively named by a field `vtype` of a referenced ttype
    /// (a ttype used only as another ttype's field type is still used).
    /// Used by the validator to emit `W-UNUSED-TTYPE` and, when asked, to
    /// drop unused declarations from the written output (§9 "drop_unused").
    pub fn used_ttypes(&self) -> std::collections::HashSet<Symbol> {
        let mut used = std::collections::HashSet::new();
        match &self.value {
            RootValue::List(l) => collect_list(l, &mut used),
            RootValue::Map(m) => collect_map(m, &mut used),
            RootValue::Table(t) => {
                used.insert(t.ttype);
            }
        }

        let mut queue: Vec<Symbol> = used.iter().copied().collect();
        while let Some(ttype) = queue.pop() {
            let Some(tclass) = self.get_tclass(ttype) else {
                continue;
            };
            for field in &tclass.fields {
                if let Some(TypeName::Ttype(referenced)) = &field.vtype {
                    if used.insert(*referenced) {
                        queue.push(*referenced);
                    }
                }
            }
        }

        used
    }
}

fn collect_value(value: &crate::value::Value, used: &mut std::collections::HashSet<Symbol>) {
    use crate::value::Value;
    match value {
        Value::List(l) => collect_list(l, used),
        Value::Map(m) => collect_map(m, used),
        Value::Table(t) => {
            used.insert(t.ttype);
            for row in t.rows() {
                for cell in row {
                    collect_value(cell, used);
                }
            }
        }
        _ => {}
    }
}

fn collect_list(list: &UxfList, used: &mut std::collections::HashSet<Symbol>) {
    for item in list {
        collect_value(item, used);
    }
}

fn collect_map(map: &UxfMap, used: &mut std::collections::HashSet<Symbol>) {
    for (_, value) in map {
        collect_value(value, used);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tclass::Field;
    use crate::value::Value;

    #[test]
    fn new_document_has_version_one_and_no_imports() {
        let doc = Uxf::new(RootValue::List(UxfList::new()));
        assert_eq!(doc.version, 1);
        assert!(doc.imports.is_empty());
        assert!(doc.tclasses.is_empty());
    }

    #[test]
    fn local_tclasses_excludes_imported_entries() {
        let mut doc = Uxf::new(RootValue::List(UxfList::new()));
        let local = TClass::new(Symbol::intern("Local"));
        let imported = TClass::new(Symbol::intern("Imported"));
        doc.tclasses
            .insert(Symbol::intern("Local"), TClassEntry::local(local));
        doc.tclasses
            .insert(Symbol::intern("Imported"), TClassEntry::imported(imported));
        let names: Vec<_> = doc.local_tclasses().map(|t| t.ttype.as_str()).collect();
        assert_eq!(names, vec!["Local"]);
    }

    #[test]
    fn used_ttypes_walks_nested_table_cells() {
        let mut inner = UxfTable::new(Symbol::intern("Inner"), 1);
        inner.push_row(vec![Value::Int(1)]).unwrap();
        let mut outer = UxfTable::new(Symbol::intern("Outer"), 1);
        outer.push_row(vec![Value::Table(Box::new(inner))]).unwrap();
        let doc = Uxf::new(RootValue::Table(outer));
        let used = doc.used_ttypes();
        assert!(used.contains(&Symbol::intern("Outer")));
        assert!(used.contains(&Symbol::intern("Inner")));
    }

    #[test]
    fn used_ttypes_includes_ttypes_referenced_only_as_a_field_vtype() {
        let inner = TClass::new(Symbol::intern("Inner"));
        let outer = TClass::with_fields(
            Symbol::intern("Outer"),
            vec![Field::with_vtype(
                Symbol::intern("p"),
                TypeName::Ttype(Symbol::intern("Inner")),
            )],
        );
        let mut doc = Uxf::new(RootValue::Table(UxfTable::new(Symbol::intern("Outer"), 1)));
        doc.tclasses
            .insert(Symbol::intern("Outer"), TClassEntry::local(outer));
        doc.tclasses
            .insert(Symbol::intern("Inner"), TClassEntry::local(inner));

        let used = doc.used_ttypes();
        assert!(used.contains(&Symbol::intern("Outer")));
        assert!(used.contains(&Symbol::intern("Inner")));
    }

    #[test]
    fn get_tclass_looks_up_by_symbol() {
        let mut doc = Uxf::new(RootValue::List(UxfList::new()));
        let ttype = Symbol::intern("Point");
        let tclass = TClass::with_fields(ttype, vec![Field::new(Symbol::intern("x"))]);
        doc.tclasses.insert(ttype, TClassEntry::local(tclass));
        assert!(doc.get_tclass(ttype).is_some());
        assert!(doc.get_tclass(Symbol::intern("Missing")).is_none());
    }
}
