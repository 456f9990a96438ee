//! Canonical UXF text rendering (§4.5).
//!
//! Two passes share the same scalar/container vocabulary: `measure_*`
//! computes a container's fully single-line rendering purely to decide
//! whether it fits under `max_short_len`; `emit_*` is what actually lands
//! in the output, switching to one-item-per-line once the measured form
//! doesn't fit (or contains an embedded newline from a multi-line `str`).

use uxf_model::{RootValue, TClass, TClassOrigin, Uxf, UxfList, UxfMap, UxfTable, Value};

use crate::format::Format;

pub fn write_string(doc: &Uxf, format: &Format) -> String {
    let mut out = String::new();
    write_header(&mut out, doc);

    if let Some(comment) = &doc.comment {
        out.push('#');
        out.push('<');
        out.push_str(&escape_str(comment));
        out.push_str(">\n");
    }

    if !format.replace_imports {
        for source in &doc.imports {
            out.push('!');
            out.push_str(source);
            out.push('\n');
        }
    }

    let used = format.drop_unused.then(|| doc.used_ttypes());
    for (name, entry) in doc.tclasses.iter() {
        let would_write = format.replace_imports || entry.origin == TClassOrigin::Local;
        if !would_write {
            continue;
        }
        if let Some(used) = &used {
            if !used.contains(name) {
                continue;
            }
        }
        write_tclass(&mut out, &entry.tclass);
    }

    match &doc.value {
        RootValue::List(l) => emit_list(l, format, 0, &mut out),
        RootValue::Map(m) => emit_map(m, format, 0, &mut out),
        RootValue::Table(t) => emit_table(t, format, 0, &mut out),
    }
    out.push('\n');
    out
}

fn write_header(out: &mut String, doc: &Uxf) {
    out.push_str("uxf ");
    out.push_str(&format_real(doc.version, None));
    if let Some(custom) = &doc.custom {
        out.push(' ');
        out.push_str(custom);
    }
    out.push('\n');
}

fn write_tclass(out: &mut String, tclass: &TClass) {
    out.push('=');
    if let Some(comment) = &tclass.comment {
        out.push('#');
        out.push('<');
        out.push_str(&escape_str(comment));
        out.push_str("> ");
    }
    out.push_str(tclass.ttype.as_str());
    for field in &tclass.fields {
        out.push(' ');
        out.push_str(field.name.as_str());
        if let Some(vtype) = &field.vtype {
            out.push(':');
            out.push_str(&vtype.name());
        }
    }
    out.push('\n');
}

fn fits(flat: &str, format: &Format) -> bool {
    flat.len() <= format.max_short_len && !flat.contains('\n')
}

fn bool_str(b: bool, format: &Format) -> &'static str {
    match (format.use_true_false, b) {
        (true, true) => "true",
        (true, false) => "false",
        (false, true) => "yes",
        (false, false) => "no",
    }
}

/// `N.0` for an integral value when `realdp` is `None`, to preserve the
/// `real` type through round-trip (§4.5 "Real formatting").
fn format_real(r: f64, realdp: Option<u32>) -> String {
    match realdp {
        Some(dp) => format!("{:.*}", dp as usize, r),
        None if r.is_finite() && r.fract() == 0.0 => format!("{r:.1}"),
        None => format!("{r}"),
    }
}

/// `&`->`&amp;`, `<`->`&lt;`, `>`->`&gt;`; nothing else (§4.5 "String
/// escaping").
fn escape_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn hex_pairs(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02X}")).collect::<Vec<_>>().join(" ")
}

/// Space-separated uppercase hex pairs, wrapped at `wrap_width` onto
/// continuation lines indented to `level + 1` (§4.5 "wrapped at
/// wrap_width").
fn emit_bytes(bytes: &[u8], format: &Format, level: usize, out: &mut String) {
    out.push_str("(:");
    if bytes.is_empty() {
        out.push_str(":)");
        return;
    }
    let indent = format.indent.repeat(level + 1);
    let mut col = out.len() - out.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let mut first = true;
    for b in bytes {
        let pair = format!("{b:02X}");
        if !first && col + 1 + pair.len() > format.wrap_width {
            out.push('\n');
            out.push_str(&indent);
            col = indent.len();
        } else if !first {
            out.push(' ');
            col += 1;
        }
        out.push_str(&pair);
        col += pair.len();
        first = false;
    }
    out.push_str(":)");
}

fn scalar_repr(value: &Value, format: &Format) -> String {
    match value {
        Value::Null => "?".to_string(),
        Value::Bool(b) => bool_str(*b, format).to_string(),
        Value::Int(i) => i.to_string(),
        Value::Real(r) => format_real(*r, format.realdp),
        Value::Str(s) => format!("<{}>", escape_str(s)),
        Value::Bytes(b) => format!("(:{}:)", hex_pairs(b)),
        Value::Date(d) => d.to_uxf_string(),
        Value::DateTime(dt) => dt.to_uxf_string(),
        Value::List(_) | Value::Map(_) | Value::Table(_) => {
            unreachable!("containers are measured/emitted by their own functions")
        }
    }
}

fn measure_value(value: &Value, format: &Format) -> String {
    match value {
        Value::List(l) => measure_list(l, format),
        Value::Map(m) => measure_map(m, format),
        Value::Table(t) => measure_table(t, format),
        scalar => scalar_repr(scalar, format),
    }
}

fn emit_value(value: &Value, format: &Format, level: usize, out: &mut String) {
    match value {
        Value::Bytes(b) => emit_bytes(b, format, level, out),
        Value::List(l) => emit_list(l, format, level, out),
        Value::Map(m) => emit_map(m, format, level, out),
        Value::Table(t) => emit_table(t, format, level, out),
        scalar => out.push_str(&scalar_repr(scalar, format)),
    }
}

fn measure_list(list: &UxfList, format: &Format) -> String {
    let mut s = String::from("[");
    let mut need_space = false;
    if let Some(comment) = &list.comment {
        s.push_str(&format!("#<{}>", escape_str(comment)));
        need_space = true;
    }
    if let Some(vtype) = &list.vtype {
        if need_space {
            s.push(' ');
        }
        s.push_str(&vtype.name());
        need_space = true;
    }
    for item in list.iter() {
        if need_space {
            s.push(' ');
        }
        s.push_str(&measure_value(item, format));
        need_space = true;
    }
    s.push(']');
    s
}

fn emit_list(list: &UxfList, format: &Format, level: usize, out: &mut String) {
    let flat = measure_list(list, format);
    if fits(&flat, format) {
        out.push_str(&flat);
        return;
    }
    out.push('[');
    let mut header = String::new();
    if let Some(comment) = &list.comment {
        header.push_str(&format!("#<{}>", escape_str(comment)));
    }
    if let Some(vtype) = &list.vtype {
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(&vtype.name());
    }
    if !header.is_empty() {
        out.push(' ');
        out.push_str(&header);
    }
    let inner_indent = format.indent.repeat(level + 1);
    for item in list.iter() {
        out.push('\n');
        out.push_str(&inner_indent);
        emit_value(item, format, level + 1, out);
    }
    out.push('\n');
    out.push_str(&format.indent.repeat(level));
    out.push(']');
}

fn measure_map(map: &UxfMap, format: &Format) -> String {
    let mut s = String::from("{");
    let mut need_space = false;
    if let Some(comment) = &map.comment {
        s.push_str(&format!("#<{}>", escape_str(comment)));
        need_space = true;
    }
    if let Some(ktype) = map.ktype {
        if need_space {
            s.push(' ');
        }
        s.push_str(ktype.name());
        need_space = true;
    }
    if let Some(vtype) = &map.vtype {
        if need_space {
            s.push(' ');
        }
        s.push_str(&vtype.name());
        need_space = true;
    }
    for (key, value) in map.iter() {
        if need_space {
            s.push(' ');
        }
        s.push_str(&measure_value(&key.clone().into_value(), format));
        s.push(' ');
        s.push_str(&measure_value(value, format));
        need_space = true;
    }
    s.push('}');
    s
}

fn emit_map(map: &UxfMap, format: &Format, level: usize, out: &mut String) {
    let flat = measure_map(map, format);
    if fits(&flat, format) {
        out.push_str(&flat);
        return;
    }
    out.push('{');
    let mut header = String::new();
    if let Some(comment) = &map.comment {
        header.push_str(&format!("#<{}>", escape_str(comment)));
    }
    if let Some(ktype) = map.ktype {
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(ktype.name());
    }
    if let Some(vtype) = &map.vtype {
        if !header.is_empty() {
            header.push(' ');
        }
        header.push_str(&vtype.name());
    }
    if !header.is_empty() {
        out.push(' ');
        out.push_str(&header);
    }
    let inner_indent = format.indent.repeat(level + 1);
    for (key, value) in map.iter() {
        out.push('\n');
        out.push_str(&inner_indent);
        emit_value(&key.clone().into_value(), format, level + 1, out);
        out.push(' ');
        emit_value(value, format, level + 1, out);
    }
    out.push('\n');
    out.push_str(&format.indent.repeat(level));
    out.push('}');
}

fn measure_table(table: &UxfTable, format: &Format) -> String {
    let mut s = String::from("(");
    if let Some(comment) = &table.comment {
        s.push_str(&format!("#<{}> ", escape_str(comment)));
    }
    s.push_str(table.ttype.as_str());
    for row in table.rows() {
        for cell in row {
            s.push(' ');
            s.push_str(&measure_value(cell, format));
        }
    }
    s.push(')');
    s
}

fn emit_table(table: &UxfTable, format: &Format, level: usize, out: &mut String) {
    let flat = measure_table(table, format);
    if fits(&flat, format) {
        out.push_str(&flat);
        return;
    }
    out.push('(');
    if let Some(comment) = &table.comment {
        out.push_str(&format!("#<{}> ", escape_str(comment)));
    }
    out.push_str(table.ttype.as_str());
    let inner_indent = format.indent.repeat(level + 1);
    for row in table.rows() {
        out.push('\n');
        out.push_str(&inner_indent);
        let mut first = true;
        for cell in row {
            if !first {
                out.push(' ');
            }
            first = false;
            emit_value(cell, format, level + 1, out);
        }
    }
    out.push('\n');
    out.push_str(&format.indent.repeat(level));
    out.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxf_model::{Key, TClassEntry};
    use uxf_util::Symbol;

    #[test]
    fn writes_header_and_empty_list() {
        let doc = Uxf::new(RootValue::List(UxfList::new()));
        let out = write_string(&doc, &Format::default());
        assert_eq!(out, "uxf 1.0\n[]\n");
    }

    #[test]
    fn header_carries_custom_text() {
        let mut doc = Uxf::new(RootValue::List(UxfList::new()));
        doc.custom = Some("Price List".to_string());
        let out = write_string(&doc, &Format::default());
        assert!(out.starts_with("uxf 1.0 Price List\n"));
    }

    #[test]
    fn string_escaping_covers_amp_lt_gt() {
        let mut list = UxfList::new();
        list.push(Value::Str("A & B <tag>".to_string()));
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default());
        assert!(out.contains("A &amp; B &lt;tag&gt;"));
    }

    #[test]
    fn integral_real_renders_with_trailing_point_zero() {
        let mut list = UxfList::new();
        list.push(Value::Real(3.0));
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default());
        assert!(out.contains("3.0"));
    }

    #[test]
    fn booleans_default_to_yes_no() {
        let mut list = UxfList::new();
        list.push(Value::Bool(true));
        list.push(Value::Bool(false));
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default());
        assert!(out.contains("yes no"));
    }

    #[test]
    fn use_true_false_overrides_bool_rendering() {
        let mut list = UxfList::new();
        list.push(Value::Bool(true));
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default().with_use_true_false(true));
        assert!(out.contains("[true]"));
    }

    #[test]
    fn long_list_wraps_to_one_item_per_line() {
        let mut list = UxfList::new();
        for i in 0..20 {
            list.push(Value::Int(i));
        }
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default().with_max_short_len(8));
        assert!(out.contains("\n  0\n  1\n"));
    }

    #[test]
    fn ttype_definitions_precede_the_root_value() {
        let mut doc = Uxf::new(RootValue::Table(UxfTable::new(Symbol::intern("Pt"), 0)));
        doc.tclasses.insert(
            Symbol::intern("Pt"),
            TClassEntry::local(TClass::new(Symbol::intern("Pt"))),
        );
        let out = write_string(&doc, &Format::default());
        assert!(out.contains("=Pt\n"));
        assert!(out.find("=Pt").unwrap() < out.find("(Pt").unwrap());
    }

    #[test]
    fn imported_ttypes_are_not_written_unless_replacing_imports() {
        let mut doc = Uxf::new(RootValue::List(UxfList::new()));
        doc.tclasses.insert(
            Symbol::intern("Imported"),
            TClassEntry::imported(TClass::new(Symbol::intern("Imported"))),
        );
        let out = write_string(&doc, &Format::default());
        assert!(!out.contains("=Imported"));
        let out = write_string(&doc, &Format::default().with_replace_imports(true));
        assert!(out.contains("=Imported"));
    }

    #[test]
    fn bytes_wrap_at_wrap_width() {
        let mut list = UxfList::new();
        list.push(Value::Bytes(vec![0xAB; 40]));
        let doc = Uxf::new(RootValue::List(list));
        let out = write_string(&doc, &Format::default().with_wrap_width(20).with_max_short_len(0));
        assert!(out.contains('\n'));
        assert!(out.contains("AB"));
    }

    #[test]
    fn map_preserves_key_order_and_ktype_vtype_header() {
        let mut map = UxfMap::new();
        map.ktype = Some(uxf_model::KType::Str);
        map.insert(Key::Str("a".into()), Value::Int(1));
        map.insert(Key::Str("b".into()), Value::Int(2));
        let doc = Uxf::new(RootValue::Map(map));
        let out = write_string(&doc, &Format::default());
        assert!(out.contains("{str <a> 1 <b> 2}"));
    }
}
