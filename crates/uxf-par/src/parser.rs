//! Token stream -> [`Uxf`] tree (§4.2).
//!
//! A cursor-based recursive-descent parser (`peek`/`bump`/`expect`) but,
//! since UXF's grammar has no expression precedence to climb, there is
//! no Pratt loop - each grammar production gets one `parse_*` method
//! that consumes exactly that production and nothing else.

use indexmap::IndexMap;

use uxf_lex::{Lexer, SpannedToken, Token};
use uxf_model::{
    BuiltinType, Field, KType, RootValue, TClass, TClassEntry, TClassOrigin, TypeName, Uxf,
    UxfDate, UxfDateTime, UxfList, UxfMap, UxfTable, UtcOffset, Value, Key,
};
use uxf_sem::{ValidationMode, Validator};
use uxf_util::diagnostic::codes::*;
use uxf_util::diagnostic::DiagnosticCode;
use uxf_util::{FileId, Handler, Span, Symbol};

use crate::importer::Importer;

/// The highest `uxf` header version this parser natively understands
/// (§4.1 "Unknown versions greater than the supported `VERSION` yield a
/// warning, not an error").
pub const SUPPORTED_VERSION: f64 = 1.0;

/// Parse a complete UXF document from source text.
///
/// `importing_file` is the display name used for relative-import
/// resolution and diagnostics (`"-"` for in-memory text, §7). `importer`
/// is the optional seam into `uxf-import`'s resolver (§4.4); without one,
/// `IMPORT` directives are recorded on [`Uxf::imports`] but contribute no
/// ttypes.
///
/// Returns `None` if any fatal diagnostic was emitted; inspect `handler`
/// for the full diagnostic list either way.
pub fn parse(
    src: &str,
    handler: &Handler,
    mode: ValidationMode,
    importing_file: &str,
    importer: Option<&mut dyn Importer>,
) -> Option<Uxf> {
    let tokens = Lexer::new(src, FileId::DUMMY, handler).tokenize();
    if handler.has_fatal() {
        return None;
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        handler,
        validator: Validator::new(mode, handler),
        importing_file: importing_file.to_string(),
        importer,
    };
    let doc = parser.parse_document();
    if handler.has_fatal() {
        None
    } else {
        doc
    }
}

struct Parser<'a> {
    tokens: Vec<SpannedToken>,
    pos: usize,
    handler: &'a Handler,
    validator: Validator<'a>,
    importing_file: String,
    importer: Option<&'a mut dyn Importer>,
}

impl<'a> Parser<'a> {
    fn last_index(&self) -> usize {
        self.tokens.len() - 1
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.last_index())].token
    }

    fn peek_span(&self) -> Span {
        self.tokens[self.pos.min(self.last_index())].span
    }

    fn bump(&mut self) -> SpannedToken {
        let tok = self.tokens[self.pos.min(self.last_index())].clone();
        if self.pos < self.last_index() {
            self.pos += 1;
        }
        tok
    }

    fn fatal_error(&self, span: Span, code: DiagnosticCode, message: impl Into<String>) {
        let mut diag = self.handler.build_error(span, message).code(code).build();
        diag.fatal = true;
        self.handler.emit_diagnostic(diag);
    }

    fn error_unexpected(&self, expected: &str) {
        let label = self.peek().label();
        self.fatal_error(
            self.peek_span(),
            E_PARSE_UNEXPECTED_TOKEN,
            format!("expected {expected}, found {label}"),
        );
    }

    fn unterminated(&self, open_span: Span, what: &str) {
        self.fatal_error(open_span, E_PARSE_UNTERMINATED_CONTAINER, format!("unterminated {what}"));
    }

    fn bump_comment(&mut self) -> String {
        match self.bump().token {
            Token::Comment(s) => s,
            _ => unreachable!("caller already checked peek() is a Comment"),
        }
    }

    /// `IDENT`, erroring with `E-TYPE-RESERVED` if a reserved word sits in
    /// identifier position instead (Invariant I2, §7 "Reserved-word
    /// rejection").
    fn expect_ident_name(&mut self, context: &str) -> Option<Symbol> {
        match self.peek().clone() {
            Token::Ident(sym) => {
                self.bump();
                Some(sym)
            }
            Token::Typename(_) | Token::Bool(_) | Token::ReservedNullWord => {
                self.fatal_error(
                    self.peek_span(),
                    E_TYPE_RESERVED,
                    format!("reserved word cannot be used as {context}"),
                );
                None
            }
            _ => {
                self.error_unexpected(context);
                None
            }
        }
    }

    /// `VTYPE ::= KTYPE|bool|real|list|map|table|IDENT`.
    fn expect_vtype(&mut self) -> Option<TypeName> {
        match self.peek().clone() {
            Token::Typename(sym) => {
                self.bump();
                BuiltinType::from_name(sym.as_str()).map(TypeName::Builtin)
            }
            Token::Ident(sym) => {
                self.bump();
                Some(TypeName::Ttype(sym))
            }
            _ => {
                self.error_unexpected("a type name");
                None
            }
        }
    }

    fn at_bare_type_token(&self) -> bool {
        matches!(self.peek(), Token::Typename(_) | Token::Ident(_))
    }

    /// True when the current token could begin another `FIELD`: a plain
    /// identifier, or a reserved word sitting where one doesn't belong
    /// (in which case `parse_field` -> `expect_ident_name` rejects it
    /// with `E-TYPE-RESERVED` instead of the field list silently ending).
    fn at_field_start(&self) -> bool {
        matches!(
            self.peek(),
            Token::Ident(_) | Token::Typename(_) | Token::Bool(_) | Token::ReservedNullWord
        )
    }

    // ---- top-level structure (§4.2 "Top-level production") ----

    fn parse_document(&mut self) -> Option<Uxf> {
        let header = self.bump();
        let (version, custom) = match header.token {
            Token::Header { version, custom } => (version, custom),
            _ => unreachable!("the lexer always emits HEADER first"),
        };
        if version > SUPPORTED_VERSION {
            self.handler
                .build_warning(header.span, format!("uxf version {version} is newer than the supported {SUPPORTED_VERSION}"))
                .code(W_VERSION)
                .emit(self.handler);
        }

        let comment = if let Token::Comment(_) = self.peek() {
            Some(self.bump_comment())
        } else {
            None
        };

        let mut imports = Vec::new();
        let mut tclasses: IndexMap<Symbol, TClassEntry> = IndexMap::new();
        while let Token::ImportDirective(source) = self.peek().clone() {
            self.bump();
            self.resolve_import(&source, &mut tclasses);
            imports.push(source);
        }

        while matches!(self.peek(), Token::TtypeBegin) {
            self.parse_ttypedef(&mut tclasses)?;
        }

        let value = self.parse_root_value(&tclasses)?;

        Some(Uxf {
            version,
            custom,
            comment,
            imports,
            tclasses,
            value,
        })
    }

    fn resolve_import(&mut self, source: &str, tclasses: &mut IndexMap<Symbol, TClassEntry>) {
        let Some(importer) = self.importer.as_deref_mut() else {
            return;
        };
        let Some(resolved) = importer.resolve_import(source, &self.importing_file, self.handler) else {
            return;
        };
        for (name, tclass) in resolved {
            self.merge_imported_tclass(tclasses, name, tclass);
        }
    }

    /// Merge one imported ttype into the document's table (§4.4 "Name
    /// collisions across imports are conflicts unless the TClasses are
    /// structurally identical... silently coalesced").
    fn merge_imported_tclass(&self, tclasses: &mut IndexMap<Symbol, TClassEntry>, name: Symbol, tclass: TClass) {
        match tclasses.get(&name) {
            None => {
                tclasses.insert(name, TClassEntry::imported(tclass));
            }
            Some(existing) if existing.tclass.is_structurally_identical(&tclass) => {
                // Structurally identical: keep the first one, silently.
            }
            Some(_) => {
                self.fatal_error(
                    Span::DUMMY,
                    E_TYPE_CONFLICT,
                    format!("conflicting definitions for imported ttype '{}'", name.as_str()),
                );
            }
        }
    }

    /// `TTYPEDEF ::= '=' COMMENT? OWS IDENT (RWS FIELD)*`.
    fn parse_ttypedef(&mut self, tclasses: &mut IndexMap<Symbol, TClassEntry>) -> Option<()> {
        self.bump(); // '='
        let comment = if let Token::Comment(_) = self.peek() {
            Some(self.bump_comment())
        } else {
            None
        };
        let name_span = self.peek_span();
        let name = self.expect_ident_name("a ttype name")?;

        let mut fields = Vec::new();
        while self.at_field_start() {
            fields.push(self.parse_field()?);
        }

        let mut tclass = TClass::with_fields(name, fields);
        tclass.comment = comment;

        // A local ttypedef replaces a same-named imported one (§4.2
        // "Later redefinition"); two conflicting *local* definitions are
        // a hard error (Invariant I7).
        if let Some(existing) = tclasses.get(&name) {
            if existing.origin == TClassOrigin::Local && !existing.tclass.is_structurally_identical(&tclass) {
                self.fatal_error(
                    name_span,
                    E_PARSE_DUPLICATE_TTYPE,
                    format!("ttype '{}' is already defined with different fields", name.as_str()),
                );
                return Some(());
            }
        }
        tclasses.insert(name, TClassEntry::local(tclass));
        Some(())
    }

    fn parse_field(&mut self) -> Option<Field> {
        let name = self.expect_ident_name("a field name")?;
        let mut vtype = None;
        if matches!(self.peek(), Token::Colon) {
            self.bump();
            vtype = Some(self.expect_vtype()?);
        }
        Some(Field { name, vtype })
    }

    fn parse_root_value(&mut self, tclasses: &IndexMap<Symbol, TClassEntry>) -> Option<RootValue> {
        match self.peek() {
            Token::MapOpen => self.parse_map(tclasses).map(RootValue::Map),
            Token::ListOpen => self.parse_list(tclasses).map(RootValue::List),
            Token::TableOpen => self.parse_table(tclasses).map(RootValue::Table),
            _ => {
                self.fatal_error(self.peek_span(), E_PARSE_MISSING_VALUE, "expected a top-level list, map, or table");
                None
            }
        }
    }

    // ---- containers (§4.2 "Container parsing") ----

    fn parse_list(&mut self, tclasses: &IndexMap<Symbol, TClassEntry>) -> Option<UxfList> {
        let open_span = self.peek_span();
        self.bump(); // '['
        let mut list = UxfList::new();
        if let Token::Comment(_) = self.peek() {
            list.comment = Some(self.bump_comment());
        }
        if self.at_bare_type_token() {
            list.vtype = Some(self.expect_vtype()?);
        }
        loop {
            match self.peek() {
                Token::ListClose => {
                    self.bump();
                    break;
                }
                Token::Eof => {
                    self.unterminated(open_span, "list");
                    return None;
                }
                _ => {
                    let span = self.peek_span();
                    let value = self.parse_value(tclasses)?;
                    let value = self.validator.check_typed_slot(value, list.vtype.as_ref(), tclasses, span);
                    list.push(value);
                }
            }
        }
        Some(list)
    }

    fn parse_map(&mut self, tclasses: &IndexMap<Symbol, TClassEntry>) -> Option<UxfMap> {
        let open_span = self.peek_span();
        self.bump(); // '{'
        let mut map = UxfMap::new();
        if let Token::Comment(_) = self.peek() {
            map.comment = Some(self.bump_comment());
        }
        if let Token::Typename(sym) = self.peek().clone() {
            match KType::from_name(sym.as_str()) {
                Some(ktype) => {
                    self.bump();
                    map.ktype = Some(ktype);
                    if self.at_bare_type_token() {
                        map.vtype = Some(self.expect_vtype()?);
                    }
                }
                None => {
                    self.fatal_error(
                        self.peek_span(),
                        E_TYPE_UNKNOWN,
                        format!("'{}' is not a valid map ktype", sym.as_str()),
                    );
                    self.bump();
                }
            }
        }
        loop {
            match self.peek() {
                Token::MapClose => {
                    self.bump();
                    break;
                }
                Token::Eof => {
                    self.unterminated(open_span, "map");
                    return None;
                }
                _ => {
                    let key_span = self.peek_span();
                    let key = self.parse_key()?;
                    let key = self.validator.check_key(key, map.ktype, key_span);
                    if matches!(self.peek(), Token::MapClose | Token::Eof) {
                        self.fatal_error(self.peek_span(), E_PARSE_ODD_MAP_ITEMS, "map has an odd number of items");
                        return None;
                    }
                    let value_span = self.peek_span();
                    let value = self.parse_value(tclasses)?;
                    let value = self.validator.check_typed_slot(value, map.vtype.as_ref(), tclasses, value_span);
                    if map.contains_key(&key) {
                        self.handler
                            .build_warning(key_span, "duplicate map key; last value wins")
                            .code(W_DUPLICATE_KEY)
                            .emit(self.handler);
                    }
                    map.insert(key, value);
                }
            }
        }
        Some(map)
    }

    fn parse_table(&mut self, tclasses: &IndexMap<Symbol, TClassEntry>) -> Option<UxfTable> {
        let open_span = self.peek_span();
        self.bump(); // '('
        let comment = if let Token::Comment(_) = self.peek() {
            Some(self.bump_comment())
        } else {
            None
        };
        let ttype_span = self.peek_span();
        let ttype_name = self.expect_ident_name("a ttype name")?;
        let Some(entry) = tclasses.get(&ttype_name) else {
            self.fatal_error(ttype_span, E_PARSE_UNKNOWN_TTYPE, format!("unknown ttype '{}'", ttype_name.as_str()));
            return None;
        };
        let tclass = entry.tclass.clone();
        let ncols = tclass.fields.len();

        let mut cells = Vec::new();
        loop {
            match self.peek() {
                Token::TableClose => {
                    self.bump();
                    break;
                }
                Token::Eof => {
                    self.unterminated(open_span, "table");
                    return None;
                }
                _ => {
                    let span = self.peek_span();
                    let value = self.parse_value(tclasses)?;
                    cells.push((value, span));
                }
            }
        }

        if ncols == 0 {
            if !cells.is_empty() {
                self.fatal_error(open_span, E_PARSE_TABLE_LEN, "fieldless table accepts no values");
                return None;
            }
            let mut table = UxfTable::new(ttype_name, 0);
            table.comment = comment;
            return Some(table);
        }

        if cells.len() % ncols != 0 {
            self.fatal_error(
                open_span,
                E_PARSE_TABLE_LEN,
                format!("table has {} values, not a multiple of {ncols} fields", cells.len()),
            );
            return None;
        }

        let mut table = UxfTable::new(ttype_name, ncols);
        table.comment = comment;
        let mut cells = cells.into_iter();
        'rows: loop {
            let mut row = Vec::with_capacity(ncols);
            for col in 0..ncols {
                match cells.next() {
                    Some((value, span)) => {
                        let field = &tclass.fields[col];
                        row.push(self.validator.check_typed_slot(value, field.vtype.as_ref(), tclasses, span));
                    }
                    None => break 'rows,
                }
            }
            table.push_row(row).expect("row length matches ncols by construction");
        }
        Some(table)
    }

    // ---- scalars (§6 grammar `VALUE`, `KEY`) ----

    fn parse_value(&mut self, tclasses: &IndexMap<Symbol, TClassEntry>) -> Option<Value> {
        match self.peek().clone() {
            Token::Null => {
                self.bump();
                Some(Value::Null)
            }
            Token::Bool(b) => {
                self.bump();
                Some(Value::Bool(b))
            }
            Token::Int(i) => {
                self.bump();
                Some(Value::Int(i))
            }
            Token::Real(r) => {
                self.bump();
                Some(Value::Real(r))
            }
            Token::Str(s) => {
                self.bump();
                Some(Value::Str(s))
            }
            Token::Bytes(b) => {
                self.bump();
                Some(Value::Bytes(b))
            }
            Token::Date { year, month, day } => self.parse_date_value(year, month, day),
            Token::DateTime { .. } => self.parse_datetime_value(),
            Token::ListOpen => self.parse_list(tclasses).map(Value::from),
            Token::MapOpen => self.parse_map(tclasses).map(Value::from),
            Token::TableOpen => self.parse_table(tclasses).map(Value::from),
            _ => {
                self.error_unexpected("a value");
                None
            }
        }
    }

    fn parse_key(&mut self) -> Option<Key> {
        match self.peek().clone() {
            Token::Int(i) => {
                self.bump();
                Some(Key::Int(i))
            }
            Token::Str(s) => {
                self.bump();
                Some(Key::Str(s))
            }
            Token::Bytes(b) => {
                self.bump();
                Some(Key::Bytes(b))
            }
            Token::Date { year, month, day } => match self.parse_date_value(year, month, day)? {
                Value::Date(d) => Some(Key::Date(d)),
                _ => None,
            },
            Token::DateTime { .. } => match self.parse_datetime_value()? {
                Value::DateTime(dt) => Some(Key::DateTime(dt)),
                _ => None,
            },
            _ => {
                self.error_unexpected("a map key");
                None
            }
        }
    }

    fn parse_date_value(&mut self, year: i32, month: u32, day: u32) -> Option<Value> {
        let span = self.peek_span();
        self.bump();
        match UxfDate::from_ymd(year, month, day) {
            Ok(date) => Some(Value::Date(date)),
            Err(err) => {
                self.fatal_error(span, E_TYPE_RANGE, err.to_string());
                None
            }
        }
    }

    fn parse_datetime_value(&mut self) -> Option<Value> {
        let span = self.peek_span();
        let tok = self.bump();
        let Token::DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes,
        } = tok.token
        else {
            unreachable!("caller already matched Token::DateTime");
        };
        let offset = match offset_minutes {
            None => None,
            Some(m) => match UtcOffset::from_minutes(m) {
                Ok(o) => Some(o),
                Err(err) => {
                    self.fatal_error(span, E_TYPE_RANGE, err.to_string());
                    return None;
                }
            },
        };
        match UxfDateTime::new(year, month, day, hour, minute, second, offset) {
            Ok(dt) => Some(Value::DateTime(dt)),
            Err(err) => {
                self.fatal_error(span, E_TYPE_RANGE, err.to_string());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uxf_util::Handler;

    fn parse_ok(src: &str) -> Uxf {
        let handler = Handler::new("-");
        let doc = parse(src, &handler, ValidationMode::Strict, "-", None);
        assert!(!handler.has_errors(), "unexpected errors: {:?}", handler.diagnostics());
        doc.expect("expected a parsed document")
    }

    fn parse_err(src: &str) -> Handler {
        let handler = Handler::new("-");
        let doc = parse(src, &handler, ValidationMode::Strict, "-", None);
        assert!(doc.is_none() || handler.has_errors());
        handler
    }

    #[test]
    fn minimal_empty_list() {
        let doc = parse_ok("uxf 1.0\n[]\n");
        assert_eq!(doc.version, 1.0);
        assert!(doc.custom.is_none());
        match doc.value {
            RootValue::List(l) => assert!(l.is_empty()),
            _ => panic!("expected list"),
        }
    }

    #[test]
    fn typed_price_list_table() {
        let src = "uxf 1.0 Price List\n=PriceList Date:date Price:real Quantity:int ID:str Description:str\n(PriceList 2022-09-21 3.99 2 <CH1-A2> <Chisels (pair), 1in &amp; 1\u{00bc}in>)\n";
        let doc = parse_ok(src);
        assert_eq!(doc.custom.as_deref(), Some("Price List"));
        match doc.value {
            RootValue::Table(t) => {
                assert_eq!(t.nrows(), 1);
                assert_eq!(t.get(0, 1), Some(&Value::Real(3.99)));
                assert_eq!(t.get(0, 4), Some(&Value::Str("Chisels (pair), 1in & 1\u{00bc}in".to_string())));
            }
            _ => panic!("expected table"),
        }
    }

    #[test]
    fn null_assignable_to_typed_slot() {
        let src = "uxf 1.0\n=Cust CID:int Addr:str\n(Cust 19 ?)\n";
        let doc = parse_ok(src);
        match doc.value {
            RootValue::Table(t) => assert_eq!(t.get(0, 1), Some(&Value::Null)),
            _ => panic!("expected table"),
        }
    }

    #[test]
    fn invalid_type_coercion_is_an_error_in_strict_mode() {
        let src = "uxf 1.0\n=T x:int\n(T 3.14)\n";
        let handler = parse_err(src);
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(E_TYPE_MISMATCH)));
    }

    #[test]
    fn table_record_length_must_be_a_multiple_of_field_count() {
        let src = "uxf 1.0\n=Pair a b\n(Pair 1 2 3)\n";
        let handler = parse_err(src);
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(E_PARSE_TABLE_LEN)));
    }

    #[test]
    fn reserved_word_rejected_as_ttype_name() {
        let handler = parse_err("uxf 1.0\n=int x\n[]\n");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(E_TYPE_RESERVED)));
    }

    #[test]
    fn null_rejected_as_ttype_name() {
        let handler = parse_err("uxf 1.0\n=null x\n[]\n");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(E_TYPE_RESERVED)));
    }

    #[test]
    fn null_rejected_as_field_name() {
        let handler = parse_err("uxf 1.0\n=Outer null:int\n[]\n");
        assert!(handler.diagnostics().iter().any(|d| d.code == Some(E_TYPE_RESERVED)));
    }

    #[test]
    fn map_preserves_insertion_order() {
        let doc = parse_ok("uxf 1.0\n{<b> 2 <a> 1 <c> 3}\n");
        match doc.value {
            RootValue::Map(m) => {
                let keys: Vec<_> = m.keys().cloned().collect();
                assert_eq!(
                    keys,
                    vec![Key::Str("b".into()), Key::Str("a".into()), Key::Str("c".into())]
                );
            }
            _ => panic!("expected map"),
        }
    }

    #[test]
    fn fieldless_table_accepts_zero_values() {
        let doc = parse_ok("uxf 1.0\n=Suit\n(Suit)\n");
        match doc.value {
            RootValue::Table(t) => assert_eq!(t.ncols(), 0),
            _ => panic!("expected table"),
        }
    }

    #[test]
    fn typed_list_vtype_is_enforced() {
        let handler = parse_err("uxf 1.0\n[int 1 2 <bad>]\n");
        assert!(handler.has_errors());
    }

    #[test]
    fn fix_types_mode_truncates_real_into_int() {
        let handler = Handler::new("-");
        let doc = parse("uxf 1.0\n=T x:int\n(T 3.0)\n", &handler, ValidationMode::FixTypes, "-", None)
            .expect("expected a parsed document");
        match doc.value {
            RootValue::Table(t) => assert_eq!(t.get(0, 0), Some(&Value::Int(3))),
            _ => panic!("expected table"),
        }
        assert!(!handler.has_errors());
    }
}
