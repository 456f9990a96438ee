//! Scans UXF source text into a [`Token`] stream (§4.1).
//!
//! `Lexer<'source>` is a cursor over the input plus a `Handler`
//! reference for reporting, rather than raising exceptions mid-scan.

use crate::token::{SpannedToken, Token};
use uxf_util::diagnostic::codes::*;
use uxf_util::{FileId, Handler, Span, Symbol};

/// Built-in vtype/ktype names (grammar `VTYPE`, `KTYPE`); kept local to
/// avoid a dependency on `uxf-model` purely for this lookup.
const BUILTIN_TYPENAMES: &[&str] = &[
    "bool", "int", "real", "date", "datetime", "str", "bytes", "list", "map", "table",
];

pub struct Lexer<'a> {
    chars: Vec<(usize, char)>,
    src_len: usize,
    pos: usize,
    line: u32,
    file_id: FileId,
    handler: &'a Handler,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &str, file_id: FileId, handler: &'a Handler) -> Self {
        Self {
            chars: src.char_indices().collect(),
            src_len: src.len(),
            pos: 0,
            line: 1,
            file_id,
            handler,
        }
    }

    /// Scan the header, every token that follows, and the trailing `Eof`.
    pub fn tokenize(mut self) -> Vec<SpannedToken> {
        let mut tokens = vec![self.scan_header()];
        loop {
            let tok = self.next_token();
            let is_eof = tok.token.is_eof();
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|(_, c)| *c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|(_, c)| *c)
    }

    fn byte_offset(&self) -> usize {
        self.chars.get(self.pos).map(|(i, _)| *i).unwrap_or(self.src_len)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn span_from(&self, start: usize, start_line: u32) -> Span {
        Span::with_file(start, self.byte_offset(), self.file_id, start_line, 1)
    }

    fn error(&self, line: u32, code: uxf_util::diagnostic::codes::DiagnosticCode, message: impl Into<String>) {
        self.handler
            .build_error(Span::at_line(line), message)
            .code(code)
            .emit(self.handler);
    }

    /// Skip runs of whitespace, including newlines (`OWS`/`RWS` in the
    /// grammar are whitespace-only; comments are not whitespace).
    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    /// `uxf <real> [custom text]\n` (§4.1). Must be called exactly once,
    /// before any other token is requested.
    pub fn scan_header(&mut self) -> SpannedToken {
        let start = self.byte_offset();
        let start_line = self.line;
        for expected in ['u', 'x', 'f'] {
            if self.peek() != Some(expected) {
                self.error(start_line, E_LEX_BAD_HEADER, "expected 'uxf' header");
                return SpannedToken::new(
                    Token::Header {
                        version: 1.0,
                        custom: None,
                    },
                    self.span_from(start, start_line),
                );
            }
            self.advance();
        }
        if !matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.error(start_line, E_LEX_BAD_HEADER, "expected whitespace after 'uxf'");
        }
        self.skip_ws();

        let mut digits = String::new();
        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            digits.push(self.advance().unwrap());
        }
        let version: f64 = digits.parse().unwrap_or_else(|_| {
            self.error(start_line, E_LEX_BAD_HEADER, "expected a version number");
            1.0
        });

        let mut custom = None;
        while matches!(self.peek(), Some(c) if c == ' ' || c == '\t') {
            self.advance();
        }
        if !matches!(self.peek(), Some('\n') | None) {
            let mut text = String::new();
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                text.push(c);
                self.advance();
            }
            if !text.is_empty() {
                custom = Some(text);
            }
        }
        if self.peek() == Some('\n') {
            self.advance();
        } else if self.peek().is_some() {
            self.error(start_line, E_LEX_BAD_HEADER, "expected newline after header");
        }

        SpannedToken::new(Token::Header { version, custom }, self.span_from(start, start_line))
    }

    pub fn next_token(&mut self) -> SpannedToken {
        loop {
            self.skip_ws();
            let start = self.byte_offset();
            let start_line = self.line;
            let Some(c) = self.peek() else {
                return SpannedToken::new(Token::Eof, self.span_from(start, start_line));
            };

            let token = match c {
                '#' => self.scan_comment(),
                '!' => self.scan_import(),
                '=' => {
                    self.advance();
                    Some(Token::TtypeBegin)
                }
                '{' => {
                    self.advance();
                    Some(Token::MapOpen)
                }
                '}' => {
                    self.advance();
                    Some(Token::MapClose)
                }
                '[' => {
                    self.advance();
                    Some(Token::ListOpen)
                }
                ']' => {
                    self.advance();
                    Some(Token::ListClose)
                }
                '(' if self.peek_at(1) == Some(':') => self.scan_bytes(),
                '(' => {
                    self.advance();
                    Some(Token::TableOpen)
                }
                ')' => {
                    self.advance();
                    Some(Token::TableClose)
                }
                ':' => {
                    self.advance();
                    Some(Token::Colon)
                }
                '?' => {
                    self.advance();
                    Some(Token::Null)
                }
                '<' => self.scan_string(),
                '0'..='9' => Some(self.scan_number_or_date()),
                '+' | '-' => Some(self.scan_signed_number()),
                c if c.is_alphabetic() || c == '_' => Some(self.scan_word()),
                other => {
                    self.error(
                        start_line,
                        E_LEX_UNEXPECTED_CHAR,
                        format!("unexpected character '{other}'"),
                    );
                    self.advance();
                    None
                }
            };

            if let Some(token) = token {
                return SpannedToken::new(token, self.span_from(start, start_line));
            }
            // Single-character resync (e.g. after an unexpected char):
            // loop back around and try again (§4.1 "continues scanning
            // after single-character resyncs when possible").
        }
    }

    /// `#<...>` comment, immediately following `{`, `[`, `(`, or `=`.
    fn scan_comment(&mut self) -> Option<Token> {
        self.advance(); // '#'
        if self.peek() != Some('<') {
            self.error(self.line, E_LEX_UNEXPECTED_CHAR, "expected '<' to start a comment");
            return None;
        }
        self.scan_delimited_text().map(Token::Comment)
    }

    fn scan_string(&mut self) -> Option<Token> {
        self.scan_delimited_text().map(Token::Str)
    }

    /// Consume a `<...>` run with `&amp;`/`&lt;`/`&gt;` entity decoding
    /// (§9 "String escape table"); used for both STR and COMMENT.
    fn scan_delimited_text(&mut self) -> Option<String> {
        let start_line = self.line;
        self.advance(); // '<'
        let mut text = String::new();
        loop {
            match self.peek() {
                None => {
                    self.error(start_line, E_LEX_UNTERMINATED_STRING, "unterminated string");
                    return Some(text);
                }
                Some('>') => {
                    self.advance();
                    return Some(text);
                }
                Some('<') => {
                    self.error(self.line, E_LEX_RAW_RESERVED_CHAR, "raw '<' inside string");
                    self.advance();
                }
                Some('&') => {
                    if self.consume_literal("&amp;") {
                        text.push('&');
                    } else if self.consume_literal("&lt;") {
                        text.push('<');
                    } else if self.consume_literal("&gt;") {
                        text.push('>');
                    } else {
                        self.error(self.line, E_LEX_BAD_ENTITY, "unrecognized entity");
                        self.advance();
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
    }

    fn consume_literal(&mut self, literal: &str) -> bool {
        for (i, expected) in literal.chars().enumerate() {
            if self.peek_at(i) != Some(expected) {
                return false;
            }
        }
        for _ in 0..literal.chars().count() {
            self.advance();
        }
        true
    }

    fn scan_import(&mut self) -> Option<Token> {
        self.advance(); // '!'
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            text.push(c);
            self.advance();
        }
        Some(Token::ImportDirective(text.trim().to_string()))
    }

    /// `(:HHHH...:)`, whitespace allowed between hex pairs.
    fn scan_bytes(&mut self) -> Option<Token> {
        let start_line = self.line;
        self.advance(); // '('
        self.advance(); // ':'
        let mut hex_digits = Vec::new();
        loop {
            self.skip_ws();
            match (self.peek(), self.peek_at(1)) {
                (Some(':'), Some(')')) => {
                    self.advance();
                    self.advance();
                    break;
                }
                (Some(a), Some(b)) if a.is_ascii_hexdigit() && b.is_ascii_hexdigit() => {
                    hex_digits.push(a);
                    hex_digits.push(b);
                    self.advance();
                    self.advance();
                }
                (None, _) => {
                    self.error(start_line, E_LEX_UNTERMINATED_BYTES, "unterminated bytes literal");
                    break;
                }
                _ => {
                    self.error(self.line, E_LEX_BAD_BYTE_PAIR, "expected a hex byte pair");
                    self.advance();
                }
            }
        }
        if hex_digits.len() % 2 != 0 {
            self.error(start_line, E_LEX_BAD_BYTE_PAIR, "odd number of hex digits in bytes literal");
            hex_digits.pop();
        }
        let bytes = hex_digits
            .chunks(2)
            .map(|pair| {
                let s: String = pair.iter().collect();
                u8::from_str_radix(&s, 16).unwrap_or(0)
            })
            .collect();
        Some(Token::Bytes(bytes))
    }

    fn looks_like_date(&self) -> bool {
        let digit_at = |offset: usize| self.peek_at(offset).map(|c| c.is_ascii_digit()).unwrap_or(false);
        (0..4).all(|i| digit_at(i))
            && self.peek_at(4) == Some('-')
            && digit_at(5)
            && digit_at(6)
            && self.peek_at(7) == Some('-')
            && digit_at(8)
            && digit_at(9)
    }

    fn take_digits(&mut self, n: usize) -> Option<u32> {
        let mut s = String::new();
        for _ in 0..n {
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    s.push(c);
                    self.advance();
                }
                _ => return None,
            }
        }
        s.parse().ok()
    }

    fn scan_number_or_date(&mut self) -> Token {
        if self.looks_like_date() {
            return self.scan_date_or_datetime();
        }
        self.scan_unsigned_number()
    }

    fn scan_signed_number(&mut self) -> Token {
        let start_line = self.line;
        let mut text = String::new();
        text.push(self.advance().unwrap()); // sign
        if !matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.error(start_line, E_LEX_INVALID_NUMBER, "expected digits after sign");
            return Token::Int(0);
        }
        let (rest, is_real) = self.scan_digits_real_tail();
        text.push_str(&rest);
        if is_real {
            Token::Real(text.parse().unwrap_or(0.0))
        } else {
            Token::Int(text.parse().unwrap_or(0))
        }
    }

    fn scan_unsigned_number(&mut self) -> Token {
        let (text, is_real) = self.scan_digits_real_tail();
        if is_real {
            Token::Real(text.parse().unwrap_or(0.0))
        } else {
            Token::Int(text.parse().unwrap_or(0))
        }
    }

    /// Consume an unsigned digit run plus an optional `.digits` and/or
    /// exponent, returning the text and whether it makes the token a REAL.
    fn scan_digits_real_tail(&mut self) -> (String, bool) {
        let mut text = String::new();
        let mut is_real = false;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            text.push(self.advance().unwrap());
        }
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            is_real = true;
            text.push(self.advance().unwrap());
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                text.push(self.advance().unwrap());
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let mut exp = String::new();
            exp.push(self.peek().unwrap());
            let sign_offset = if matches!(self.peek_at(1), Some('+') | Some('-')) { 2 } else { 1 };
            if matches!(self.peek_at(sign_offset), Some(c) if c.is_ascii_digit()) {
                is_real = true;
                self.advance();
                if sign_offset == 2 {
                    exp.push(self.advance().unwrap());
                }
                while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    exp.push(self.advance().unwrap());
                }
                text.push_str(&exp);
            }
        }
        (text, is_real)
    }

    fn scan_date_or_datetime(&mut self) -> Token {
        let start_line = self.line;
        let year = self.take_digits(4).unwrap_or(1) as i32;
        self.advance(); // '-'
        let month = self.take_digits(2).unwrap_or(1);
        self.advance(); // '-'
        let day = self.take_digits(2).unwrap_or(1);

        if self.peek() != Some('T') {
            return Token::Date { year, month, day };
        }
        self.advance(); // 'T'
        let hour = self.take_digits(2).unwrap_or(0);
        if self.peek() != Some(':') {
            self.error(start_line, E_LEX_INVALID_NUMBER, "expected ':' in datetime");
            return Token::DateTime {
                year,
                month,
                day,
                hour,
                minute: 0,
                second: 0,
                offset_minutes: None,
            };
        }
        self.advance();
        let minute = self.take_digits(2).unwrap_or(0);
        let mut second = 0;
        if self.peek() == Some(':') {
            self.advance();
            second = self.take_digits(2).unwrap_or(0);
        }
        let offset_minutes = self.scan_offset_suffix();
        Token::DateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
            offset_minutes,
        }
    }

    /// `Z | ±HH(:?MM)?`, retained as signed minutes (§4.2).
    fn scan_offset_suffix(&mut self) -> Option<i32> {
        match self.peek() {
            Some('Z') => {
                self.advance();
                Some(0)
            }
            Some(sign @ ('+' | '-')) => {
                self.advance();
                let hh = self.take_digits(2)? as i32;
                let had_colon = self.peek() == Some(':');
                if had_colon {
                    self.advance();
                }
                let mm = if matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                    self.take_digits(2).unwrap_or(0) as i32
                } else {
                    0
                };
                let total = hh * 60 + mm;
                Some(if sign == '-' { -total } else { total })
            }
            _ => None,
        }
    }

    fn scan_word(&mut self) -> Token {
        let mut text = String::new();
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            text.push(self.advance().unwrap());
        }
        match text.as_str() {
            "yes" | "true" => Token::Bool(true),
            "no" | "false" => Token::Bool(false),
            "null" => Token::ReservedNullWord,
            _ if BUILTIN_TYPENAMES.contains(&text.as_str()) => Token::Typename(Symbol::intern(&text)),
            _ => {
                if text.chars().count() > 60 {
                    self.error(self.line, E_LEX_INVALID_IDENT, format!("invalid identifier '{text}'"));
                }
                Token::Ident(Symbol::intern(&text))
            }
        }
    }
}
