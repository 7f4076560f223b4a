//! Checked SQL identifiers.
//!
//! Fragment renderers emit aliases and column names verbatim. [`Ident`] is the
//! opt-in gate for callers that take those names from untrusted input: parse
//! first, then hand the validated text to [`Cte::checked`](crate::Cte::checked)
//! or [`Sql::push_ident`](crate::Sql::push_ident).
//!
//! - Unquoted segments: `[A-Za-z_][A-Za-z0-9_$]*`
//! - Quoted segments: any characters except NUL, `"` escaped as `""`
//! - Segments are joined by `.` (`schema.table`, `public."Users"`)

use crate::error::{SqlError, SqlResult};
use std::iter::Peekable;
use std::str::Chars;

/// One `.`-separated segment of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A validated SQL identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Create a single quoted segment.
    pub fn quoted(name: &str) -> SqlResult<Self> {
        if name.is_empty() {
            return Err(SqlError::validation("Empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(SqlError::validation(
                "Identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse dotted, quoted or mixed identifiers (`public."UserTable".id`).
    pub fn parse(s: &str) -> SqlResult<Self> {
        if s.is_empty() {
            return Err(SqlError::validation("Identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(SqlError::validation(
                "Identifier cannot contain NUL character",
            ));
        }

        let mut chars = s.chars().peekable();
        let mut parts = vec![parse_segment(&mut chars)?];

        while let Some(c) = chars.next() {
            if c != '.' {
                return Err(SqlError::validation(format!(
                    "Expected '.' between identifier parts, got '{c}'"
                )));
            }
            if chars.peek().is_none() {
                return Err(SqlError::validation("Trailing '.' in identifier"));
            }
            parts.push(parse_segment(&mut chars)?);
        }

        Ok(Self { parts })
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => {
                    out.push('"');
                    out.push_str(&s.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}

fn parse_segment(chars: &mut Peekable<Chars<'_>>) -> SqlResult<IdentPart> {
    if chars.peek() == Some(&'"') {
        chars.next();
        return parse_quoted(chars);
    }
    parse_unquoted(chars)
}

fn parse_quoted(chars: &mut Peekable<Chars<'_>>) -> SqlResult<IdentPart> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('"') if chars.peek() == Some(&'"') => {
                chars.next();
                name.push('"');
            }
            Some('"') => break,
            Some(c) => name.push(c),
            None => return Err(SqlError::validation("Unclosed quoted identifier")),
        }
    }
    if name.is_empty() {
        return Err(SqlError::validation("Empty quoted identifier"));
    }
    Ok(IdentPart::Quoted(name))
}

fn parse_unquoted(chars: &mut Peekable<Chars<'_>>) -> SqlResult<IdentPart> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' {
            break;
        }
        let ok = if name.is_empty() {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c == '$' || c.is_ascii_alphanumeric()
        };
        if !ok {
            return Err(SqlError::validation(format!(
                "Invalid character in identifier: '{c}'"
            )));
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        return Err(SqlError::validation("Empty identifier segment"));
    }
    Ok(IdentPart::Unquoted(name))
}

/// Convert an input into an [`Ident`].
pub trait IntoIdent {
    fn into_ident(self) -> SqlResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> SqlResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> SqlResult<Ident> {
        Ident::parse(&self)
    }
}
