//! Basic fragment builders.
//!
//! - [`Sql`] composes text piece by piece and writes a `?` marker for every
//!   bound value, so markers and arguments can't drift apart.
//! - [`Expr`] wraps a complete SQL string that already contains its `?`
//!   markers, and only records the values.
//!
//! # Example
//!
//! ```ignore
//! use sqlfrag::{sql, expr};
//!
//! let mut q = sql("SELECT id, parent_id FROM nodes WHERE 1=1");
//! if let Some(kind) = kind {
//!     q.push(" AND kind = ").push_bind(kind);
//! }
//!
//! let roots = expr("SELECT id FROM nodes WHERE parent_id IS NULL AND org = ?").bind(org_id);
//! ```

mod builder;
mod expr;


pub use builder::Sql;
pub use expr::Expr;

/// The positional marker every fragment in this crate emits.
pub const PLACEHOLDER: &str = "?";

/// Start building a SQL fragment.
pub fn sql(initial_sql: impl Into<String>) -> Sql {
    Sql::new(initial_sql)
}

/// Wrap a SQL string that already contains `?` markers.
pub fn expr(sql: impl Into<String>) -> Expr {
    Expr::new(sql)
}

/// Count `?` markers outside of quoted strings, dollar-quoted strings, quoted
/// identifiers and comments.
pub(crate) fn count_placeholders(sql: &str) -> usize {
    let bytes = sql.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'?' => count += 1,
            quote @ (b'\'' | b'"') => {
                i += 1;
                while i < bytes.len() {
                    if bytes[i] == quote {
                        // Doubled quote is an escape, not the end of the literal.
                        if bytes.get(i + 1) == Some(&quote) {
                            i += 1;
                        } else {
                            break;
                        }
                    }
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i += 2;
                while i < bytes.len() && !(bytes[i] == b'*' && bytes.get(i + 1) == Some(&b'/')) {
                    i += 1;
                }
                i += 1;
            }
            b'$' if !follows_ident_char(bytes, i) => {
                if let Some(tag_len) = dollar_tag_len(&bytes[i..]) {
                    let tag = &sql[i..i + tag_len];
                    let body = i + tag_len;
                    // Land on the last byte of the closing tag, or run off the end if unclosed.
                    i = match sql[body..].find(tag) {
                        Some(end) => body + end + tag_len - 1,
                        None => bytes.len(),
                    };
                }
            }
            _ => {}
        }
        i += 1;
    }
    count
}

fn follows_ident_char(bytes: &[u8], i: usize) -> bool {
    i > 0 && matches!(bytes[i - 1], b'_' | b'$' | b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z')
}

/// Length of a `$tag$` opener at the start of `s`, if there is one.
///
/// `$1` style parameters are not tags: a tag is empty or starts with a letter or `_`.
fn dollar_tag_len(s: &[u8]) -> Option<usize> {
    let mut j = 1;
    if let Some(&c) = s.get(j) {
        if c == b'_' || c.is_ascii_alphabetic() {
            j += 1;
            while s.get(j).is_some_and(|&c| c == b'_' || c.is_ascii_alphanumeric()) {
                j += 1;
            }
        }
    }
    (s.get(j) == Some(&b'$')).then_some(j + 1)
}
