//! Common table expressions.
//!
//! A [`Cte`] wraps exactly one body fragment and renders the part of a `WITH`
//! clause that names it:
//!
//! ```text
//! [RECURSIVE ]<alias>[(<col1>, <col2>, ...)] AS (<body>)
//! ```
//!
//! The wrapper binds no arguments of its own. The body's arguments are handed
//! back untouched and in order, so placeholder positions stay correct however
//! deeply fragments are nested.
//!
//! # Example
//! ```ignore
//! use sqlfrag::{Cte, expr};
//!
//! let tree = Cte::new(
//!     "tree",
//!     expr("SELECT id, parent_id FROM nodes WHERE id = ?").bind(1_i64),
//! )
//! .columns(["id", "parent_id"])
//! .recursive(true);
//!
//! let rendered = tree.render()?;
//! assert_eq!(
//!     rendered.sql,
//!     "RECURSIVE tree(id, parent_id) AS (SELECT id, parent_id FROM nodes WHERE id = ?)"
//! );
//! ```

use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Rendered};
use crate::ident::IntoIdent;

/// One named, optionally column-listed, optionally recursive CTE.
///
/// Alias and column names are emitted verbatim; quoting them is the caller's
/// job (see [`Cte::checked`] for a validating constructor).
#[must_use]
pub struct Cte {
    alias: String,
    columns: Vec<String>,
    recursive: bool,
    body: Option<Box<dyn Fragment>>,
}

impl Cte {
    /// Create a non-recursive CTE without a column list.
    pub fn new(alias: impl Into<String>, body: impl Fragment + 'static) -> Self {
        Self {
            alias: alias.into(),
            columns: Vec::new(),
            recursive: false,
            body: Some(Box::new(body)),
        }
    }

    /// Create a CTE whose body is supplied later via [`Cte::body`].
    ///
    /// Rendering before a body is set fails with [`SqlError::MissingBody`].
    pub fn named(alias: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            columns: Vec::new(),
            recursive: false,
            body: None,
        }
    }

    /// Create a CTE after validating the alias and every column name.
    ///
    /// Names are normalized through [`crate::Ident`], so quoted input is
    /// re-escaped on output.
    ///
    /// ```ignore
    /// let cte = Cte::checked("monthly_sales", ["month", "total"], body)?;
    /// assert!(Cte::checked("bad name!", Vec::<&str>::new(), body).is_err());
    /// ```
    pub fn checked(
        alias: impl IntoIdent,
        columns: impl IntoIterator<Item = impl IntoIdent>,
        body: impl Fragment + 'static,
    ) -> SqlResult<Self> {
        let alias = alias.into_ident()?.to_sql();
        let columns = columns
            .into_iter()
            .map(|c| c.into_ident().map(|ident| ident.to_sql()))
            .collect::<SqlResult<Vec<_>>>()?;
        Ok(Self {
            alias,
            columns,
            recursive: false,
            body: Some(Box::new(body)),
        })
    }

    /// Replace the column list. An empty list emits no parentheses.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Append one column to the column list.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    /// Set the `RECURSIVE` modifier.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Set (or replace) the body statement.
    pub fn body(mut self, body: impl Fragment + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn column_list(&self) -> &[String] {
        &self.columns
    }

    pub fn is_recursive(&self) -> bool {
        self.recursive
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

impl Fragment for Cte {
    fn render(&self) -> SqlResult<Rendered> {
        if self.alias.is_empty() {
            return Err(SqlError::EmptyAlias);
        }
        let Some(body) = self.body.as_deref() else {
            return Err(SqlError::MissingBody {
                alias: self.alias.clone(),
            });
        };

        let mut out = String::new();
        if self.recursive {
            out.push_str("RECURSIVE ");
        }
        out.push_str(&self.alias);

        if !self.columns.is_empty() {
            out.push('(');
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(col);
            }
            out.push(')');
        }

        out.push_str(" AS (");

        // `out` is dropped on failure; callers never see a half-built CTE.
        let inner = match body.render() {
            Ok(inner) => inner,
            Err(err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "sqlfrag.render",
                    alias = %self.alias,
                    error = %err,
                    "CTE body failed to render"
                );
                return Err(err);
            }
        };

        out.push_str(&inner.sql);
        out.push(')');

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlfrag.render",
            alias = %self.alias,
            recursive = self.recursive,
            columns = self.columns.len(),
            param_count = inner.params.len(),
            "rendered CTE"
        );

        Ok(Rendered::new(out, inner.params))
    }
}

impl std::fmt::Debug for Cte {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cte")
            .field("alias", &self.alias)
            .field("columns", &self.columns)
            .field("recursive", &self.recursive)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Cte;
    use crate::error::SqlError;
    use crate::fragment::{Fragment, Rendered};
    use crate::{expr, sql};

    struct Failing;

    impl Fragment for Failing {
        fn render(&self) -> crate::SqlResult<Rendered> {
            Err(SqlError::other("inner builder is malformed"))
        }
    }

    #[test]
    fn simple_cte() {
        let cte = Cte::new("cte1", sql("SELECT 1"));
        let rendered = cte.render().unwrap();

        assert_eq!(rendered.sql, "cte1 AS (SELECT 1)");
        assert!(rendered.params.is_empty());
    }

    #[test]
    fn recursive_with_columns() {
        let cte = Cte::new(
            "tree",
            expr("SELECT id, parent_id FROM nodes WHERE id = ?").bind(1_i64),
        )
        .columns(["id", "parent_id"])
        .recursive(true);

        let rendered = cte.render().unwrap();
        assert_eq!(
            rendered.sql,
            "RECURSIVE tree(id, parent_id) AS (SELECT id, parent_id FROM nodes WHERE id = ?)"
        );
        assert_eq!(format!("{:?}", rendered.params), "[Param(1)]");
    }

    #[test]
    fn empty_columns_emit_no_parens() {
        let cte = Cte::new("stats", sql("SELECT COUNT(*) FROM nodes")).columns(Vec::<String>::new());
        let rendered = cte.render().unwrap();
        assert_eq!(rendered.sql, "stats AS (SELECT COUNT(*) FROM nodes)");
        assert!(!rendered.sql.contains("stats()"));
    }

    #[test]
    fn column_order_is_preserved() {
        let cte = Cte::new("t", sql("SELECT 3, 2, 1"))
            .column("c")
            .column("a")
            .column("b");
        assert_eq!(cte.render().unwrap().sql, "t(c, a, b) AS (SELECT 3, 2, 1)");
    }

    #[test]
    fn inner_error_is_returned_unchanged() {
        let cte = Cte::new("broken", Failing).recursive(true);
        let err = cte.render().unwrap_err();
        assert!(matches!(err, SqlError::Other(ref m) if m == "inner builder is malformed"));
    }

    #[test]
    fn inner_placeholder_mismatch_propagates() {
        let cte = Cte::new("broken", expr("SELECT ?"));
        let err = cte.render().unwrap_err();
        assert!(matches!(
            err,
            SqlError::PlaceholderMismatch {
                placeholders: 1,
                params: 0
            }
        ));
    }

    #[test]
    fn empty_alias_fails_fast() {
        let err = Cte::new("", sql("SELECT 1")).render().unwrap_err();
        assert!(matches!(err, SqlError::EmptyAlias));
    }

    #[test]
    fn empty_alias_is_reported_before_body_errors() {
        let err = Cte::new("", Failing).render().unwrap_err();
        assert!(matches!(err, SqlError::EmptyAlias));
    }

    #[test]
    fn missing_body_fails_fast() {
        let cte = Cte::named("pending").columns(["id"]);
        assert!(!cte.has_body());

        let err = cte.render().unwrap_err();
        assert!(matches!(err, SqlError::MissingBody { ref alias } if alias == "pending"));

        let cte = cte.body(sql("SELECT 1"));
        assert_eq!(cte.render().unwrap().sql, "pending(id) AS (SELECT 1)");
    }

    #[test]
    fn render_is_idempotent() {
        let cte = Cte::new("t", sql("SELECT ").bind(1_i32)).columns(["n"]);
        let first = cte.render().unwrap();
        let second = cte.render().unwrap();

        assert_eq!(first.sql, second.sql);
        assert_eq!(format!("{:?}", first.params), format!("{:?}", second.params));
    }

    #[test]
    fn checked_validates_names() {
        let cte = Cte::checked("monthly_sales", ["month", "total"], sql("SELECT 1, 2")).unwrap();
        assert_eq!(
            cte.render().unwrap().sql,
            "monthly_sales(month, total) AS (SELECT 1, 2)"
        );

        assert!(Cte::checked("bad name!", Vec::<&str>::new(), sql("SELECT 1")).is_err());
        assert!(Cte::checked("ok", ["bad column!"], sql("SELECT 1")).is_err());
        assert!(Cte::checked("", Vec::<&str>::new(), sql("SELECT 1")).is_err());
    }

    #[test]
    fn accessors_and_debug() {
        let cte = Cte::new("t", sql("SELECT 1")).columns(["a"]).recursive(true);
        assert_eq!(cte.alias(), "t");
        assert_eq!(cte.column_list(), ["a".to_string()]);
        assert!(cte.is_recursive());
        assert_eq!(
            format!("{cte:?}"),
            r#"Cte { alias: "t", columns: ["a"], recursive: true, has_body: true }"#
        );
    }
}
