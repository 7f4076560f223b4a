//! WITH clause composition.
//!
//! [`With`] collects [`Cte`] values and prepends them to a main statement:
//!
//! ```text
//! WITH <cte1>, <cte2>, ... <main>
//! ```
//!
//! Each CTE renders its own `RECURSIVE` modifier, so a recursive CTE should be
//! listed first to produce `WITH RECURSIVE ...`. No dialect rules are enforced.
//!
//! # Example
//! ```ignore
//! use sqlfrag::{Cte, With, expr, sql};
//!
//! let q = With::new()
//!     .cte(Cte::new("active", expr("SELECT id FROM nodes WHERE state = ?").bind("active")))
//!     .select(sql("SELECT * FROM active"));
//!
//! let rendered = q.render()?;
//! assert_eq!(
//!     rendered.sql,
//!     "WITH active AS (SELECT id FROM nodes WHERE state = ?) SELECT * FROM active"
//! );
//! ```

use crate::cte::Cte;
use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Rendered};

/// Builder for a `WITH` clause.
#[must_use]
#[derive(Debug, Default)]
pub struct With {
    ctes: Vec<Cte>,
}

impl With {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a CTE. Order is preserved in the output.
    pub fn cte(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    pub fn len(&self) -> usize {
        self.ctes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ctes.is_empty()
    }

    /// Set the main statement and produce a renderable [`WithQuery`].
    pub fn select(self, main: impl Fragment + 'static) -> WithQuery {
        WithQuery {
            ctes: self.ctes,
            main: Box::new(main),
        }
    }
}

/// A `WITH` clause plus the statement that uses it.
#[must_use]
pub struct WithQuery {
    ctes: Vec<Cte>,
    main: Box<dyn Fragment>,
}

impl WithQuery {
    pub fn ctes(&self) -> &[Cte] {
        &self.ctes
    }
}

impl Fragment for WithQuery {
    fn render(&self) -> SqlResult<Rendered> {
        if self.ctes.is_empty() {
            return Err(SqlError::validation(
                "WITH clause requires at least one CTE",
            ));
        }

        let mut out = String::from("WITH ");
        let mut params = Vec::new();

        for (i, cte) in self.ctes.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            let rendered = cte.render()?;
            out.push_str(&rendered.sql);
            params.extend(rendered.params);
        }

        let main = self.main.render()?;
        out.push(' ');
        out.push_str(&main.sql);
        params.extend(main.params);

        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "sqlfrag.render",
            ctes = self.ctes.len(),
            param_count = params.len(),
            "rendered WITH clause"
        );

        Ok(Rendered::new(out, params))
    }
}

impl std::fmt::Debug for WithQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WithQuery")
            .field("ctes", &self.ctes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::With;
    use crate::cte::Cte;
    use crate::error::SqlError;
    use crate::fragment::Fragment;
    use crate::{expr, sql};

    #[test]
    fn single_cte() {
        let q = With::new()
            .cte(Cte::new(
                "active",
                expr("SELECT id FROM nodes WHERE state = ?").bind("active"),
            ))
            .select(sql("SELECT * FROM active"));

        let rendered = q.render().unwrap();
        assert_eq!(
            rendered.sql,
            "WITH active AS (SELECT id FROM nodes WHERE state = ?) SELECT * FROM active"
        );
        assert_eq!(rendered.params.len(), 1);
    }

    #[test]
    fn args_follow_text_order() {
        let q = With::new()
            .cte(Cte::new("a", sql("SELECT ").bind(1_i64)))
            .cte(Cte::new("b", sql("SELECT ").bind(2_i64)))
            .select(sql("SELECT * FROM a, b WHERE a.x > ").bind(3_i64));

        let rendered = q.render().unwrap();
        assert_eq!(
            rendered.sql,
            "WITH a AS (SELECT ?), b AS (SELECT ?) SELECT * FROM a, b WHERE a.x > ?"
        );
        assert_eq!(
            format!("{:?}", rendered.params),
            "[Param(1), Param(2), Param(3)]"
        );
    }

    #[test]
    fn recursive_first_cte() {
        let q = With::new()
            .cte(
                Cte::new(
                    "tree",
                    sql("SELECT id FROM nodes WHERE parent_id IS NULL \
                         UNION ALL SELECT n.id FROM nodes n JOIN tree t ON n.parent_id = t.id"),
                )
                .recursive(true),
            )
            .select(sql("SELECT * FROM tree"));

        assert!(q.render().unwrap().sql.starts_with("WITH RECURSIVE tree AS ("));
    }

    #[test]
    fn empty_with_is_rejected() {
        let err = With::new().select(sql("SELECT 1")).render().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn cte_error_aborts_clause() {
        let q = With::new()
            .cte(Cte::new("ok", sql("SELECT 1")))
            .cte(Cte::named("pending"))
            .select(sql("SELECT 1"));

        let err = q.render().unwrap_err();
        assert!(matches!(err, SqlError::MissingBody { .. }));
    }

    #[test]
    fn main_statement_error_aborts_clause() {
        let q = With::new()
            .cte(Cte::new("ok", sql("SELECT ").bind(1_i64)))
            .select(expr("SELECT ?"));

        let err = q.render().unwrap_err();
        assert!(matches!(
            err,
            SqlError::PlaceholderMismatch {
                placeholders: 1,
                params: 0
            }
        ));
    }

    #[cfg(feature = "tracing")]
    #[test]
    fn renders_with_tracing_events() {
        let q = With::new()
            .cte(Cte::new("a", sql("SELECT ").bind(1_i64)).recursive(true))
            .select(sql("SELECT * FROM a"));
        assert_eq!(
            q.render().unwrap().sql,
            "WITH RECURSIVE a AS (SELECT ?) SELECT * FROM a"
        );

        let broken = Cte::new("broken", expr("SELECT ?"));
        assert!(broken.render().unwrap_err().is_placeholder_mismatch());
    }
}
