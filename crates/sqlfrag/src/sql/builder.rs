use super::PLACEHOLDER;
use crate::error::SqlResult;
use crate::fragment::{Fragment, Rendered};
use crate::ident::IntoIdent;
use crate::param::Param;
use tokio_postgres::types::ToSql;

/// A parameter-safe incremental SQL builder.
///
/// Every bound value is written as a `?` marker at the point it was pushed, so
/// the argument list always matches the markers in the text.
#[must_use]
#[derive(Debug, Clone, Default)]
pub struct Sql {
    sql: String,
    params: Vec<Param>,
}

impl Sql {
    /// Create a new builder with an initial SQL fragment.
    pub fn new(initial_sql: impl Into<String>) -> Self {
        Self {
            sql: initial_sql.into(),
            params: Vec::new(),
        }
    }

    /// Create an empty builder.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Append raw SQL (no parameters).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a `?` marker and bind its value.
    pub fn push_bind<T>(&mut self, value: T) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push_param(Param::new(value))
    }

    /// Append a `?` marker for an already wrapped [`Param`].
    pub fn push_param(&mut self, param: Param) -> &mut Self {
        self.sql.push_str(PLACEHOLDER);
        self.params.push(param);
        self
    }

    /// Append a comma-separated list of markers and bind all values.
    ///
    /// If `values` is empty, this appends `NULL` (so `IN (NULL)` is still valid SQL).
    pub fn push_bind_list<T>(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        let mut iter = values.into_iter();
        let Some(first) = iter.next() else {
            return self.push("NULL");
        };

        self.push_bind(first);
        for v in iter {
            self.push(", ");
            self.push_bind(v);
        }
        self
    }

    /// Append a validated SQL identifier.
    ///
    /// Identifiers can't be bound as parameters; this parses them through
    /// [`crate::Ident`] instead.
    pub fn push_ident<I>(&mut self, ident: I) -> SqlResult<&mut Self>
    where
        I: IntoIdent,
    {
        let ident = ident.into_ident()?;
        ident.write_sql(&mut self.sql);
        Ok(self)
    }

    /// Render another fragment and append its text and arguments.
    ///
    /// On error nothing is appended.
    pub fn push_fragment<F>(&mut self, fragment: &F) -> SqlResult<&mut Self>
    where
        F: Fragment + ?Sized,
    {
        let Rendered { sql, params } = fragment.render()?;
        self.sql.push_str(&sql);
        self.params.extend(params);
        Ok(self)
    }

    /// Bind a value and return `self` (consuming version of [`push_bind`](Sql::push_bind)).
    ///
    /// ```ignore
    /// sqlfrag::sql("SELECT id FROM nodes WHERE id = ").bind(1_i64)
    /// ```
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.push_bind(value);
        self
    }

    /// The SQL text built so far.
    pub fn to_sql(&self) -> String {
        self.sql.clone()
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty() && self.params.is_empty()
    }
}

impl Fragment for Sql {
    fn render(&self) -> SqlResult<Rendered> {
        Ok(Rendered::new(self.sql.clone(), self.params.clone()))
    }
}

impl From<Sql> for Rendered {
    fn from(sql: Sql) -> Self {
        Rendered::new(sql.sql, sql.params)
    }
}
