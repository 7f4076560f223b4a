use super::count_placeholders;
use crate::error::{SqlError, SqlResult};
use crate::fragment::{Fragment, Rendered};
use crate::param::Param;
use tokio_postgres::types::ToSql;

/// A complete SQL string with pre-written `?` markers plus bound arguments.
///
/// Rendering fails with [`SqlError::PlaceholderMismatch`] when the number of
/// markers (outside quotes and comments) differs from the number of arguments.
#[must_use]
#[derive(Debug, Clone)]
pub struct Expr {
    sql: String,
    params: Vec<Param>,
}

impl Expr {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind a value.
    ///
    /// This does not modify the SQL string; it only appends the value to the
    /// argument list.
    pub fn bind<T>(mut self, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.params.push(Param::new(value));
        self
    }

    /// Bind an already wrapped [`Param`].
    pub fn bind_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }
}

impl Fragment for Expr {
    fn render(&self) -> SqlResult<Rendered> {
        let placeholders = count_placeholders(&self.sql);
        if placeholders != self.params.len() {
            return Err(SqlError::PlaceholderMismatch {
                placeholders,
                params: self.params.len(),
            });
        }
        Ok(Rendered::new(self.sql.clone(), self.params.clone()))
    }
}
