//! The "renders to SQL" capability every fragment type implements.
//!
//! A [`Fragment`] turns its own immutable state into SQL text plus the ordered
//! list of arguments for the `?` markers in that text. Fragments compose by
//! rendering their children and passing the children's arguments through in
//! textual order, so only the outermost consumer has to care about placeholder
//! numbering or dialect.
//!
//! # Example
//! ```ignore
//! use sqlfrag::{Fragment, Rendered, SqlResult};
//!
//! struct Now;
//!
//! impl Fragment for Now {
//!     fn render(&self) -> SqlResult<Rendered> {
//!         Ok(Rendered::new("now()", Vec::new()))
//!     }
//! }
//! ```

use crate::error::SqlResult;
use crate::param::Param;
use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// SQL text together with its positional arguments.
#[derive(Debug, Clone, Default)]
pub struct Rendered {
    /// SQL text with one `?` marker per argument, left to right.
    pub sql: String,
    /// Arguments in marker order.
    pub params: Vec<Param>,
}

impl Rendered {
    pub fn new(sql: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Parameter refs compatible with `tokio-postgres`.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p.as_ref()).collect()
    }

    pub fn into_parts(self) -> (String, Vec<Param>) {
        (self.sql, self.params)
    }
}

/// A value that renders itself to SQL text and bound arguments.
///
/// Implementations must be pure: no I/O, no shared mutable state, and the same
/// value must always render to the same output. Failures are returned, never
/// papered over with partial text.
pub trait Fragment: Send + Sync {
    fn render(&self) -> SqlResult<Rendered>;
}

impl<T: Fragment + ?Sized> Fragment for &T {
    fn render(&self) -> SqlResult<Rendered> {
        (**self).render()
    }
}

impl<T: Fragment + ?Sized> Fragment for Box<T> {
    fn render(&self) -> SqlResult<Rendered> {
        (**self).render()
    }
}

impl<T: Fragment + ?Sized> Fragment for Arc<T> {
    fn render(&self) -> SqlResult<Rendered> {
        (**self).render()
    }
}
