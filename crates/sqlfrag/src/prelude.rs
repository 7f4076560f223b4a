//! Convenient imports for typical `sqlfrag` usage.
//!
//! ```ignore
//! use sqlfrag::prelude::*;
//! ```

pub use crate::{
    Cte, Expr, Fragment, Param, Rendered, Sql, SqlError, SqlResult, With, expr, sql,
};
pub use crate::{Ident, IntoIdent};
