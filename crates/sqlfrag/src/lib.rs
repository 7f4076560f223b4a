//! # sqlfrag
//!
//! Composable SQL fragments that render to text plus an ordered list of bound
//! arguments.
//!
//! ## Features
//!
//! - **One capability**: every fragment implements [`Fragment::render`], so any
//!   fragment can be nested inside any other
//! - **Positional arguments**: `?` markers in the text, values in a parallel list,
//!   passed through unchanged at every nesting level
//! - **Common table expressions**: [`Cte`] wraps a body statement with an alias,
//!   an optional column list and an optional `RECURSIVE` modifier
//! - **Fail closed**: a failing inner fragment fails the whole render; no partial
//!   SQL is ever returned
//!
//! ```ignore
//! use sqlfrag::prelude::*;
//!
//! let q = With::new()
//!     .cte(
//!         Cte::new("tree", expr("SELECT id, parent_id FROM nodes WHERE id = ?").bind(1_i64))
//!             .columns(["id", "parent_id"])
//!             .recursive(true),
//!     )
//!     .select(sql("SELECT * FROM tree"));
//!
//! let Rendered { sql, params } = q.render()?;
//! ```
//!
//! Rewriting `?` into a dialect's placeholder style and executing the statement
//! are left to the consumer.

pub mod cte;
pub mod error;
pub mod fragment;
pub mod ident;
pub mod param;
pub mod prelude;
pub mod sql;
pub mod with;

pub use cte::Cte;
pub use error::{SqlError, SqlResult};
pub use fragment::{Fragment, Rendered};
pub use ident::{Ident, IdentPart, IntoIdent};
pub use param::Param;
pub use sql::{Expr, Sql, expr, sql};
pub use with::{With, WithQuery};
