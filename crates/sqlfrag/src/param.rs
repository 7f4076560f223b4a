//! Bound argument values shared across nested fragments.

use std::sync::Arc;
use tokio_postgres::types::ToSql;

/// A clone-friendly bound argument.
///
/// Cloning a `Param` only bumps a reference count, so an argument recorded by
/// an inner fragment is the same allocation at every nesting level.
#[derive(Clone)]
pub struct Param(pub(crate) Arc<dyn ToSql + Send + Sync>);

impl Param {
    /// Create a new parameter from any ToSql value.
    pub fn new<T: ToSql + Send + Sync + 'static>(value: T) -> Self {
        Param(Arc::new(value))
    }

    /// Get a reference to the inner value as a ToSql trait object.
    pub fn as_ref(&self) -> &(dyn ToSql + Sync) {
        &*self.0 as &(dyn ToSql + Sync)
    }

    /// Returns `true` if both params point at the same bound value.
    pub fn ptr_eq(a: &Param, b: &Param) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Param").field(&self.0).finish()
    }
}

impl<T: ToSql + Send + Sync + 'static> From<Arc<T>> for Param {
    fn from(value: Arc<T>) -> Self {
        Param(value)
    }
}
