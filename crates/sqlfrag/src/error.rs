//! Error types for sqlfrag

use thiserror::Error;

/// Result type alias for fragment rendering
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors produced while building or rendering SQL fragments.
///
/// A fragment that wraps another fragment returns the inner error as-is, so the
/// variant a caller sees is the one raised by the innermost failing fragment.
#[derive(Debug, Error)]
pub enum SqlError {
    /// A common table expression was rendered with an empty alias
    #[error("CTE alias cannot be empty")]
    EmptyAlias,

    /// A common table expression was rendered without a body statement
    #[error("CTE '{alias}' has no body statement")]
    MissingBody { alias: String },

    /// The `?` markers in a fragment do not line up with its bound arguments
    #[error("Placeholder mismatch: {placeholders} placeholder(s) but {params} param(s)")]
    PlaceholderMismatch { placeholders: usize, params: usize },

    /// Validation error (identifiers, composer misuse)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error raised by a user-defined fragment
    #[error(transparent)]
    Custom(Box<dyn std::error::Error + Send + Sync>),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl SqlError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a free-form error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Wrap an arbitrary error raised by a custom [`Fragment`](crate::Fragment).
    pub fn custom(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Custom(Box::new(err))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error reports misuse of a CTE (empty alias or missing body)
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::EmptyAlias | Self::MissingBody { .. })
    }

    /// Check if this is a placeholder/argument count mismatch
    pub fn is_placeholder_mismatch(&self) -> bool {
        matches!(self, Self::PlaceholderMismatch { .. })
    }
}
