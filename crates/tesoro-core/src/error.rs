//! Unified error types for all layers of the workspace.

use thiserror::Error;

/// Unified error type for Tesoro.
///
/// Covers domain, data-access, and configuration failures. Persistence
/// errors carry the backend's message unchanged; no recovery is attempted
/// at this layer.
#[derive(Error, Debug)]
pub enum TesoroError {
    /// Resource not found by primary key.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// A single-result query matched no rows.
    #[error("Query returned no result: {query}")]
    NoResult { query: String },

    /// A single-result query matched more than one row.
    #[error("Query returned {count} results, expected exactly one: {query}")]
    NonUniqueResult { query: String, count: usize },

    /// Validation error (e.g. an unknown column name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict error (e.g. duplicate key).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TesoroError {
    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a no-result error for a query.
    #[must_use]
    pub fn no_result<T: Into<String>>(query: T) -> Self {
        Self::NoResult {
            query: query.into(),
        }
    }

    /// Creates a non-unique-result error for a query.
    #[must_use]
    pub fn non_unique<T: Into<String>>(query: T, count: usize) -> Self {
        Self::NonUniqueResult {
            query: query.into(),
            count,
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a conflict error.
    #[must_use]
    pub fn conflict<T: Into<String>>(message: T) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a database error.
    #[must_use]
    pub fn database<T: Into<String>>(message: T) -> Self {
        Self::Database(message.into())
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration<T: Into<String>>(message: T) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Checks if this error represents an absent entity or row.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoResult { .. })
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for TesoroError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // Check for unique constraint violation
                if let Some(code) = db_err.code() {
                    if code == "23505" || code == "1062" {
                        // PostgreSQL / MySQL unique violation
                        return Self::Conflict(db_err.message().to_string());
                    }
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for TesoroError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}
