//! Unified error types for all layers of the application.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for all layers of Orderly.
///
/// The first group of variants is the taxonomy callers of the services see.
/// The infrastructure group is produced by collaborators (store, cache,
/// directory) and is folded into [`OrderlyError::Internal`] by
/// [`OrderlyError::surface`] before it leaves a service.
#[derive(Error, Debug)]
pub enum OrderlyError {
    // ============ Exposed Errors ============
    /// Malformed input; no I/O was attempted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Entity absent from the store.
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// The directory could not resolve the user an order was placed for.
    #[error("User not found: {user_id}")]
    UserNotFound { user_id: i64 },

    /// Uniqueness violation.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Deadline or cancellation observed before completion.
    #[error("Cancelled: {0}")]
    Cancelled(String),

    /// Any other collaborator failure.
    #[error("Internal error: {0}")]
    Internal(String),

    // ============ Infrastructure Errors ============
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Redis/Cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// External service error
    #[error("External service error: {service} - {message}")]
    ExternalService { service: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl OrderlyError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidArgument(_) => 400,
            Self::NotFound { .. } | Self::UserNotFound { .. } => 404,
            Self::AlreadyExists(_) => 409,
            // nginx's "client closed request"
            Self::Cancelled(_) => 499,
            Self::ExternalService { .. } => 502,
            Self::Internal(_)
            | Self::Database(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Serialization(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::AlreadyExists(_) => "ALREADY_EXISTS",
            Self::Cancelled(_) => "CANCELLED",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument<T: Into<String>>(message: T) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates an already exists error.
    #[must_use]
    pub fn already_exists<T: Into<String>>(message: T) -> Self {
        Self::AlreadyExists(message.into())
    }

    /// Creates a cancelled error.
    #[must_use]
    pub fn cancelled<T: Into<String>>(message: T) -> Self {
        Self::Cancelled(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// Creates an external service error.
    #[must_use]
    pub fn external<S: Into<String>, M: Into<String>>(service: S, message: M) -> Self {
        Self::ExternalService {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Returns true for [`OrderlyError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns true for [`OrderlyError::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }

    /// Folds infrastructure variants into [`OrderlyError::Internal`], leaving
    /// the exposed taxonomy untouched.
    #[must_use]
    pub fn surface(self) -> Self {
        match self {
            Self::Database(_)
            | Self::Cache(_)
            | Self::ExternalService { .. }
            | Self::Configuration(_)
            | Self::Serialization(_) => Self::Internal(self.to_string()),
            exposed => exposed,
        }
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for OrderlyError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::NotFound {
                resource_type: "database_row",
                id: "unknown".to_string(),
            },
            sqlx::Error::Database(db_err) => {
                // PostgreSQL unique_violation
                if db_err.code().as_deref() == Some("23505") {
                    return Self::AlreadyExists(db_err.message().to_string());
                }
                Self::Database(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for OrderlyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Serializable error response for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Request ID for correlating with server logs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response from an `OrderlyError`.
    #[must_use]
    pub fn from_error(error: &OrderlyError) -> Self {
        Self {
            code: error.error_code().to_string(),
            message: error.to_string(),
            request_id: None,
        }
    }

    /// Sets the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }
}

impl From<&OrderlyError> for ErrorResponse {
    fn from(error: &OrderlyError) -> Self {
        Self::from_error(error)
    }
}
