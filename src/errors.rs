//! Repository error taxonomy.
//!
//! Configuration and not-found errors propagate to the caller;
//! internal database detail is logged through `tracing` and never sent
//! to clients. Per-field search problems are not errors at all: they
//! are reported in the criteria outcome (see
//! [`PredicateOutcome`](crate::criteria::PredicateOutcome)) so the
//! caller decides whether to log or fail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum RepositoryError {
    /// The caller or entity is misconfigured: a requested search-field
    /// subset with no overlap with the declared searchable set, and
    /// similar. Surfaces as a server error.
    Configuration {
        message: String,
    },
    /// A single-record lookup that requested failure on miss found
    /// nothing.
    NotFound {
        resource: String,
        id: Option<String>,
    },
    /// A write reported zero affected rows.
    WriteFailure {
        operation: String,
    },
    /// The underlying driver rejected a query. Detail is logged, a
    /// generic message is exposed.
    Database {
        internal: DbErr,
    },
}

impl RepositoryError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn write_failure(operation: impl Into<String>) -> Self {
        Self::WriteFailure {
            operation: operation.into(),
        }
    }

    #[must_use]
    pub fn database(internal: DbErr) -> Self {
        Self::Database { internal }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Configuration { .. } | Self::WriteFailure { .. } | Self::Database { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Configuration { message } => message.clone(),
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::WriteFailure { operation } => format!("Unable to {operation}."),
            Self::Database { .. } => "A database error occurred".to_string(),
        }
    }

    /// Log internal detail. Only the `Database` variant carries
    /// anything clients must not see.
    fn log_internal(&self) {
        match self {
            Self::Database { internal } => {
                tracing::error!(error = ?internal, "database error");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "repository error"
                );
            }
        }
    }
}

/// Error body sent to clients (sanitized).
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for RepositoryError {
    fn into_response(self) -> Response {
        self.log_internal();
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for RepositoryError {}

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        match &err {
            DbErr::RecordNotFound(message) => {
                // Sea-ORM formats these as "<resource> not found"
                let resource = message.split_whitespace().next().unwrap_or("Resource");
                Self::NotFound {
                    resource: resource.to_string(),
                    id: None,
                }
            }
            _ => Self::Database { internal: err },
        }
    }
}
