//! Typed errors, the wire-level error code taxonomy, and HTTP mapping.

use crate::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Outcome classifier carried in every envelope's `code` field.
/// The numeric values are part of the wire contract and must never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Success,
    ValidationError,
    NotFound,
    DatabaseError,
    NetworkError,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 5] = [
        ErrorCode::Success,
        ErrorCode::ValidationError,
        ErrorCode::NotFound,
        ErrorCode::DatabaseError,
        ErrorCode::NetworkError,
    ];

    pub fn as_i32(self) -> i32 {
        match self {
            ErrorCode::Success => 0,
            ErrorCode::ValidationError => 1,
            ErrorCode::NotFound => 2,
            ErrorCode::DatabaseError => 3,
            ErrorCode::NetworkError => -1,
        }
    }

    /// Status for this code. `created` only matters for `Success`.
    pub fn status(self, created: bool) -> StatusCode {
        match self {
            ErrorCode::Success if created => StatusCode::CREATED,
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Fallback message used when a caller supplies an empty one.
    pub fn default_message(self) -> &'static str {
        match self {
            ErrorCode::Success => "success",
            ErrorCode::ValidationError => "required field missing",
            ErrorCode::NotFound => "not found",
            ErrorCode::DatabaseError => "database error",
            ErrorCode::NetworkError => "service unavailable",
        }
    }
}

impl Serialize for ErrorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid identifier for {kind}: '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("duplicate resource: {0}")]
    DuplicateResource(String),
    #[error("duplicate field '{field}' in resource '{resource}'")]
    DuplicateField { resource: String, field: String },
    #[error("config load: {0}")]
    Load(String),
    #[error("validation: {0}")]
    Validation(String),
    #[error("setting {name}: {reason}")]
    Setting { name: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("{0}")]
    Unavailable(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Db(_) => ErrorCode::DatabaseError,
            AppError::Unavailable(_) => ErrorCode::NetworkError,
        }
    }

    /// Client-facing message. Driver detail never leaves the process.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Db(_) => ErrorCode::DatabaseError.default_message().to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        match &self {
            AppError::Validation(msg) | AppError::NotFound(msg) => {
                tracing::debug!(code = code.as_i32(), msg = %msg, "request rejected");
            }
            AppError::Unavailable(msg) => {
                tracing::warn!(msg = %msg, "service unavailable");
            }
            // Logged with its input at the call site.
            AppError::Db(_) => {}
        }
        let body: Envelope<()> = Envelope::new(code, self.public_message(), None);
        (code.status(false), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_values_are_stable() {
        let values: Vec<i32> = ErrorCode::ALL.iter().map(|c| c.as_i32()).collect();
        assert_eq!(values, vec![0, 1, 2, 3, -1]);
        assert_eq!(serde_json::to_string(&ErrorCode::NetworkError).unwrap(), "-1");
    }

    #[test]
    fn status_mapping_is_total_and_success_iff_2xx() {
        for code in ErrorCode::ALL {
            for created in [false, true] {
                let status = code.status(created);
                let ok = status == StatusCode::OK || status == StatusCode::CREATED;
                assert_eq!(code.as_i32() == 0, ok, "{code:?} -> {status}");
            }
        }
        assert_eq!(ErrorCode::Success.status(true), StatusCode::CREATED);
        assert_eq!(ErrorCode::ValidationError.status(false), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(false), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::DatabaseError.status(false), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ErrorCode::NetworkError.status(false), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn db_errors_hide_driver_detail() {
        let err = AppError::Db(sqlx::Error::Protocol("secret driver text".into()));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(err.public_message(), "database error");
        assert!(err.to_string().contains("secret driver text"));
    }
}
