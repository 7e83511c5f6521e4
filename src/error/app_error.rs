use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        issues: Vec<ValidationIssue>,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    InternalError(#[source] anyhow::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {service}")]
    ServiceUnavailable { service: String, message: String },

    /// A dependency answered with a failure status; forwarded verbatim.
    #[error("Upstream failure: {status}")]
    Upstream { status: u16, errors: Vec<String> },
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let payload = serde_json::json!({
            "status": self.status(),
            "error": self.error_messages(),
            "data": serde_json::Value::Null,
        });

        HttpResponse::build(self.status_code()).json(payload)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|code| code.is_client_error() || code.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl AppError {
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
            issues: Vec::new(),
        }
    }

    /// Numeric status reported in the response envelope.
    ///
    /// Upstream failures keep the status the dependency reported, even when it
    /// is not a valid HTTP code.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Upstream { status, .. } => *status,
            other => other.status_code().as_u16(),
        }
    }

    /// Messages reported in the envelope `error` list. Never empty.
    pub fn error_messages(&self) -> Vec<String> {
        match self {
            AppError::ValidationError { issues, .. } if !issues.is_empty() => {
                issues.iter().map(|issue| issue.message.clone()).collect()
            }
            AppError::Upstream { errors, status } if errors.is_empty() => {
                vec![format!("upstream request failed with status {status}")]
            }
            AppError::Upstream { errors, .. } => errors.clone(),
            other => vec![other.public_message()],
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::DatabaseError(_) | AppError::InternalError(_) => {
                "Internal server error".to_string()
            }
            AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::BadRequest(message) => message.clone(),
            AppError::ValidationError { message, .. } => message.clone(),
            AppError::ServiceUnavailable { message, .. } => message.clone(),
            AppError::Upstream { errors, .. } => errors.join("; "),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
