use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};

use crate::domain::CategoryId;
use crate::error::{AppError, AppResult};

/// Uniform `{status, error, data}` reply.
///
/// Exactly one of `error` and `data` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub error: Option<Vec<String>>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            error: None,
            data: Some(data),
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self {
            status: err.status(),
            error: Some(err.error_messages()),
            data: None,
        }
    }

    pub fn from_result(result: AppResult<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(err) => Self::from_error(&err),
        }
    }

    pub fn is_success(&self) -> bool {
        self.data.is_some()
    }
}

impl<T: Serialize> Envelope<T> {
    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(http_status(self.status)).json(self)
    }
}

/// Reply to create and update operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOperationResponse {
    pub id: Option<CategoryId>,
    pub message: String,
    pub status: u16,
    pub error: Option<Vec<String>>,
}

impl CategoryOperationResponse {
    pub fn success(id: CategoryId, message: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            message: message.into(),
            status: StatusCode::OK.as_u16(),
            error: None,
        }
    }

    pub fn failure(id: Option<CategoryId>, err: &AppError) -> Self {
        Self {
            id,
            message: String::new(),
            status: err.status(),
            error: Some(err.error_messages()),
        }
    }

    pub fn into_response(self) -> HttpResponse {
        HttpResponse::build(http_status(self.status)).json(self)
    }
}

/// HTTP status for an envelope status. Anything other than a success or an
/// error class surfaces as 502 while the body keeps the reported number.
pub fn http_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status)
        .ok()
        .filter(|code| code.is_success() || code.is_client_error() || code.is_server_error())
        .unwrap_or(StatusCode::BAD_GATEWAY)
}
