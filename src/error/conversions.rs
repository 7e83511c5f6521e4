use crate::domain::DomainError;
use crate::error::app_error::AppError;
use crate::error::db_mapping::{database_unavailable, map_database_error};
use crate::error::validation_mapping::validation_issues;

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::HierarchyViolation(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("category not found".to_string()),
            sqlx::Error::Io(_) => database_unavailable("Unable to connect to database"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                database_unavailable("Service temporarily unavailable")
            }
            sqlx::Error::Database(database_error) => {
                let mapped = map_database_error(
                    database_error.code().as_deref(),
                    database_error.constraint(),
                );
                mapped.unwrap_or_else(|| {
                    AppError::DatabaseError(sqlx::Error::Database(database_error))
                })
            }
            other => AppError::DatabaseError(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let issues = validation_issues(&err);
        let message = match issues.as_slice() {
            [issue] => issue.message.clone(),
            _ => "Request validation failed".to_string(),
        };

        AppError::ValidationError { message, issues }
    }
}
