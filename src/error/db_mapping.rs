use super::app_error::AppError;

const NAME_UNIQUE: &str = "categories_name_key";
const PARENT_FOREIGN_KEY: &str = "categories_parent_id_fkey";
const NOT_OWN_PARENT: &str = "categories_not_own_parent";

/// Maps a Postgres SQLSTATE, plus the violated constraint when there is one,
/// to a client-facing error. `None` leaves the error opaque.
pub(super) fn map_database_error(code: Option<&str>, constraint: Option<&str>) -> Option<AppError> {
    let mapped = match code? {
        "23505" => AppError::Conflict(conflict_message_from_constraint(constraint).to_string()),
        "23503" => AppError::BadRequest(foreign_key_message(constraint).to_string()),
        "23514" => AppError::BadRequest(check_message_from_constraint(constraint).to_string()),
        "22P02" => AppError::validation_error("invalid input format"),
        "08001" | "08006" => database_unavailable("Unable to connect to database"),
        "53300" => database_unavailable("Database connection limit reached"),
        _ => return None,
    };
    Some(mapped)
}

pub(super) fn database_unavailable(message: &str) -> AppError {
    AppError::ServiceUnavailable {
        service: "database".to_string(),
        message: format!("{message}. Please try again later."),
    }
}

pub(super) fn conflict_message_from_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(NAME_UNIQUE) => "category name already exists",
        _ => "resource already exists",
    }
}

pub(super) fn foreign_key_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(PARENT_FOREIGN_KEY) => "parent category not found",
        _ => "referenced category does not exist",
    }
}

pub(super) fn check_message_from_constraint(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(NOT_OWN_PARENT) => "category cannot be its own parent",
        _ => "request violates validation rules",
    }
}
