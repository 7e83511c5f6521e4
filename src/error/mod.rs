mod app_error;
mod conversions;
mod db_mapping;
mod validation_mapping;

#[cfg(test)]
mod error_tests;

pub use app_error::{AppError, AppResult, ValidationIssue};
