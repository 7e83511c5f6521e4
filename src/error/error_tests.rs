use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use serde_json::Value;
use validator::Validate;

use super::db_mapping::{
    check_message_from_constraint, conflict_message_from_constraint, map_database_error,
};
use super::AppError;
use crate::domain::DomainError;

#[derive(Debug, Validate)]
struct CategoryNameValidation {
    #[validate(length(min = 1, message = "name must not be empty"))]
    name: String,
}

async fn body_json(error: AppError) -> (StatusCode, Value) {
    let response = error.error_response();
    let status = response.status();
    let body = to_bytes(response.into_body())
        .await
        .map_err(|_| "body read failed")
        .expect("response body should be readable");
    let json: Value = serde_json::from_slice(&body).expect("response body should be valid json");
    (status, json)
}

#[actix_rt::test]
async fn validation_error_response_is_an_envelope_with_issue_messages() {
    let error: AppError = CategoryNameValidation {
        name: String::new(),
    }
    .validate()
    .expect_err("validation should fail")
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert_eq!(json["error"], serde_json::json!(["name must not be empty"]));
    assert!(json["data"].is_null());
}

#[actix_rt::test]
async fn not_found_response_has_single_message() {
    let (status, json) = body_json(AppError::NotFound("Category not found".to_string())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
    assert_eq!(json["error"], serde_json::json!(["Category not found"]));
}

#[actix_rt::test]
async fn upstream_failure_keeps_reported_status_and_errors() {
    let error = AppError::Upstream {
        status: 422,
        errors: vec!["bad sort field".to_string(), "bad page".to_string()],
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["status"], 422);
    assert_eq!(json["error"], serde_json::json!(["bad sort field", "bad page"]));
}

#[test]
fn upstream_with_non_error_status_maps_to_bad_gateway_at_http_layer() {
    let error = AppError::Upstream {
        status: 7,
        errors: vec!["weird".to_string()],
    };

    assert_eq!(error.status_code(), StatusCode::BAD_GATEWAY);
    assert_eq!(error.status(), 7);
}

#[test]
fn upstream_without_messages_still_reports_one() {
    let error = AppError::Upstream {
        status: 500,
        errors: Vec::new(),
    };

    assert_eq!(
        error.error_messages(),
        vec!["upstream request failed with status 500".to_string()]
    );
}

#[test]
fn internal_errors_hide_details() {
    let error = AppError::InternalError(anyhow::anyhow!("connection string leaked"));

    assert_eq!(error.status(), 500);
    assert_eq!(error.error_messages(), vec!["Internal server error".to_string()]);
}

#[test]
fn maps_unique_name_violation_to_conflict_message() {
    let mapped = map_database_error(Some("23505"), Some("categories_name_key"));
    assert!(matches!(
        mapped,
        Some(AppError::Conflict(message)) if message == "category name already exists"
    ));
}

#[test]
fn maps_foreign_key_violation_to_bad_request() {
    let mapped = map_database_error(Some("23503"), Some("categories_parent_id_fkey"));
    assert!(matches!(
        mapped,
        Some(AppError::BadRequest(message)) if message == "parent category not found"
    ));
}

#[test]
fn maps_self_parent_check_violation() {
    let mapped = map_database_error(Some("23514"), Some("categories_not_own_parent"));
    assert!(matches!(
        mapped,
        Some(AppError::BadRequest(message)) if message == "category cannot be its own parent"
    ));
}

#[test]
fn maps_connection_errors_to_service_unavailable() {
    for code in ["08001", "08006", "53300"] {
        let mapped = map_database_error(Some(code), None);
        assert!(matches!(
            mapped,
            Some(AppError::ServiceUnavailable { service, .. }) if service == "database"
        ));
    }
}

#[test]
fn unknown_sqlstate_is_not_mapped() {
    assert!(map_database_error(Some("99999"), None).is_none());
    assert!(map_database_error(None, None).is_none());
}

#[test]
fn constraint_messages_fall_back_to_generic() {
    assert_eq!(conflict_message_from_constraint(None), "resource already exists");
    assert_eq!(
        check_message_from_constraint(Some("other_check")),
        "request violates validation rules"
    );
}

#[test]
fn from_domain_error_maps_all_variants() {
    assert!(matches!(
        AppError::from(DomainError::HierarchyViolation("x".to_string())),
        AppError::BadRequest(_)
    ));
    assert!(matches!(
        AppError::from(DomainError::Conflict("x".to_string())),
        AppError::Conflict(_)
    ));
}

#[test]
fn sqlx_pool_timeout_maps_to_service_unavailable() {
    let error = AppError::from(sqlx::Error::PoolTimedOut);
    assert_eq!(error.status(), 503);
    assert!(matches!(error, AppError::ServiceUnavailable { .. }));
}

#[test]
fn sqlx_row_not_found_is_not_found() {
    let error = AppError::from(sqlx::Error::RowNotFound);
    assert!(matches!(error, AppError::NotFound(_)));
    assert_eq!(error.status(), 404);
}

#[test]
fn sqlx_protocol_errors_stay_opaque() {
    let error = AppError::from(sqlx::Error::Protocol("bad frame".to_string()));
    assert!(matches!(error, AppError::DatabaseError(_)));
    assert_eq!(error.error_messages(), vec!["Internal server error".to_string()]);
}

#[test]
fn struct_level_validation_is_reported_against_request() {
    let request = crate::api::dtos::UpdateCategoryRequest {
        parent_id: Some(Some(-3)),
        ..Default::default()
    };
    let error = AppError::from(request.validate().expect_err("negative parent"));

    let AppError::ValidationError { issues, .. } = &error else {
        panic!("expected validation error, got {error:?}");
    };
    assert_eq!(issues[0].field, "request");
    assert_eq!(issues[0].message, "parent_id must not be negative");
}
