use std::sync::Arc;

use actix_web::{error, web, HttpRequest, HttpResponse};
use sqlx::PgPool;

use crate::application::CategoryService;
use crate::error::{AppError, AppResult};

pub mod categories;

#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<CategoryService>,
    pub db_pool: PgPool,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::PathConfig::default().error_handler(path_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .service(web::scope("/api/v1").configure(categories::configure))
        .route("/health", web::get().to(health))
        .route("/ready", web::get().to(ready));
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check passed")
    ),
    tag = "health"
)]
pub async fn health() -> &'static str {
    "ok"
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Readiness check passed"),
        (status = 503, description = "Service not ready"),
    ),
    tag = "health"
)]
pub async fn ready(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "readiness check failed");
            AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Service not ready".to_string(),
            }
        })?;
    Ok(HttpResponse::Ok().body("ready"))
}

fn json_error(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("invalid request body: {err}")).into()
}

fn path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("invalid path parameter: {err}")).into()
}

fn query_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("invalid query string: {err}")).into()
}
