use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::api::dtos::{
    CategoryDetail, CategoryProjection, CategoryTreeNode, CreateCategoryRequest,
    GetCategoriesByIdsRequest, ProductQueryParams, UpdateCategoryRequest,
};
use crate::api::routes::AppState;
use crate::domain::{CategoryId, ProductQueries};
use crate::error::AppResult;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .route("", web::get().to(find_all))
            .route("", web::post().to(create_category))
            .route("/by-ids", web::post().to(get_categories_by_ids))
            .route("/slug/{head}", web::get().to(find_by_head_slug))
            .route("/slug/{head}/{sub_head}", web::get().to(find_by_sub_head_slug))
            .route(
                "/slug/{head}/{sub_head}/{category}",
                web::get().to(find_by_category_slug),
            )
            .route("/{id}", web::get().to(find_one))
            .route("/{id}", web::put().to(update_category)),
    );
}

#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 200, description = "Category created"),
        (status = 400, description = "Invalid payload or hierarchy"),
        (status = 409, description = "Category name already exists"),
    ),
    tag = "categories"
)]
pub async fn create_category(
    state: web::Data<AppState>,
    payload: web::Json<CreateCategoryRequest>,
) -> HttpResponse {
    state
        .category_service
        .create_category(payload.into_inner())
        .await
        .into_response()
}

#[utoipa::path(
    put,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category id")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated"),
        (status = 400, description = "Invalid payload or hierarchy"),
        (status = 404, description = "Unknown category"),
        (status = 409, description = "Category name already exists"),
    ),
    tag = "categories"
)]
pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
    payload: web::Json<UpdateCategoryRequest>,
) -> HttpResponse {
    state
        .category_service
        .update_category(path.into_inner(), payload.into_inner())
        .await
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i32, Path, description = "Category id"), ProductQueryParams),
    responses(
        (status = 200, description = "Category with products", body = CategoryDetail),
        (status = 404, description = "Category not found"),
        (status = 503, description = "Product service unavailable"),
    ),
    tag = "categories"
)]
pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<CategoryId>,
    query: web::Query<ProductQueryParams>,
) -> AppResult<HttpResponse> {
    let queries = product_queries(query.into_inner())?;
    Ok(state
        .category_service
        .find_one(path.into_inner(), queries)
        .await
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "Category forest, three levels deep", body = [CategoryTreeNode]),
    ),
    tag = "categories"
)]
pub async fn find_all(state: web::Data<AppState>) -> HttpResponse {
    state.category_service.find_all().await.into_response()
}

#[utoipa::path(
    post,
    path = "/api/v1/categories/by-ids",
    request_body = GetCategoriesByIdsRequest,
    responses(
        (status = 200, description = "Found categories", body = [CategoryProjection]),
    ),
    tag = "categories"
)]
pub async fn get_categories_by_ids(
    state: web::Data<AppState>,
    payload: web::Json<GetCategoriesByIdsRequest>,
) -> HttpResponse {
    state
        .category_service
        .get_categories_by_ids(payload.into_inner())
        .await
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{head}",
    params(("head" = String, Path, description = "Top-level category name"), ProductQueryParams),
    responses(
        (status = 200, description = "Category with products", body = CategoryDetail),
        (status = 404, description = "Category not found"),
    ),
    tag = "categories"
)]
pub async fn find_by_head_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ProductQueryParams>,
) -> AppResult<HttpResponse> {
    let queries = product_queries(query.into_inner())?;
    Ok(state
        .category_service
        .find_one_by_head_slug(&path.into_inner(), queries)
        .await
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{head}/{sub_head}",
    params(
        ("head" = String, Path, description = "Parent category name"),
        ("sub_head" = String, Path, description = "Category name"),
        ProductQueryParams
    ),
    responses(
        (status = 200, description = "Category with products", body = CategoryDetail),
        (status = 404, description = "Category not found"),
    ),
    tag = "categories"
)]
pub async fn find_by_sub_head_slug(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
    query: web::Query<ProductQueryParams>,
) -> AppResult<HttpResponse> {
    let queries = product_queries(query.into_inner())?;
    let (head, sub_head) = path.into_inner();
    Ok(state
        .category_service
        .find_one_by_sub_head_slug(&head, &sub_head, queries)
        .await
        .into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1/categories/slug/{head}/{sub_head}/{category}",
    params(
        ("head" = String, Path, description = "Top-level category name"),
        ("sub_head" = String, Path, description = "Parent category name"),
        ("category" = String, Path, description = "Category name"),
        ProductQueryParams
    ),
    responses(
        (status = 200, description = "Category with products", body = CategoryDetail),
        (status = 404, description = "Category not found"),
    ),
    tag = "categories"
)]
pub async fn find_by_category_slug(
    state: web::Data<AppState>,
    path: web::Path<(String, String, String)>,
    query: web::Query<ProductQueryParams>,
) -> AppResult<HttpResponse> {
    let queries = product_queries(query.into_inner())?;
    let (head, sub_head, category) = path.into_inner();
    Ok(state
        .category_service
        .find_one_by_category_slug(&head, &sub_head, &category, queries)
        .await
        .into_response())
}

fn product_queries(params: ProductQueryParams) -> AppResult<Option<ProductQueries>> {
    params.validate()?;
    let queries = ProductQueries::from(params);
    Ok((!queries.is_empty()).then_some(queries))
}
