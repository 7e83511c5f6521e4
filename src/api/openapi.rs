use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Category endpoints
        crate::api::routes::categories::create_category,
        crate::api::routes::categories::update_category,
        crate::api::routes::categories::find_one,
        crate::api::routes::categories::find_all,
        crate::api::routes::categories::get_categories_by_ids,
        crate::api::routes::categories::find_by_head_slug,
        crate::api::routes::categories::find_by_sub_head_slug,
        crate::api::routes::categories::find_by_category_slug,
        // Health check
        crate::api::routes::health,
        crate::api::routes::ready,
    ),
    components(
        schemas(
            crate::api::dtos::CreateCategoryRequest,
            crate::api::dtos::UpdateCategoryRequest,
            crate::api::dtos::GetCategoriesByIdsRequest,
            crate::api::dtos::CategoryDetail,
            crate::api::dtos::RelatedCategory,
            crate::api::dtos::SubcategorySummary,
            crate::api::dtos::CategoryTreeNode,
            crate::api::dtos::CategoryProjection,
            crate::domain::Product,
            crate::domain::SortOrder,
        )
    ),
    tags(
        (name = "categories", description = "Category hierarchy and product aggregation"),
        (name = "health", description = "Health check endpoints"),
    ),
    info(
        title = "Category Service API",
        version = "0.1.0",
        description = "Category hierarchy service backed by the product service"
    )
)]
pub struct ApiDoc;

pub fn configure_swagger_ui(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
}
