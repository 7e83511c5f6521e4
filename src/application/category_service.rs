use std::sync::Arc;

use tracing::{debug, info};
use validator::Validate;

use crate::api::dtos::{
    CategoryDetail, CategoryOperationResponse, CategoryProjection, CategoryTreeNode,
    CreateCategoryRequest, Envelope, GetCategoriesByIdsRequest, UpdateCategoryRequest,
};
use crate::application::aggregation::{CategoryAggregator, LoadedCategory};
use crate::application::hierarchy::{
    validate_category_parent, validate_subcategories, DescendantResolver, ForestBuilder,
};
use crate::application::mapper;
use crate::domain::{Category, CategoryId, DomainError, NewCategory, ProductQueries};
use crate::error::{AppError, AppResult};
use crate::infrastructure::product_gateway::ProductGateway;
use crate::infrastructure::repositories::CategoryRepository;

const CREATED_MESSAGE: &str = "Category created successfully";
const UPDATED_MESSAGE: &str = "Category updated successfully";
const NOT_FOUND_MESSAGE: &str = "Category not found";
const UNKNOWN_ID_MESSAGE: &str = "Category with provided id does not exist";

/// Public category operations. Every operation answers with an envelope;
/// failures never escape as `Err`.
#[derive(Clone)]
pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
    aggregator: CategoryAggregator,
    forest: ForestBuilder,
}

impl CategoryService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        product_gateway: Arc<dyn ProductGateway>,
    ) -> Self {
        let resolver = DescendantResolver::new(category_repo.clone());
        Self {
            aggregator: CategoryAggregator::new(resolver, product_gateway),
            forest: ForestBuilder::new(category_repo.clone()),
            category_repo,
        }
    }

    pub async fn create_category(&self, request: CreateCategoryRequest) -> CategoryOperationResponse {
        match self.try_create(request).await {
            Ok(id) => CategoryOperationResponse::success(id, CREATED_MESSAGE),
            Err(err) => CategoryOperationResponse::failure(None, &err),
        }
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        request: UpdateCategoryRequest,
    ) -> CategoryOperationResponse {
        match self.try_update(id, request).await {
            Ok(id) => CategoryOperationResponse::success(id, UPDATED_MESSAGE),
            Err(err) => CategoryOperationResponse::failure(Some(id), &err),
        }
    }

    pub async fn find_one(
        &self,
        id: CategoryId,
        queries: Option<ProductQueries>,
    ) -> Envelope<CategoryDetail> {
        Envelope::from_result(self.try_find_one(id, queries).await)
    }

    pub async fn find_one_by_head_slug(
        &self,
        head: &str,
        queries: Option<ProductQueries>,
    ) -> Envelope<CategoryDetail> {
        self.find_by_name_path(&[head], queries).await
    }

    pub async fn find_one_by_sub_head_slug(
        &self,
        head: &str,
        sub_head: &str,
        queries: Option<ProductQueries>,
    ) -> Envelope<CategoryDetail> {
        self.find_by_name_path(&[head, sub_head], queries).await
    }

    pub async fn find_one_by_category_slug(
        &self,
        head: &str,
        sub_head: &str,
        category: &str,
        queries: Option<ProductQueries>,
    ) -> Envelope<CategoryDetail> {
        self.find_by_name_path(&[head, sub_head, category], queries)
            .await
    }

    pub async fn find_all(&self) -> Envelope<Vec<CategoryTreeNode>> {
        Envelope::from_result(self.forest.build().await)
    }

    pub async fn get_categories_by_ids(
        &self,
        request: GetCategoriesByIdsRequest,
    ) -> Envelope<Vec<CategoryProjection>> {
        Envelope::from_result(self.try_get_by_ids(request).await)
    }

    async fn try_create(&self, request: CreateCategoryRequest) -> AppResult<CategoryId> {
        request.validate()?;
        self.ensure_name_available(&request.name, None).await?;

        let ancestors =
            validate_category_parent(self.category_repo.as_ref(), None, request.parent_id).await?;
        let subcategory_ids = validate_subcategories(
            self.category_repo.as_ref(),
            None,
            &ancestors,
            request.subcategories_ids.as_deref().unwrap_or_default(),
        )
        .await?;

        let created = self
            .category_repo
            .create_with_children(
                &NewCategory {
                    name: request.name,
                    description: request.description,
                    images: request.images,
                    parent_id: request.parent_id,
                },
                &subcategory_ids,
            )
            .await?;

        info!(
            category_id = created.id,
            parent_id = ?created.parent_id,
            subcategories = subcategory_ids.len(),
            "category created"
        );
        Ok(created.id)
    }

    async fn try_update(&self, id: CategoryId, request: UpdateCategoryRequest) -> AppResult<CategoryId> {
        request.validate()?;

        let mut category = self
            .category_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(UNKNOWN_ID_MESSAGE.to_string()))?;

        if let Some(name) = request.name {
            if name != category.name {
                self.ensure_name_available(&name, Some(id)).await?;
            }
            category.name = name;
        }
        if let Some(description) = request.description {
            category.description = description;
        }
        if let Some(images) = request.images {
            category.images = images;
        }

        let parent_id = request.parent_id.unwrap_or(category.parent_id);
        let ancestors =
            validate_category_parent(self.category_repo.as_ref(), Some(id), parent_id).await?;
        category.parent_id = parent_id;

        let subcategory_ids = match request.subcategories_ids.as_deref() {
            Some(ids) => Some(
                validate_subcategories(self.category_repo.as_ref(), Some(id), &ancestors, ids)
                    .await?,
            ),
            None => None,
        };

        let saved = self
            .category_repo
            .save_with_children(&category, subcategory_ids.as_deref())
            .await?;

        info!(
            category_id = saved.id,
            parent_id = ?saved.parent_id,
            children_replaced = subcategory_ids.is_some(),
            "category updated"
        );
        Ok(saved.id)
    }

    async fn try_find_one(
        &self,
        id: CategoryId,
        queries: Option<ProductQueries>,
    ) -> AppResult<CategoryDetail> {
        let category = self.category_repo.find_by_id(id).await?;
        self.aggregate_found(category, queries).await
    }

    async fn try_get_by_ids(
        &self,
        request: GetCategoriesByIdsRequest,
    ) -> AppResult<Vec<CategoryProjection>> {
        if request.ids.is_empty() {
            return Ok(Vec::new());
        }
        request.validate()?;

        let categories = self.category_repo.find_by_ids(&request.ids).await?;
        let found_ids: Vec<CategoryId> = categories.iter().map(|category| category.id).collect();
        let mut children_by_parent = if found_ids.is_empty() {
            Default::default()
        } else {
            mapper::group_by_parent(self.category_repo.find_by_parent_ids(&found_ids).await?)
        };

        debug!(
            requested = request.ids.len(),
            found = categories.len(),
            "projected categories by ids"
        );

        Ok(categories
            .into_iter()
            .map(|category| {
                let subcategories = children_by_parent
                    .remove(&category.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|child| child.id)
                    .collect();
                mapper::map_projection(category, subcategories)
            })
            .collect())
    }

    /// Resolves `path` as a chain of names from the top-most ancestor down to
    /// the requested category.
    async fn find_by_name_path(
        &self,
        path: &[&str],
        queries: Option<ProductQueries>,
    ) -> Envelope<CategoryDetail> {
        let category = self.find_category_by_path(path).await;
        let result = match category {
            Ok(category) => self.aggregate_found(category, queries).await,
            Err(err) => Err(err),
        };
        Envelope::from_result(result)
    }

    async fn find_category_by_path(&self, path: &[&str]) -> AppResult<Option<Category>> {
        let Some((last, ancestors)) = path.split_last() else {
            return Ok(None);
        };
        let Some(category) = self.category_repo.find_by_name(last).await? else {
            return Ok(None);
        };

        let mut cursor = category.parent_id;
        for expected in ancestors.iter().rev() {
            let Some(parent_id) = cursor else {
                return Ok(None);
            };
            let Some(parent) = self.category_repo.find_by_id(parent_id).await? else {
                return Ok(None);
            };
            if parent.name != *expected {
                return Ok(None);
            }
            cursor = parent.parent_id;
        }

        Ok(Some(category))
    }

    async fn aggregate_found(
        &self,
        category: Option<Category>,
        queries: Option<ProductQueries>,
    ) -> AppResult<CategoryDetail> {
        let category = category.ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;
        let loaded = self.load(category).await?;
        let queries = queries.filter(|queries| !queries.is_empty());
        self.aggregator.aggregate(loaded, queries.as_ref()).await
    }

    async fn load(&self, category: Category) -> AppResult<LoadedCategory> {
        let parent = match category.parent_id {
            Some(parent_id) => self.category_repo.find_by_id(parent_id).await?,
            None => None,
        };
        let children = self.category_repo.find_children(category.id).await?;

        Ok(LoadedCategory {
            category,
            parent,
            children,
        })
    }

    async fn ensure_name_available(&self, name: &str, own_id: Option<CategoryId>) -> AppResult<()> {
        match self.category_repo.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != own_id => Err(DomainError::Conflict(
                "category name already exists".to_string(),
            )
            .into()),
            _ => Ok(()),
        }
    }
}
