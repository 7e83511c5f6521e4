use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Category, CategoryId, CategoryLink, NewCategory};
use crate::error::AppResult;

use super::traits::CategoryRepository;

const CATEGORY_COLUMNS: &str =
    "id, name, description, images, parent_id, created_at, updated_at";

pub struct CategoryRepositoryImpl {
    pool: PgPool,
}

impl CategoryRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryImpl {
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE name = $1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn find_roots(&self) -> AppResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id IS NULL ORDER BY id ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ANY($1) ORDER BY id ASC"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn find_by_parent_ids(&self, parent_ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        if parent_ids.is_empty() {
            return Ok(Vec::new());
        }

        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories WHERE parent_id = ANY($1) ORDER BY id ASC"
        ))
        .bind(parent_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn find_subtree_links(&self, root_id: CategoryId) -> AppResult<Vec<CategoryLink>> {
        // UNION (not UNION ALL) drops repeated rows, so a corrupted cycle still terminates.
        let links = sqlx::query_as::<_, CategoryLink>(
            r#"
            WITH RECURSIVE subtree(id, parent_id) AS (
                SELECT id, parent_id FROM categories WHERE id = $1
                UNION
                SELECT c.id, c.parent_id
                FROM categories c
                JOIN subtree s ON c.parent_id = s.id
            )
            SELECT id, parent_id FROM subtree ORDER BY id ASC
            "#,
        )
        .bind(root_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(links)
    }

    async fn create_with_children(
        &self,
        category: &NewCategory,
        child_ids: &[CategoryId],
    ) -> AppResult<Category> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO categories (name, description, images, parent_id) \
             VALUES ($1, $2, $3, $4) RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.images)
        .bind(category.parent_id)
        .fetch_one(&mut *tx)
        .await?;

        if !child_ids.is_empty() {
            replace_children(&mut tx, created.id, child_ids).await?;
        }

        tx.commit().await?;
        Ok(created)
    }

    async fn save_with_children(
        &self,
        category: &Category,
        child_ids: Option<&[CategoryId]>,
    ) -> AppResult<Category> {
        let mut tx = self.pool.begin().await?;

        let saved = sqlx::query_as::<_, Category>(&format!(
            "UPDATE categories \
             SET name = $2, description = $3, images = $4, parent_id = $5, updated_at = NOW() \
             WHERE id = $1 RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(category.id)
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.images)
        .bind(category.parent_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(child_ids) = child_ids {
            replace_children(&mut tx, saved.id, child_ids).await?;
        }

        tx.commit().await?;
        Ok(saved)
    }
}

async fn replace_children(
    tx: &mut Transaction<'_, Postgres>,
    parent_id: CategoryId,
    child_ids: &[CategoryId],
) -> AppResult<()> {
    sqlx::query(
        "UPDATE categories SET parent_id = NULL, updated_at = NOW() \
         WHERE parent_id = $1 AND NOT (id = ANY($2))",
    )
    .bind(parent_id)
    .bind(child_ids)
    .execute(&mut **tx)
    .await?;

    if !child_ids.is_empty() {
        sqlx::query(
            "UPDATE categories SET parent_id = $1, updated_at = NOW() \
             WHERE id = ANY($2) AND parent_id IS DISTINCT FROM $1",
        )
        .bind(parent_id)
        .bind(child_ids)
        .execute(&mut **tx)
        .await?;
    }

    Ok(())
}
