#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use category_service::domain::{Category, CategoryId, CategoryLink, NewCategory};
use category_service::error::{AppError, AppResult};
use category_service::infrastructure::repositories::CategoryRepository;
use chrono::Utc;

/// In-memory category store with the same ordering, constraint and
/// transaction behavior as the Postgres repository.
#[derive(Default)]
pub struct MockCategoryRepo {
    pub categories: Mutex<Vec<Category>>,
    pub calls: Mutex<Vec<String>>,
    fail_child_replacement: Mutex<bool>,
}

impl MockCategoryRepo {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: Mutex::new(categories),
            ..Default::default()
        }
    }

    /// Makes every later child re-parenting step fail, rolling back the write
    /// it belongs to.
    pub fn fail_child_replacement(&self) {
        *self
            .fail_child_replacement
            .lock()
            .expect("failure flag mutex poisoned") = true;
    }

    pub fn get(&self, id: CategoryId) -> Option<Category> {
        self.snapshot().into_iter().find(|c| c.id == id)
    }

    pub fn snapshot(&self) -> Vec<Category> {
        self.categories
            .lock()
            .expect("categories mutex poisoned")
            .clone()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls mutex poisoned").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls
            .lock()
            .expect("calls mutex poisoned")
            .push(call.into());
    }

    fn sorted(mut categories: Vec<Category>) -> Vec<Category> {
        categories.sort_by_key(|c| c.id);
        categories
    }

    fn replace_children(
        &self,
        categories: &mut [Category],
        parent_id: CategoryId,
        child_ids: &[CategoryId],
    ) -> AppResult<()> {
        if *self
            .fail_child_replacement
            .lock()
            .expect("failure flag mutex poisoned")
        {
            return Err(AppError::ServiceUnavailable {
                service: "database".to_string(),
                message: "Service temporarily unavailable".to_string(),
            });
        }

        for category in categories.iter_mut() {
            if child_ids.contains(&category.id) {
                category.parent_id = Some(parent_id);
            } else if category.parent_id == Some(parent_id) {
                category.parent_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepo {
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Option<Category>> {
        self.record(format!("find_by_id:{id}"));
        Ok(self.get(id))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        self.record(format!("find_by_name:{name}"));
        Ok(self.snapshot().into_iter().find(|c| c.name == name))
    }

    async fn find_roots(&self) -> AppResult<Vec<Category>> {
        self.record("find_roots");
        Ok(Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|c| c.parent_id.is_none())
                .collect(),
        ))
    }

    async fn find_by_ids(&self, ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        self.record(format!("find_by_ids:{ids:?}"));
        Ok(Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|c| ids.contains(&c.id))
                .collect(),
        ))
    }

    async fn find_by_parent_ids(&self, parent_ids: &[CategoryId]) -> AppResult<Vec<Category>> {
        self.record(format!("find_by_parent_ids:{parent_ids:?}"));
        Ok(Self::sorted(
            self.snapshot()
                .into_iter()
                .filter(|c| c.parent_id.is_some_and(|p| parent_ids.contains(&p)))
                .collect(),
        ))
    }

    async fn find_subtree_links(&self, root_id: CategoryId) -> AppResult<Vec<CategoryLink>> {
        self.record(format!("find_subtree_links:{root_id}"));
        let all = self.snapshot();
        let mut links = Vec::new();
        let mut seen = HashSet::new();
        let mut queue: VecDeque<CategoryId> = all
            .iter()
            .filter(|c| c.id == root_id)
            .map(|c| c.id)
            .collect();

        while let Some(id) = queue.pop_front() {
            if !seen.insert(id) {
                continue;
            }
            for category in all.iter().filter(|c| c.id == id) {
                links.push(category.link());
            }
            queue.extend(
                all.iter()
                    .filter(|c| c.parent_id == Some(id))
                    .map(|c| c.id),
            );
        }

        Ok(links)
    }

    async fn create_with_children(
        &self,
        category: &NewCategory,
        child_ids: &[CategoryId],
    ) -> AppResult<Category> {
        self.record(format!("create:{}:{child_ids:?}", category.name));
        let mut categories = self.categories.lock().expect("categories mutex poisoned");
        if categories.iter().any(|c| c.name == category.name) {
            return Err(AppError::Conflict("category name already exists".to_string()));
        }

        let mut staged = categories.clone();
        let now = Utc::now();
        let created = Category {
            id: staged.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: category.name.clone(),
            description: category.description.clone(),
            images: category.images.clone(),
            parent_id: category.parent_id,
            created_at: now,
            updated_at: now,
        };
        staged.push(created.clone());

        if !child_ids.is_empty() {
            self.replace_children(&mut staged, created.id, child_ids)?;
        }

        *categories = staged;
        Ok(created)
    }

    async fn save_with_children(
        &self,
        category: &Category,
        child_ids: Option<&[CategoryId]>,
    ) -> AppResult<Category> {
        self.record(format!("save:{}:{child_ids:?}", category.id));
        let mut categories = self.categories.lock().expect("categories mutex poisoned");
        let mut staged = categories.clone();
        let existing = staged
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| AppError::NotFound("category not found".to_string()))?;

        *existing = Category {
            updated_at: Utc::now(),
            ..category.clone()
        };
        let saved = existing.clone();

        if let Some(child_ids) = child_ids {
            self.replace_children(&mut staged, saved.id, child_ids)?;
        }

        *categories = staged;
        Ok(saved)
    }
}
