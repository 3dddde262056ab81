//! Category handlers.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, Category};
use crate::domain::foundation::ErrorCode;
use crate::ports::CategoryRepository;

#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
}

pub struct CreateCategoryHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl CreateCategoryHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateCategoryCommand) -> Result<Category, CatalogError> {
        let category = Category::new(&cmd.name)?;

        if self.repository.find_by_name(&category.name).await?.is_some() {
            return Err(CatalogError::CategoryExists(category.name));
        }

        self.repository.create(&category).await.map_err(|e| {
            if e.code == ErrorCode::CategoryExists {
                CatalogError::CategoryExists(category.name.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }
}

pub struct ListCategoriesHandler {
    repository: Arc<dyn CategoryRepository>,
}

impl ListCategoriesHandler {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.repository.list().await?)
    }
}

/// Resolves a category name, failing with `CategoryNotFound`.
pub(super) async fn resolve_category(
    repository: &dyn CategoryRepository,
    name: &str,
) -> Result<Category, CatalogError> {
    repository
        .find_by_name(name)
        .await?
        .ok_or_else(|| CatalogError::category_not_found(name.trim()))
}
