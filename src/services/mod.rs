//! Business logic services

pub mod books;

use crate::{
    error::{AppError, AppResult},
    repository::{CrudRepository, EntityModel, Repository, StoreError},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            books: books::BooksService::new(repository),
        }
    }
}

/// Generic service wrapping a [`CrudRepository`].
///
/// Adds what every entity needs on top of raw store access: success logging
/// with the entity name, translation of absence into a not-found error,
/// pagination arithmetic, and id-based update/delete paths that perform the
/// existence check before mutating.
#[derive(Clone)]
pub struct CrudService<R: CrudRepository> {
    repo: R,
}

impl<R: CrudRepository> CrudService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    fn store(err: StoreError) -> AppError {
        AppError::from_store(err, R::Entity::NAME)
    }

    pub async fn create(&self, input: &R::Create) -> AppResult<R::Entity> {
        let created = self.repo.create(input).await.map_err(Self::store)?;
        tracing::info!("Created {} with ID: {}.", R::Entity::NAME, created.id());
        Ok(created)
    }

    /// Fetch one record, translating absence into a 404.
    pub async fn get(&self, id: &str) -> AppResult<R::Entity> {
        let fetched = self
            .repo
            .get(id)
            .await
            .map_err(Self::store)?
            .ok_or_else(|| AppError::not_found(R::Entity::NAME))?;
        tracing::info!("Fetched {} with ID: {}.", R::Entity::NAME, fetched.id());
        Ok(fetched)
    }

    /// Fetch one page of records. `page` is 1-based; values below 1 are
    /// treated as the first page.
    pub async fn get_all(
        &self,
        filters: &[(String, String)],
        page: i64,
        limit: i64,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<R::Entity>> {
        let offset = (page - 1).max(0) * limit;
        let fetched = self
            .repo
            .get_all(filters, offset, limit, sort_by)
            .await
            .map_err(Self::store)?;
        tracing::info!(
            "Fetched {} {}s. Filters used: {:?}.",
            fetched.len(),
            R::Entity::NAME,
            filters
        );
        Ok(fetched)
    }

    pub async fn update(&self, id: &str, input: &R::Update) -> AppResult<R::Entity> {
        let current = self.get(id).await?;
        let updated = self
            .repo
            .update(current, input)
            .await
            .map_err(Self::store)?;
        tracing::info!("Updated {} with ID: {}.", R::Entity::NAME, updated.id());
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<R::Entity> {
        let current = self.get(id).await?;
        let deleted = self
            .repo
            .delete(current)
            .await
            .map_err(Self::store)?;
        tracing::info!("Deleted {} with ID: {}.", R::Entity::NAME, deleted.id());
        Ok(deleted)
    }
}
