//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use thiserror::Error;

/// Errors surfaced by the store layer, tagged so the service boundary can
/// translate them without inspecting driver internals.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unique constraint violated")]
    Duplicate(#[source] sqlx::Error),

    #[error("unknown column `{0}`")]
    UnknownColumn(String),

    #[error(transparent)]
    Driver(#[from] sqlx::Error),
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// A persisted record with a primary key and a stable entity name.
pub trait EntityModel {
    /// Lowercase singular entity name, used for logging, error messages
    /// and canonical URLs.
    const NAME: &'static str;

    fn id(&self) -> &str;
}

/// Generic CRUD operations over one entity type.
///
/// `get` reports absence as `None`; callers decide whether that is an error.
/// `update` and `delete` take the already-fetched record so the existence
/// check stays in one place (the service layer).
#[async_trait]
pub trait CrudRepository: Send + Sync {
    type Entity: EntityModel + Send;
    type Create: Send + Sync;
    type Update: Send + Sync;

    async fn create(&self, input: &Self::Create) -> StoreResult<Self::Entity>;

    async fn get(&self, id: &str) -> StoreResult<Option<Self::Entity>>;

    async fn get_all(
        &self,
        filters: &[(String, String)],
        offset: i64,
        limit: i64,
        sort_by: Option<&str>,
    ) -> StoreResult<Vec<Self::Entity>>;

    async fn update(
        &self,
        current: Self::Entity,
        input: &Self::Update,
    ) -> StoreResult<Self::Entity>;

    async fn delete(&self, current: Self::Entity) -> StoreResult<Self::Entity>;
}

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            pool,
        }
    }
}
