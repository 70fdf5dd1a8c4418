//! Book catalog service

use super::CrudService;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BorrowBook, CreateBook},
    repository::{books::BooksRepository, EntityModel, Repository},
};

/// Service for the book catalog: generic CRUD plus the borrow/return flow.
#[derive(Clone)]
pub struct BooksService {
    crud: CrudService<BooksRepository>,
    repository: BooksRepository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self {
            crud: CrudService::new(repository.books.clone()),
            repository: repository.books,
        }
    }

    pub async fn create(&self, input: &CreateBook) -> AppResult<Book> {
        self.crud.create(input).await
    }

    pub async fn get(&self, id: &str) -> AppResult<Book> {
        self.crud.get(id).await
    }

    pub async fn get_all(
        &self,
        filters: &[(String, String)],
        page: i64,
        limit: i64,
        sort_by: Option<&str>,
    ) -> AppResult<Vec<Book>> {
        self.crud.get_all(filters, page, limit, sort_by).await
    }

    /// Record a borrow: sets the reader and the borrowing time.
    pub async fn borrow(&self, id: &str, input: &BorrowBook) -> AppResult<Book> {
        self.crud.update(id, input).await
    }

    /// Return a borrowed book: fetch it (404 if absent), then clear the
    /// borrower fields.
    pub async fn give_back(&self, id: &str) -> AppResult<Book> {
        let book = self.crud.get(id).await?;
        let returned = self
            .repository
            .clear_borrow(book)
            .await
            .map_err(|e| AppError::from_store(e, Book::NAME))?;
        tracing::info!("Returned book with ID: {}.", returned.id());
        Ok(returned)
    }

    pub async fn delete(&self, id: &str) -> AppResult<Book> {
        self.crud.delete(id).await
    }
}
