//! Books repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::{CrudRepository, EntityModel, StoreError, StoreResult};
use crate::models::book::{Book, BorrowBook, CreateBook};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Clear the borrower fields of a returned book.
    pub async fn clear_borrow(&self, book: Book) -> StoreResult<Book> {
        let returned = sqlx::query_as::<_, Book>(
            "UPDATE books SET reader = NULL, borrowing_time = NULL WHERE id = $1 RETURNING *",
        )
        .bind(book.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(returned)
    }
}

/// Assemble the list query for the given filters and sort column.
///
/// Column names are checked against [`Book::COLUMNS`] before being written
/// into the statement; values are always bound positionally, never
/// interpolated. Filters occupy `$1..$n`, then `LIMIT`/`OFFSET` follow.
fn build_list_query(filters: &[(String, String)], sort_by: Option<&str>) -> StoreResult<String> {
    let mut sql = String::from("SELECT * FROM books");
    for (position, (column, _)) in filters.iter().enumerate() {
        check_column(column)?;
        let clause = if position == 0 { " WHERE" } else { " AND" };
        sql.push_str(&format!("{clause} {column} = ${}", position + 1));
    }
    if let Some(column) = sort_by {
        check_column(column)?;
        sql.push_str(&format!(" ORDER BY {column}"));
    }
    sql.push_str(&format!(
        " LIMIT ${} OFFSET ${}",
        filters.len() + 1,
        filters.len() + 2
    ));
    Ok(sql)
}

fn check_column(name: &str) -> StoreResult<()> {
    if Book::COLUMNS.contains(&name) {
        Ok(())
    } else {
        Err(StoreError::UnknownColumn(name.to_string()))
    }
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    match &e {
        sqlx::Error::Database(db)
            if matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            StoreError::Duplicate(e)
        }
        _ => StoreError::Driver(e),
    }
}

#[async_trait]
impl CrudRepository for BooksRepository {
    type Entity = Book;
    type Create = CreateBook;
    type Update = BorrowBook;

    async fn create(&self, input: &CreateBook) -> StoreResult<Book> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (id, title, author) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&input.id)
        .bind(&input.title)
        .bind(&input.author)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn get_all(
        &self,
        filters: &[(String, String)],
        offset: i64,
        limit: i64,
        sort_by: Option<&str>,
    ) -> StoreResult<Vec<Book>> {
        let sql = build_list_query(filters, sort_by)?;

        let mut query = sqlx::query_as::<_, Book>(&sql);
        for (_, value) in filters {
            query = query.bind(value);
        }
        let books = query.bind(limit).bind(offset).fetch_all(&self.pool).await?;
        Ok(books)
    }

    async fn update(&self, current: Book, input: &BorrowBook) -> StoreResult<Book> {
        let borrowing_time = input.borrowing_time.unwrap_or_else(Utc::now);
        let updated = sqlx::query_as::<_, Book>(
            "UPDATE books SET reader = $1, borrowing_time = $2 WHERE id = $3 RETURNING *",
        )
        .bind(&input.reader)
        .bind(borrowing_time)
        .bind(current.id())
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    async fn delete(&self, current: Book) -> StoreResult<Book> {
        let deleted = sqlx::query_as::<_, Book>("DELETE FROM books WHERE id = $1 RETURNING *")
            .bind(current.id())
            .fetch_one(&self.pool)
            .await?;
        Ok(deleted)
    }
}
