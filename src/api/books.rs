//! Book catalog endpoints
//!
//! Each handler maps one verb+path to one service call, then hands the
//! result to the HATEOAS formatter before responding.

use axum::{
    extract::{Host, OriginalUri, Path, Query, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use utoipa::IntoParams;

use super::{check_payload, check_serial};
use crate::{
    error::{AppError, AppResult, ErrorResponse},
    hateoas::{self, ExtraRel},
    models::book::{BorrowBook, CreateBook},
    AppState,
};

/// Extra relations advertised on every single-book response. Borrowing
/// replaces the generic `update` link; returning sits alongside it.
pub const BOOK_RELS: [ExtraRel; 2] = [
    ExtraRel {
        rel: "borrow",
        method: "PATCH",
        endpoint: "/borrow",
        overwrite: Some("update"),
    },
    ExtraRel {
        rel: "return",
        method: "POST",
        endpoint: "/return",
        overwrite: None,
    },
];

/// Query parameters for the collection endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListBooksQuery {
    /// Exact-match filter on the author field
    pub author: Option<String>,
    /// 1-based page number (default 1)
    pub page: Option<i64>,
    /// Page size (default from configuration)
    pub limit: Option<i64>,
    /// Column to sort by, ascending
    pub sort_by: Option<String>,
}

fn base_url(host: &str) -> String {
    format!("http://{host}")
}

fn request_url(host: &str, uri: &Uri) -> String {
    format!("http://{host}{uri}")
}

/// Create a book record
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created; fields plus _links"),
        (status = 400, description = "Invalid serial number or identifier already in use", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Json(payload): Json<CreateBook>,
) -> AppResult<(StatusCode, Json<Value>)> {
    check_payload(&payload)?;
    let book = state.services.books.create(&payload).await?;
    let body = hateoas::item_envelope(
        &book,
        &base_url(&host),
        &state.config.api.prefix,
        &request_url(&host, &uri),
        &BOOK_RELS,
    );
    Ok((StatusCode::CREATED, Json(body)))
}

/// Get one book by serial number
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book serial number")),
    responses(
        (status = 200, description = "Book fields plus _links"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn read_book(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    check_serial(&id)?;
    let book = state.services.books.get(&id).await?;
    let body = hateoas::item_envelope(
        &book,
        &base_url(&host),
        &state.config.api.prefix,
        &request_url(&host, &uri),
        &BOOK_RELS,
    );
    Ok(Json(body))
}

/// List books with filtering and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListBooksQuery),
    responses(
        (status = 200, description = "Collection envelope: {items, _links}"),
        (status = 400, description = "Unknown sort column or bad paging values", body = ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    Host(host): Host,
    Query(query): Query<ListBooksQuery>,
) -> AppResult<Json<Value>> {
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(state.config.api.paging_limit);
    if page < 1 {
        return Err(AppError::Validation(
            "Page should be greater than or equal to 1.".to_string(),
        ));
    }
    if limit < 1 {
        return Err(AppError::Validation(
            "Limit should be greater than or equal to 1.".to_string(),
        ));
    }

    let mut filters: Vec<(String, String)> = Vec::new();
    if let Some(author) = &query.author {
        filters.push(("author".to_string(), author.clone()));
    }

    let books = state
        .services
        .books
        .get_all(&filters, page, limit, query.sort_by.as_deref())
        .await?;

    let body = hateoas::collection_envelope(
        &books,
        &base_url(&host),
        &state.config.api.prefix,
        page,
        limit,
    );
    Ok(Json(body))
}

/// Borrow a book
#[utoipa::path(
    patch,
    path = "/books/{id}/borrow",
    tag = "books",
    params(("id" = String, Path, description = "Book serial number")),
    request_body = BorrowBook,
    responses(
        (status = 200, description = "Book with reader and borrowing_time set"),
        (status = 400, description = "Invalid reader serial number", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    Json(payload): Json<BorrowBook>,
) -> AppResult<Json<Value>> {
    check_serial(&id)?;
    check_payload(&payload)?;
    let book = state.services.books.borrow(&id, &payload).await?;
    let body = hateoas::item_envelope(
        &book,
        &base_url(&host),
        &state.config.api.prefix,
        &request_url(&host, &uri),
        &BOOK_RELS,
    );
    Ok(Json(body))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/books/{id}/return",
    tag = "books",
    params(("id" = String, Path, description = "Book serial number")),
    responses(
        (status = 200, description = "Book with reader and borrowing_time cleared"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    check_serial(&id)?;
    let book = state.services.books.give_back(&id).await?;
    let body = hateoas::item_envelope(
        &book,
        &base_url(&host),
        &state.config.api.prefix,
        &request_url(&host, &uri),
        &BOOK_RELS,
    );
    Ok(Json(body))
}

/// Delete a book, returning its last state
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book serial number")),
    responses(
        (status = 200, description = "Deleted book's prior state plus _links"),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Host(host): Host,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> AppResult<Json<Value>> {
    check_serial(&id)?;
    let book = state.services.books.delete(&id).await?;
    let body = hateoas::item_envelope(
        &book,
        &base_url(&host),
        &state.config.api.prefix,
        &request_url(&host, &uri),
        &BOOK_RELS,
    );
    Ok(Json(body))
}
