use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use shelf_http::AppError;

use super::models::{Book, BookId, BookStatus, NewBook, StatusQuery};
use super::store::BookStore;

pub type SharedStore = Arc<BookStore>;

/// Books module health endpoint
pub async fn health_check() -> &'static str {
    "books module is healthy"
}

pub async fn list_books(State(store): State<SharedStore>) -> Json<Vec<Book>> {
    Json(store.get_all())
}

pub async fn get_book(
    State(store): State<SharedStore>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;

    store
        .get_by_id(id)
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("book {id}")))
}

pub async fn list_books_by_status(
    State(store): State<SharedStore>,
    status: Result<Path<BookStatus>, PathRejection>,
) -> Result<Json<Vec<Book>>, AppError> {
    let Path(status) = status?;
    Ok(Json(store.get_by_status(status)))
}

pub async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<NewBook>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Json(new_book) = payload?;
    let book = store.add(new_book);

    tracing::info!(book_id = book.id, status = %book.status, "book added");
    Ok(Json(book))
}

/// Always answers 200 with an empty body, whether or not the book exists.
pub async fn update_book_status(
    State(store): State<SharedStore>,
    id: Result<Path<BookId>, PathRejection>,
    query: Result<Query<StatusQuery>, QueryRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Query(StatusQuery { status }) = query?;

    if store.update_status(id, status) {
        tracing::info!(book_id = id, %status, "book status updated");
    } else {
        tracing::debug!(book_id = id, %status, "status update ignored, no such book");
    }

    Ok(StatusCode::OK)
}
