//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookUpdateRequest, NewBook},
};

/// List the books owned by a user
#[utoipa::path(
    get,
    path = "/user/{user_id}/books",
    tag = "books",
    params(
        ("user_id" = i64, Path, description = "Owner user ID")
    ),
    responses(
        (status = 200, description = "Books owned by the user", body = Vec<Book>)
    )
)]
pub async fn list_user_books(
    State(state): State<crate::AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Vec<Book>>> {
    let books = state.services.books.get_books_by_user_id(user_id).await?;
    Ok(Json(books))
}

/// Get book by ID
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
) -> AppResult<Json<Book>> {
    let book = state.services.books.get_book_by_id(book_id).await?;
    Ok(Json(book))
}

/// Update book
#[utoipa::path(
    put,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    request_body = BookUpdateRequest,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 422, description = "Body is not a well-formed request"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Owner does not exist", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
    Json(request): Json<BookUpdateRequest>,
) -> AppResult<Json<Book>> {
    let book = NewBook::try_from(request)?;
    let updated = state.services.books.update_book(book_id, &book).await?;
    Ok(Json(updated))
}

/// Delete book
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "books",
    params(
        ("book_id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.services.books.delete_book_by_id(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
