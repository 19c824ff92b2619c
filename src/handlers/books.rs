//! Book API handlers.
//!
//! Each handler performs one book-store call, then writes an access-log
//! record in-line before answering.  The log write cannot fail the request:
//! [`AccessLogSink::record`](crate::audit::AccessLogSink::record) returns `()`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::Json;
use serde_json::error::Category;
use tracing::debug;

use crate::errors::{ApiError, ErrorBody};
use crate::metrics::record_book_operation;
use crate::model::{AccessLog, Book, BookAction};
use crate::store::{BookStoreError, BookStoreResult};
use crate::AppState;

/// Count the outcome of a store call and convert its error.
fn observe<T>(operation: &'static str, result: BookStoreResult<T>) -> Result<T, ApiError> {
    let outcome = match &result {
        Ok(_) => "ok",
        Err(BookStoreError::NotFound { .. }) => "not_found",
        Err(BookStoreError::Backend(_)) => "error",
    };
    record_book_operation(operation, outcome);
    result.map_err(ApiError::from)
}

/// Write the access-log entry for `action` on `isbn`.
async fn log_access(state: &AppState, action: BookAction, isbn: &str) {
    state.access_logs.record(&AccessLog::new(action.event(isbn))).await;
}

/// Whether a `Content-Type` value names JSON (`application/json` or a
/// `+json` subtype), ignoring parameters such as `charset`.
fn is_json_content_type(value: &HeaderValue) -> bool {
    let Ok(value) = value.to_str() else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or_default().trim();
    let mime = mime.to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// Decode a [`Book`] from a request body.
///
/// A request without `Content-Type` is read as JSON. A declared non-JSON
/// type, unparsable JSON and schema violations are all validation errors.
fn parse_book(headers: &HeaderMap, body: &[u8]) -> Result<Book, ApiError> {
    if let Some(content_type) = headers.get(header::CONTENT_TYPE) {
        if !is_json_content_type(content_type) {
            return Err(ApiError::Validation {
                message: "Expected request with `Content-Type: application/json`".to_string(),
            });
        }
    }

    serde_json::from_slice(body).map_err(|e| {
        let message = match e.classify() {
            Category::Data => format!("Failed to deserialize the JSON body into a book: {e}"),
            _ => format!("Failed to parse the request body as JSON: {e}"),
        };
        ApiError::Validation { message }
    })
}

/// `POST /books` -- Register a book (upsert by ISBN).
#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    operation_id = "CreateBook",
    request_body = Book,
    responses(
        (status = 201, description = "Book registered"),
        (status = 422, description = "Invalid book payload", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let book = parse_book(&headers, &body)?;
    let isbn = book.isbn.clone();
    debug!("Creating book isbn={}", isbn);

    observe("create", state.books.save(book).await)?;
    log_access(&state, BookAction::Created, &isbn).await;

    Ok(StatusCode::CREATED)
}

/// `GET /books/{isbn}` -- Fetch a book.
#[utoipa::path(
    get,
    path = "/books/{isbn}",
    tag = "Books",
    operation_id = "GetBook",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 200, description = "The book", body = Book),
        (status = 404, description = "No book with this ISBN", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<Json<Book>, ApiError> {
    let record = observe("get", state.books.get(&isbn).await)?;
    log_access(&state, BookAction::Retrieved, &isbn).await;

    Ok(Json(record.into_book()))
}

/// `DELETE /books/{isbn}` -- Remove a book.
#[utoipa::path(
    delete,
    path = "/books/{isbn}",
    tag = "Books",
    operation_id = "DeleteBook",
    params(("isbn" = String, Path, description = "ISBN of the book")),
    responses(
        (status = 204, description = "Book deleted"),
        (status = 404, description = "No book with this ISBN", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(isbn): Path<String>,
) -> Result<StatusCode, ApiError> {
    observe("delete", state.books.delete(&isbn).await)?;
    log_access(&state, BookAction::Deleted, &isbn).await;

    Ok(StatusCode::NO_CONTENT)
}
