//! Book model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::not_blank;
use crate::error::{AppError, AppResult};

/// Book record as stored in the `book` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub page_count: i64,
    /// Owning user
    pub user_id: i64,
}

/// Book payload as received inside a user-with-books request
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title must not be blank"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required"),
        length(max = 255, message = "Author must be at most 255 characters")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "Page count is required"),
        range(min = 0, message = "Page count must not be negative")
    )]
    pub page_count: Option<i64>,
}

/// Stand-alone book update payload, carries its owner explicitly
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookUpdateRequest {
    #[validate(
        required(message = "Title is required"),
        custom(function = "not_blank", message = "Title must not be blank"),
        length(max = 255, message = "Title must be at most 255 characters")
    )]
    pub title: Option<String>,
    #[validate(
        required(message = "Author is required"),
        length(max = 255, message = "Author must be at most 255 characters")
    )]
    pub author: Option<String>,
    #[validate(
        required(message = "Page count is required"),
        range(min = 0, message = "Page count must not be negative")
    )]
    pub page_count: Option<i64>,
    #[validate(
        required(message = "Owner user id is required"),
        range(min = 1, message = "Owner user id must be positive")
    )]
    pub user_id: Option<i64>,
}

/// Validated book fields that still lack an owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    title: String,
    author: String,
    page_count: i64,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, page_count: i64) -> AppResult<Self> {
        BookRequest {
            title: Some(title.into()),
            author: Some(author.into()),
            page_count: Some(page_count),
        }
        .try_into()
    }

    /// Stamp the owning user on the draft
    pub fn owned_by(self, user_id: i64) -> NewBook {
        NewBook {
            title: self.title,
            author: self.author,
            page_count: self.page_count,
            user_id,
        }
    }
}

impl TryFrom<BookRequest> for BookDraft {
    type Error = AppError;

    fn try_from(request: BookRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        match (request.title, request.author, request.page_count) {
            (Some(title), Some(author), Some(page_count)) => Ok(Self { title, author, page_count }),
            _ => Err(AppError::Validation("Not all fields for the book are filled in".to_string())),
        }
    }
}

/// Validated book data with its owner, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    title: String,
    author: String,
    page_count: i64,
    user_id: i64,
}

impl NewBook {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn page_count(&self) -> i64 {
        self.page_count
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// Materialize as a stored record with the given id
    pub fn into_book(self, id: i64) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            page_count: self.page_count,
            user_id: self.user_id,
        }
    }
}

impl TryFrom<BookUpdateRequest> for NewBook {
    type Error = AppError;

    fn try_from(request: BookUpdateRequest) -> Result<Self, Self::Error> {
        request.validate()?;
        match (request.title, request.author, request.page_count, request.user_id) {
            (Some(title), Some(author), Some(page_count), Some(user_id)) => Ok(Self {
                title,
                author,
                page_count,
                user_id,
            }),
            _ => Err(AppError::Validation("Not all fields for the book are filled in".to_string())),
        }
    }
}
