//! Data models for Shelf

pub mod book;
pub mod user;
pub mod user_book;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookRequest, BookUpdateRequest, NewBook};
pub use user::{NewUser, User, UserRequest};
pub use user_book::{UserBookRequest, UserBookResponse};

use validator::ValidationError;

/// Rejects strings that are empty or whitespace only
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
