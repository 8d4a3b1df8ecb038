//! Book management service

use crate::{
    config::UpdateMissPolicy,
    error::{AppError, AppResult},
    models::{Book, NewBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
    update_miss: UpdateMissPolicy,
}

impl BooksService {
    pub fn new(repository: Repository, update_miss: UpdateMissPolicy) -> Self {
        Self { repository, update_miss }
    }

    pub async fn create_book(&self, book: &NewBook) -> AppResult<Book> {
        let created = self.repository.books.insert(book).await?;
        tracing::info!("Created book id={} for user id={}", created.id, created.user_id);
        Ok(created)
    }

    /// Overwrite title, author, page count and owner of book `book_id`.
    /// A missing row follows the update-miss policy, as for users.
    pub async fn update_book(&self, book_id: i64, book: &NewBook) -> AppResult<Book> {
        if let Some(updated) = self.repository.books.update(book_id, book).await? {
            tracing::info!("Updated book id={}", updated.id);
            return Ok(updated);
        }

        match self.update_miss {
            UpdateMissPolicy::Reject => {
                Err(AppError::NotFound(format!("Book with id {} not found", book_id)))
            }
            UpdateMissPolicy::Insert => {
                let created = self.repository.books.insert(book).await?;
                tracing::warn!(
                    "Book id={} not found for update, inserted as new book id={}",
                    book_id,
                    created.id
                );
                Ok(created)
            }
        }
    }

    pub async fn get_book_by_id(&self, id: i64) -> AppResult<Book> {
        tracing::debug!("Get book id={}", id);
        self.repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    pub async fn delete_book_by_id(&self, id: i64) -> AppResult<()> {
        if !self.repository.books.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        tracing::info!("Deleted book id={}", id);
        Ok(())
    }

    /// Delete every book owned by `user_id`. A user without books is not
    /// an error; the number of deleted books is returned.
    pub async fn delete_books_by_user_id(&self, user_id: i64) -> AppResult<u64> {
        let deleted = self.repository.books.delete_by_user_id(user_id).await?;
        tracing::info!("Deleted {} book(s) of user id={}", deleted, user_id);
        Ok(deleted)
    }

    pub async fn get_books_by_user_id(&self, user_id: i64) -> AppResult<Vec<Book>> {
        tracing::debug!("Get books of user id={}", user_id);
        self.repository.books.find_by_user_id(user_id).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.repository.books.find_all().await
    }
}
