//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{map_constraint_error, BookStore, RowLock};
use crate::{
    error::AppResult,
    models::{Book, NewBook},
};

const COLUMNS: &str = "id, title, author, page_count, user_id";

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn select_by_id(lock: RowLock) -> String {
        format!("SELECT {} FROM book WHERE id = $1{}", COLUMNS, lock.clause())
    }
}

fn missing_owner(book: &NewBook) -> String {
    format!("User {} does not exist", book.user_id())
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn insert(&self, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (title, author, page_count, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, author, page_count, user_id
            "#,
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.page_count())
        .bind(book.user_id())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_constraint_error(e, || missing_owner(book)))
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Book>(&Self::select_by_id(RowLock::ForUpdate))
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if current.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let row = sqlx::query_as::<_, Book>(
            r#"
            UPDATE book SET title = $1, author = $2, page_count = $3, user_id = $4
            WHERE id = $5
            RETURNING id, title, author, page_count, user_id
            "#,
        )
        .bind(book.title())
        .bind(book.author())
        .bind(book.page_count())
        .bind(book.user_id())
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint_error(e, || missing_owner(book)))?;

        tx.commit().await?;
        Ok(Some(row))
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>(&Self::select_by_id(RowLock::None))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM book WHERE user_id = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!("SELECT {} FROM book ORDER BY id", COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM book WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user_id(&self, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM book WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
