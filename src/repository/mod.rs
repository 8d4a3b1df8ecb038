//! Repository layer for database operations
//!
//! Services only see the [`UserStore`] and [`BookStore`] contracts. Two
//! backends implement them: hand-written SQL over a Postgres pool
//! ([`users::UsersRepository`], [`books::BooksRepository`]) and an
//! in-process store ([`memory::MemoryStore`]). Which one is used is decided
//! by `database.backend` at startup.

pub mod books;
pub mod memory;
pub mod users;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, NewBook, NewUser, User},
};

/// Persistence contract for person records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new row; the store assigns the id
    async fn insert(&self, user: &NewUser) -> AppResult<User>;

    /// Overwrite every field of row `id` under a row lock.
    ///
    /// Returns `None` when no such row exists.
    async fn update(&self, id: i64, user: &NewUser) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// All rows, ascending id
    async fn find_all(&self) -> AppResult<Vec<User>>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

/// Persistence contract for book records
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new row; the store assigns the id
    async fn insert(&self, book: &NewBook) -> AppResult<Book>;

    /// Overwrite every field of row `id` under a row lock.
    ///
    /// Returns `None` when no such row exists.
    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;

    /// Books owned by `user_id`, ascending id
    async fn find_by_user_id(&self, user_id: i64) -> AppResult<Vec<Book>>;

    /// All rows, ascending id
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;

    /// Returns the number of removed rows, zero included
    async fn delete_by_user_id(&self, user_id: i64) -> AppResult<u64>;
}

/// Main repository struct holding the store backends
#[derive(Clone)]
pub struct Repository {
    pub users: Arc<dyn UserStore>,
    pub books: Arc<dyn BookStore>,
}

impl Repository {
    /// Create a repository backed by the given Postgres pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: Arc::new(users::UsersRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool)),
        }
    }

    /// Create a repository backed by a fresh in-process store
    pub fn in_memory() -> Self {
        let store = Arc::new(memory::MemoryStore::default());
        Self {
            users: store.clone(),
            books: store,
        }
    }

    pub fn from_stores(users: Arc<dyn UserStore>, books: Arc<dyn BookStore>) -> Self {
        Self { users, books }
    }
}

/// Row lock requested by a read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RowLock {
    None,
    /// Pessimistic lock held until the surrounding transaction ends
    ForUpdate,
}

impl RowLock {
    pub(crate) fn clause(self) -> &'static str {
        match self {
            RowLock::None => "",
            RowLock::ForUpdate => " FOR UPDATE",
        }
    }
}

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Turn a foreign key violation into a conflict, keep anything else as a
/// database error
pub(crate) fn map_constraint_error(err: sqlx::Error, context: impl FnOnce() -> String) -> AppError {
    if let sqlx::Error::Database(ref db) = err {
        if db.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) {
            return AppError::Conflict(context());
        }
    }
    AppError::Database(err)
}
